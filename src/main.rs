fn main() {
    jira_settings_lib::run()
}
