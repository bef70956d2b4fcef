//! Human-readable rendering of bookmark cache durations.

const UNIT_LABELS: [&str; 4] = ["days", "hours", "minutes", "seconds"];

/// Renders a millisecond duration as `"<n> days <n> hours <n> minutes <n> seconds"`,
/// omitting zero components. Days are not wrapped; the rest wrap at their
/// natural boundary. Sub-second remainders are dropped, and a duration under
/// one second renders as an empty string.
pub fn format_duration(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let components = [
        total_seconds / 86_400,
        (total_seconds / 3_600) % 24,
        (total_seconds / 60) % 60,
        total_seconds % 60,
    ];

    components
        .iter()
        .zip(UNIT_LABELS)
        .filter(|(value, _)| **value > 0)
        .map(|(value, label)| format!("{value} {label}"))
        .collect::<Vec<_>>()
        .join(" ")
}
