use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Names of the three option slots the host can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKey {
    AvailableProjects,
    EnabledMenuItems,
    AvailableIssuesStatuses,
}

impl OptionKey {
    pub const ALL: [OptionKey; 3] = [
        OptionKey::AvailableProjects,
        OptionKey::EnabledMenuItems,
        OptionKey::AvailableIssuesStatuses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::AvailableProjects => "available_projects",
            OptionKey::EnabledMenuItems => "enabled_menu_items",
            OptionKey::AvailableIssuesStatuses => "available_issues_statuses",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option. Entries written by older versions may be bare
/// name strings; those load with `enabled` unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOptionEntry")]
pub struct OptionEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptionEntry {
    Name(String),
    Entry(RawOptionFields),
}

#[derive(Deserialize)]
struct RawOptionFields {
    #[serde(default)]
    name: String,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawOptionEntry> for OptionEntry {
    fn from(raw: RawOptionEntry) -> Self {
        match raw {
            RawOptionEntry::Name(name) => OptionEntry {
                name,
                enabled: None,
                extra: Map::new(),
            },
            RawOptionEntry::Entry(fields) => OptionEntry {
                name: fields.name,
                enabled: fields.enabled,
                extra: fields.extra,
            },
        }
    }
}

impl OptionEntry {
    pub fn new(name: impl Into<String>, enabled: Option<bool>) -> Self {
        Self {
            name: name.into(),
            enabled,
            extra: Map::new(),
        }
    }

    /// Named and carrying an explicit enabled flag.
    pub fn is_resolved(&self) -> bool {
        !self.name.is_empty() && self.enabled.is_some()
    }

    /// Whether the entry counts as chosen when a fresh list is merged in.
    fn is_selected(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// The three option slots persisted under `options`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub available_projects: Vec<OptionEntry>,
    pub enabled_menu_items: Vec<OptionEntry>,
    pub available_issues_statuses: Vec<OptionEntry>,
}

impl OptionSet {
    pub fn slot(&self, key: OptionKey) -> &[OptionEntry] {
        match key {
            OptionKey::AvailableProjects => &self.available_projects,
            OptionKey::EnabledMenuItems => &self.enabled_menu_items,
            OptionKey::AvailableIssuesStatuses => &self.available_issues_statuses,
        }
    }

    fn slot_mut(&mut self, key: OptionKey) -> &mut Vec<OptionEntry> {
        match key {
            OptionKey::AvailableProjects => &mut self.available_projects,
            OptionKey::EnabledMenuItems => &mut self.enabled_menu_items,
            OptionKey::AvailableIssuesStatuses => &mut self.available_issues_statuses,
        }
    }

    /// A slot is resolved once its first entry is resolved; only the first
    /// entry is inspected.
    pub fn is_resolved(&self, key: OptionKey) -> bool {
        self.slot(key)
            .first()
            .map(OptionEntry::is_resolved)
            .unwrap_or(false)
    }

    /// Slots that still need a fetch from the host, in declaration order.
    pub fn unresolved_keys(&self) -> Vec<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .filter(|key| !self.is_resolved(*key))
            .collect()
    }

    /// Replaces a slot with a freshly fetched list. Each fetched entry is
    /// enabled iff its name was selected in the slot being replaced; the
    /// host's order is kept as-is.
    pub fn merge_fetched(&mut self, key: OptionKey, fetched: Vec<OptionEntry>) {
        let slot = self.slot_mut(key);
        let merged: Vec<OptionEntry> = {
            let selected: HashSet<&str> = slot
                .iter()
                .filter(|entry| entry.is_selected())
                .map(|entry| entry.name.as_str())
                .collect();

            fetched
                .into_iter()
                .map(|mut entry| {
                    entry.enabled = Some(selected.contains(entry.name.as_str()));
                    entry
                })
                .collect()
        };

        tracing::debug!(
            slot = key.as_str(),
            previous = slot.len(),
            fetched = merged.len(),
            "replacing option slot"
        );
        *slot = merged;
    }

    /// Sets the enabled flag on the named entry. Returns false when no entry
    /// with that name exists.
    pub fn set_enabled(&mut self, key: OptionKey, name: &str, enabled: bool) -> bool {
        match self.slot_mut(key).iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.enabled = Some(enabled);
                true
            }
            None => false,
        }
    }
}
