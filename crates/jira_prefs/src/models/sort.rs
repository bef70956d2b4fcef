use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Issue fields the launcher can sort search results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortFieldName {
    Assignee,
    Created,
    #[serde(rename = "Due Date")]
    DueDate,
    #[serde(rename = "Issue Type")]
    IssueType,
    Key,
    Priority,
    Reporter,
    Resolution,
    Status,
    Updated,
}

impl SortFieldName {
    pub const ALL: [SortFieldName; 10] = [
        SortFieldName::Assignee,
        SortFieldName::Created,
        SortFieldName::DueDate,
        SortFieldName::IssueType,
        SortFieldName::Key,
        SortFieldName::Priority,
        SortFieldName::Reporter,
        SortFieldName::Resolution,
        SortFieldName::Status,
        SortFieldName::Updated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortFieldName::Assignee => "Assignee",
            SortFieldName::Created => "Created",
            SortFieldName::DueDate => "Due Date",
            SortFieldName::IssueType => "Issue Type",
            SortFieldName::Key => "Key",
            SortFieldName::Priority => "Priority",
            SortFieldName::Reporter => "Reporter",
            SortFieldName::Resolution => "Resolution",
            SortFieldName::Status => "Status",
            SortFieldName::Updated => "Updated",
        }
    }
}

impl fmt::Display for SortFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the sort sequence. Keys other than `name` are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub name: SortFieldName,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SortField {
    pub fn new(name: SortFieldName) -> Self {
        Self {
            name,
            extra: Map::new(),
        }
    }
}

/// Fields offered for a sort slot: every field not already used, plus
/// `current` (the field occupying the slot being edited) so it stays
/// selectable in its own list. Enumeration order is preserved.
pub fn available_sort_fields(
    sort: &[SortField],
    current: Option<SortFieldName>,
) -> Vec<SortFieldName> {
    SortFieldName::ALL
        .into_iter()
        .filter(|name| Some(*name) == current || !sort.iter().any(|field| field.name == *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_of(names: &[SortFieldName]) -> Vec<SortField> {
        names.iter().copied().map(SortField::new).collect()
    }

    #[test]
    fn empty_sort_offers_every_field() {
        assert_eq!(available_sort_fields(&[], None), SortFieldName::ALL.to_vec());
    }

    #[test]
    fn used_fields_are_hidden_except_the_one_being_edited() {
        let sort = sort_of(&[SortFieldName::Priority, SortFieldName::Key, SortFieldName::Updated]);

        let at_key = available_sort_fields(&sort, Some(SortFieldName::Key));
        assert!(at_key.contains(&SortFieldName::Key));
        assert!(!at_key.contains(&SortFieldName::Priority));
        assert!(!at_key.contains(&SortFieldName::Updated));
        assert_eq!(at_key.len(), 8);

        let appending = available_sort_fields(&sort, None);
        assert_eq!(appending.len(), 7);
        assert!(!appending.contains(&SortFieldName::Key));
    }

    #[test]
    fn availability_equals_complement_plus_current_for_every_subset() {
        for mask in 0u32..(1 << SortFieldName::ALL.len()) {
            let used: Vec<SortFieldName> = SortFieldName::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, name)| name)
                .collect();
            let sort = sort_of(&used);

            let mut currents: Vec<Option<SortFieldName>> = used.iter().copied().map(Some).collect();
            currents.push(None);

            for current in currents {
                let expected: Vec<SortFieldName> = SortFieldName::ALL
                    .into_iter()
                    .filter(|name| !used.contains(name) || Some(*name) == current)
                    .collect();
                assert_eq!(
                    available_sort_fields(&sort, current),
                    expected,
                    "mask {mask:#012b}, current {current:?}"
                );
            }
        }
    }

    #[test]
    fn names_with_spaces_use_display_spelling_on_the_wire() {
        let encoded =
            serde_json::to_string(&SortField::new(SortFieldName::DueDate)).expect("encode");
        assert_eq!(encoded, r#"{"name":"Due Date"}"#);

        let decoded: SortField =
            serde_json::from_str(r#"{"name":"Issue Type","order":"DESC"}"#).expect("decode");
        assert_eq!(decoded.name, SortFieldName::IssueType);
        assert_eq!(decoded.extra.get("order"), Some(&Value::String("DESC".into())));
    }
}
