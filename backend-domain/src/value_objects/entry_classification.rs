// Check-in outcome value objects

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClassification {
    FirstEntry,
    ReEntry(u32),
}

impl EntryClassification {
    /// Classifies a post-increment scan count.
    pub fn from_scan_count(scan_count: u32) -> Self {
        if scan_count == 1 {
            EntryClassification::FirstEntry
        } else {
            EntryClassification::ReEntry(scan_count)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryClassification::FirstEntry => "first",
            EntryClassification::ReEntry(_) => "re-entry",
        }
    }
}

impl Serialize for EntryClassification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInResult {
    pub holder_name: String,
    pub classification: EntryClassification,
    pub scan_count: u32,
}

impl CheckInResult {
    pub fn status_line(&self) -> String {
        match self.classification {
            EntryClassification::FirstEntry => format!("VERIFIED: {}", self.holder_name),
            EntryClassification::ReEntry(count) => {
                format!("RE-ENTRY ({}): {}", count, self.holder_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_scan_is_first_entry() {
        assert_eq!(
            EntryClassification::from_scan_count(1),
            EntryClassification::FirstEntry
        );
        assert_eq!(
            EntryClassification::from_scan_count(2),
            EntryClassification::ReEntry(2)
        );
    }

    #[test]
    fn status_line_matches_gate_display() {
        let first = CheckInResult {
            holder_name: "Jane Doe".to_string(),
            classification: EntryClassification::FirstEntry,
            scan_count: 1,
        };
        assert_eq!(first.status_line(), "VERIFIED: Jane Doe");

        let again = CheckInResult {
            holder_name: "Jane Doe".to_string(),
            classification: EntryClassification::ReEntry(3),
            scan_count: 3,
        };
        assert_eq!(again.status_line(), "RE-ENTRY (3): Jane Doe");
    }

    #[test]
    fn classification_serializes_to_wire_labels() {
        let value = serde_json::to_value(EntryClassification::ReEntry(4)).expect("serialize");
        assert_eq!(value, serde_json::json!("re-entry"));
        let value = serde_json::to_value(EntryClassification::FirstEntry).expect("serialize");
        assert_eq!(value, serde_json::json!("first"));
    }
}
