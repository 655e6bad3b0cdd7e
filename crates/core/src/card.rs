//! Canonical card and message records

use serde::{Deserialize, Serialize};

/// A task card, shared by the expected side (derived from inbox messages)
/// and the actual side (fetched from the board).
///
/// `labels` is insertion-ordered and duplicate-free; use [`CardRecord::add_label`]
/// to keep that invariant when mutating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl CardRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            labels: Vec::new(),
        }
    }

    /// Add a label if not already present. Adding an existing label is a no-op.
    pub fn add_label(&mut self, label: &str) {
        if !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A raw inbox message, as supplied by an external message source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_label_is_idempotent() {
        let mut card = CardRecord::new("Foo", "");
        card.add_label("New");
        card.add_label("Urgent");
        card.add_label("New");
        assert_eq!(card.labels, vec!["New", "Urgent"]);
    }

    #[test]
    fn raw_message_tolerates_missing_fields() {
        let msg: RawMessage = serde_json::from_str("{}").unwrap();
        assert!(msg.subject.is_empty());
        assert!(msg.body.is_empty());
    }
}
