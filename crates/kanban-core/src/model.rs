//! Board Models
//!
//! Card records as persisted, card units as rendered, and per-column state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board-wide unique card identifier (`c1`, `c2`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id minted from the sequence counter
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("c{}", n))
    }

    /// Counter value this id was minted from, if it follows the `c{n}` form
    pub fn sequence_number(&self) -> Option<u64> {
        self.0.strip_prefix('c')?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Card as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    #[serde(default)]
    pub content: String,
    /// Missing on hand-edited or partial snapshots; assigned at load
    #[serde(default)]
    pub color: Option<String>,
}

impl CardRecord {
    pub fn new(id: CardId, content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            color: Some(color.into()),
        }
    }
}

/// Visibility of a card's directional move triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveTriggers {
    pub left: bool,
    pub right: bool,
}

/// A card as shown on the board
#[derive(Debug, Clone, PartialEq)]
pub struct CardUnit {
    pub id: CardId,
    pub content: String,
    pub color: String,
    /// `None` when the card's template has no move triggers
    pub move_triggers: Option<MoveTriggers>,
}

impl CardUnit {
    /// Record form written to the snapshot (content trimmed)
    pub fn record(&self) -> CardRecord {
        CardRecord {
            id: self.id.clone(),
            content: self.content.trim().to_string(),
            color: Some(self.color.clone()),
        }
    }
}

/// One column's ordered cards; index 0 is the top of the column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    pub name: String,
    pub cards: Vec<CardUnit>,
    /// Card count label, refreshed after every structural change
    pub count: usize,
}

impl ColumnState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            count: 0,
        }
    }

    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_ids() {
        let id = CardId::from_sequence(12);
        assert_eq!(id.as_str(), "c12");
        assert_eq!(id.sequence_number(), Some(12));
        assert_eq!(CardId::from("imported").sequence_number(), None);
    }

    #[test]
    fn test_record_trims_content() {
        let unit = CardUnit {
            id: CardId::from_sequence(1),
            content: "  write report \n".to_string(),
            color: "hsl(10 70% 90%)".to_string(),
            move_triggers: None,
        };
        let record = unit.record();
        assert_eq!(record.content, "write report");
        assert_eq!(record.color.as_deref(), Some("hsl(10 70% 90%)"));
    }

    #[test]
    fn test_record_defaults() {
        let record: CardRecord = serde_json::from_str(r#"{"id": "c3"}"#).unwrap();
        assert_eq!(record.id, CardId::from_sequence(3));
        assert_eq!(record.content, "");
        assert!(record.color.is_none());
    }
}
