//! Board Snapshot Codec
//!
//! JSON snapshot of the whole board:
//! `{"version":1,"columns":{"todo":[{"id","content","color"}, ...], ...}}`.
//! A snapshot that fails to parse decodes as the empty board.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BoardResult;
use crate::model::{CardRecord, CardUnit, ColumnState};

pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serialized board state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub columns: BTreeMap<String, Vec<CardRecord>>,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            columns: BTreeMap::new(),
        }
    }
}

impl BoardSnapshot {
    /// Records of `column`; a missing column reads as empty
    pub fn cards(&self, column: &str) -> &[CardRecord] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn card_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }
}

/// Snapshot of the live columns as they will be persisted (content trimmed).
/// Every registered column is present, empty ones as `[]`.
pub fn capture(columns: &[ColumnState]) -> BoardSnapshot {
    let columns = columns
        .iter()
        .map(|column| (column.name.clone(), column.cards.iter().map(CardUnit::record).collect()))
        .collect();
    BoardSnapshot {
        version: SNAPSHOT_VERSION,
        columns,
    }
}

pub fn encode(snapshot: &BoardSnapshot) -> BoardResult<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parse a stored snapshot. Corrupt input is logged and yields the empty board.
pub fn decode(raw: &str) -> BoardSnapshot {
    match serde_json::from_str::<BoardSnapshot>(raw) {
        Ok(snapshot) => {
            if snapshot.version > SNAPSHOT_VERSION {
                log::warn!(
                    "snapshot version {} is newer than {}, reading what is understood",
                    snapshot.version,
                    SNAPSHOT_VERSION
                );
            }
            snapshot
        }
        Err(e) => {
            log::warn!("could not read saved board, starting empty: {}", e);
            BoardSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardId;

    fn unit(n: u64, content: &str, color: &str) -> CardUnit {
        CardUnit {
            id: CardId::from_sequence(n),
            content: content.to_string(),
            color: color.to_string(),
            move_triggers: None,
        }
    }

    #[test]
    fn test_decode_garbage_is_empty() {
        assert!(decode("{not json").is_empty());
        assert!(decode("").is_empty());
        assert!(decode("42").is_empty());
        assert!(decode(r#"{"columns": {"todo": [{"content": "no id"}]}}"#).is_empty());
    }

    #[test]
    fn test_decode_missing_columns_are_empty() {
        let snapshot = decode(r#"{"columns": {"done": [{"id": "c1", "content": "x", "color": "red"}]}}"#);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(snapshot.cards("todo").is_empty());
        assert_eq!(snapshot.cards("done").len(), 1);
    }

    #[test]
    fn test_decode_unversioned_snapshot() {
        let snapshot = decode(r#"{"columns": {"todo": [], "inprogress": [], "done": []}}"#);
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.columns.len(), 3);
    }

    #[test]
    fn test_capture_trims_content_and_keeps_color() {
        let mut column = ColumnState::new("todo");
        column.cards.push(unit(1, "  padded  ", "hsl(5 75% 90%)"));
        column.cards.push(unit(2, "plain", "hsl(300 80% 88%)"));

        let first = capture(std::slice::from_ref(&column));
        let second = capture(&[column]);
        let cards = first.cards("todo");
        assert_eq!(cards[0].content, "padded");
        assert_eq!(cards[0].color.as_deref(), Some("hsl(5 75% 90%)"));
        assert_eq!(cards[1].color.as_deref(), Some("hsl(300 80% 88%)"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut todo = ColumnState::new("todo");
        todo.cards.push(unit(3, "first", "hsl(1 70% 85%)"));
        todo.cards.push(unit(1, "second", "hsl(2 71% 86%)"));
        let done = ColumnState::new("done");

        let snapshot = capture(&[todo, done]);
        let raw = encode(&snapshot).unwrap();
        let decoded = decode(&raw);
        assert_eq!(decoded, snapshot);
        assert_eq!(encode(&decoded).unwrap(), raw);
    }

    #[test]
    fn test_empty_snapshot_lists_all_columns() {
        let columns: Vec<ColumnState> = ["todo", "inprogress", "done"].into_iter().map(ColumnState::new).collect();
        let raw = encode(&capture(&columns)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["columns"]["todo"], serde_json::json!([]));
        assert_eq!(value["columns"]["inprogress"], serde_json::json!([]));
        assert_eq!(value["columns"]["done"], serde_json::json!([]));
    }
}
