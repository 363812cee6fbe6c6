//! Board Configuration
//!
//! Storage keys, column layout and timing used by the synchronizer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Storage key holding the board snapshot
pub const DEFAULT_BOARD_KEY: &str = "kanban_board_v1";
/// Storage key holding the id counter
pub const DEFAULT_COUNTER_KEY: &str = "kanban_id_seq";
/// Content shown for a card with no text
pub const DEFAULT_PLACEHOLDER: &str = "New card";
/// Coalescing window for content edits
pub const DEFAULT_EDIT_DEBOUNCE_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board_key: String,
    pub counter_key: String,
    /// Column names, left to right
    pub columns: Vec<String>,
    pub placeholder: String,
    pub edit_debounce_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_key: DEFAULT_BOARD_KEY.to_string(),
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
            columns: vec!["todo".to_string(), "inprogress".to_string(), "done".to_string()],
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            edit_debounce_ms: DEFAULT_EDIT_DEBOUNCE_MS,
        }
    }
}

impl BoardConfig {
    /// Parse an override document; missing fields keep their defaults
    pub fn from_json(raw: &str) -> BoardResult<Self> {
        serde_json::from_str(raw).map_err(|e| BoardError::InvalidConfig(e.to_string()))
    }

    pub fn edit_debounce(&self) -> Duration {
        Duration::from_millis(self.edit_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = BoardConfig::default();
        assert_eq!(config.columns, vec!["todo", "inprogress", "done"]);
        assert_eq!(config.board_key, "kanban_board_v1");
        assert_eq!(config.counter_key, "kanban_id_seq");
        assert_eq!(config.edit_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_override() {
        let config = BoardConfig::from_json(r#"{"placeholder": "Empty", "edit_debounce_ms": 400}"#).unwrap();
        assert_eq!(config.placeholder, "Empty");
        assert_eq!(config.edit_debounce_ms, 400);
        assert_eq!(config.columns.len(), 3);
    }

    #[test]
    fn test_invalid_override() {
        let err = BoardConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, BoardError::InvalidConfig(_)));
    }
}
