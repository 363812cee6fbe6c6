//! Column Registry
//!
//! Fixed left-to-right column order and the move state machine derived
//! from a card's column index.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::model::MoveTriggers;

/// Direction of a button move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Ordered, immutable set of column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRegistry {
    names: Vec<String>,
}

impl ColumnRegistry {
    pub fn new<I, S>(names: I) -> BoardResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(BoardError::InvalidConfig("board needs at least one column".to_string()));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(BoardError::InvalidConfig(format!("duplicate column {}", name)));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Destination of a move from `from`, clamped to the board.
    /// `None` when the clamp leaves the card where it is.
    pub fn target_index(&self, from: usize, direction: Direction) -> Option<usize> {
        let last = self.names.len().saturating_sub(1);
        let target = match direction {
            Direction::Left => from.saturating_sub(1),
            Direction::Right => (from + 1).min(last),
        };
        (target != from).then_some(target)
    }

    /// Move triggers shown for a card in column `index`
    pub fn move_triggers(&self, index: usize) -> MoveTriggers {
        MoveTriggers {
            left: index > 0,
            right: index + 1 < self.names.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(["todo", "inprogress", "done"]).unwrap()
    }

    #[test]
    fn test_move_trigger_table() {
        let reg = registry();
        assert_eq!(reg.move_triggers(0), MoveTriggers { left: false, right: true });
        assert_eq!(reg.move_triggers(1), MoveTriggers { left: true, right: true });
        assert_eq!(reg.move_triggers(2), MoveTriggers { left: true, right: false });
    }

    #[test]
    fn test_target_index_clamps() {
        let reg = registry();
        assert_eq!(reg.target_index(0, Direction::Left), None);
        assert_eq!(reg.target_index(0, Direction::Right), Some(1));
        assert_eq!(reg.target_index(1, Direction::Left), Some(0));
        assert_eq!(reg.target_index(1, Direction::Right), Some(2));
        assert_eq!(reg.target_index(2, Direction::Right), None);
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.index_of("done"), Some(2));
        assert_eq!(reg.index_of("backlog"), None);
        assert_eq!(reg.names()[1], "inprogress");
    }

    #[test]
    fn test_single_column_has_no_moves() {
        let reg = ColumnRegistry::new(["only"]).unwrap();
        assert_eq!(reg.move_triggers(0), MoveTriggers::default());
        assert_eq!(reg.target_index(0, Direction::Right), None);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        assert!(ColumnRegistry::new(Vec::<String>::new()).is_err());
        assert!(ColumnRegistry::new(["a", "b", "a"]).is_err());
    }
}
