//! Board Errors
//!
//! Error taxonomy for board operations. Storage failures never reach this
//! level; they are absorbed by the store adapter.

use thiserror::Error;

use crate::model::CardId;

/// Common result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-level errors
#[derive(Debug, Error)]
pub enum BoardError {
    /// No card with this id is on the board
    #[error("Card not found: {0}")]
    UnknownCard(CardId),
    /// Column name is not part of the registry
    #[error("Column not found: {0}")]
    UnknownColumn(String),
    /// Snapshot could not be produced
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// Column layout or config document is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::UnknownCard(CardId::from_sequence(7));
        assert_eq!(err.to_string(), "Card not found: c7");
        let err = BoardError::UnknownColumn("backlog".to_string());
        assert_eq!(err.to_string(), "Column not found: backlog");
    }
}
