//! User Actions
//!
//! Everything the interaction surface can ask of the board, as one enum.

use crate::columns::Direction;
use crate::debounce::FlushTicket;
use crate::model::CardId;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// New card at the head of a column
    Add { column: String },
    /// One fresh color for every card in a column
    Paint { column: String },
    Delete { card: CardId },
    Move { card: CardId, direction: Direction },
    /// Click on a card's background
    RecolorCard { card: CardId },
    EditContent { card: CardId, text: String, now_ms: u64 },
    /// Committed drag result: explicit position in a column
    ReorderDrag { card: CardId, column: String, index: usize },
}

/// What a dispatched action did to persisted state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Board mutated and written through
    Persisted,
    /// Nothing changed, nothing written
    Unchanged,
    /// Board mutated; write waits for this flush
    Deferred(FlushTicket),
}
