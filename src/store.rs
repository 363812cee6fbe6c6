//! Board Store
//!
//! The board synchronizer held in a signal, so views re-render on mutation.

use kanban_core::{BoardConfig, BoardResult, BoardSynchronizer};
use leptos::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::storage::BrowserStore;

pub type Board = BoardSynchronizer<BrowserStore>;

/// Type alias for the store
pub type BoardStore = RwSignal<Board>;

/// Load the saved board from localStorage
pub fn create_board_store() -> BoardResult<BoardStore> {
    let board = Board::load(BoardConfig::default(), BrowserStore, StdRng::from_entropy())?;
    Ok(RwSignal::new(board))
}

/// Display title for a column name
pub fn column_title(name: &str) -> String {
    match name {
        "todo" => "To do".to_string(),
        "inprogress" => "In progress".to_string(),
        "done" => "Done".to_string(),
        other => other.to_string(),
    }
}
