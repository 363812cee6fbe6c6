//! UI Components
//!
//! Board column and card views.

mod board_column;
mod card_view;

pub use board_column::BoardColumn;
pub use card_view::CardView;
