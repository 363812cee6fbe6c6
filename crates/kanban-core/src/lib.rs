//! Kanban Board Core
//!
//! Board state synchronization for the kanban board:
//! - model: cards, card units and columns
//! - columns: column order and the move state machine
//! - codec: snapshot encode/decode
//! - store: infallible front over a key-value store
//! - factory: card construction and color generation
//! - drag: drag reorder placement
//! - debounce: content-edit coalescing
//! - sync: the synchronizer that ties it together

mod action;
mod codec;
mod columns;
mod config;
mod debounce;
mod drag;
mod error;
mod factory;
mod model;
mod store;
mod sync;

pub use action::{ActionOutcome, UserAction};
pub use codec::{capture, decode, encode, BoardSnapshot, SNAPSHOT_VERSION};
pub use columns::{ColumnRegistry, Direction};
pub use config::BoardConfig;
pub use debounce::{EditCoalescer, FlushTicket};
pub use drag::{insertion_anchor, DragSession, SiblingBox};
pub use error::{BoardError, BoardResult};
pub use factory::{random_color, CardFactory, CardTemplate};
pub use model::{CardId, CardRecord, CardUnit, ColumnState, MoveTriggers};
pub use store::{KeyValueStore, MemoryStore, StoreAdapter, StoreError};
pub use sync::BoardSynchronizer;
