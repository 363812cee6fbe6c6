//! Application Context
//!
//! Board store and drag state provided via Leptos Context API. All
//! mutations go through here; failures are logged and dropped.

use gloo_timers::callback::Timeout;
use kanban_core::{ActionOutcome, CardId, FlushTicket, SiblingBox, UserAction};
use leptos::prelude::*;
use leptos_dragdrop::{DndSignals, MeasuredItem};

use crate::store::BoardStore;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub board: BoardStore,
    pub dnd: DndSignals,
}

impl AppContext {
    pub fn new(board: BoardStore, dnd: DndSignals) -> Self {
        Self { board, dnd }
    }

    /// Apply a user action to the board
    pub fn dispatch(&self, action: UserAction) {
        match self.board.try_update(|board| board.dispatch(action)) {
            Some(Ok(ActionOutcome::Deferred(ticket))) => self.schedule_flush(ticket),
            Some(Ok(_)) => {}
            Some(Err(e)) => log::error!("action failed: {}", e),
            None => log::warn!("board disposed, action dropped"),
        }
    }

    /// Content edit. The editable region already shows the text, so views
    /// are not notified.
    pub fn edit_content(&self, card: CardId, text: String) {
        let now_ms = js_sys::Date::now() as u64;
        let result = self
            .board
            .try_update_untracked(|board| board.edit_content(&card, text, now_ms));
        match result {
            Some(Ok(ticket)) => self.schedule_flush(ticket),
            Some(Err(e)) => log::error!("edit failed: {}", e),
            None => {}
        }
    }

    fn schedule_flush(&self, ticket: FlushTicket) {
        let board = self.board;
        let wait_ms = board.with_untracked(|b| b.edit_window().as_millis()) as u32;
        Timeout::new(wait_ms, move || {
            board.try_update_untracked(|b| b.flush_edit(ticket));
        })
        .forget();
    }

    // ========================
    // Drag gestures
    // ========================

    pub fn begin_drag(&self, card: CardId) {
        if let Some(Err(e)) = self.board.try_update(|board| board.begin_drag(&card)) {
            log::error!("drag start failed: {}", e);
        }
    }

    /// Speculative placement; views are only notified when the card moved
    pub fn drag_over(&self, column: &str, pointer_y: f64, items: Vec<MeasuredItem>) {
        let siblings: Vec<SiblingBox> = items
            .into_iter()
            .map(|item| SiblingBox::new(CardId::new(item.key), item.top, item.height))
            .collect();
        self.board.maybe_update(|board| match board.drag_over(column, pointer_y, &siblings) {
            Ok(moved) => moved,
            Err(e) => {
                log::warn!("drag over {} ignored: {}", column, e);
                false
            }
        });
    }

    pub fn end_drag(&self) {
        self.board.update(|board| {
            board.end_drag();
        });
    }

    pub fn cancel_drag(&self) {
        self.board.update(|board| {
            board.cancel_drag();
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
