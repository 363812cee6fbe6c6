//! Kanban Board App
//!
//! Main application component: one column per registered column name.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_dragend, create_dnd_signals};

use crate::components::BoardColumn;
use crate::context::AppContext;
use crate::store::create_board_store;

#[component]
pub fn App() -> impl IntoView {
    let board = match create_board_store() {
        Ok(board) => board,
        Err(e) => {
            log::error!("board initialization failed: {}", e);
            return view! { <p class="board-error">"The board could not be loaded."</p> }.into_any();
        }
    };

    let dnd = create_dnd_signals();
    let ctx = AppContext::new(board, dnd);
    provide_context(ctx);

    // Gestures that end without a drop put the cards back
    bind_global_dragend(dnd, move |key| {
        log::debug!("drag of {} abandoned", key);
        ctx.cancel_drag();
    });

    let columns = board.with_untracked(|b| b.registry().names().to_vec());
    log::info!("board ready with {} columns", columns.len());

    view! {
        <main class="board">
            {columns
                .into_iter()
                .map(|name| view! { <BoardColumn name=name /> })
                .collect_view()}
        </main>
    }
    .into_any()
}
