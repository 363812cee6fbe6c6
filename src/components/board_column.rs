//! Board Column Component
//!
//! Column header with add/paint triggers and the card counter, over a
//! drop surface listing the column's cards.

use kanban_core::{CardId, ColumnState, UserAction};
use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragover, make_on_drop};

use crate::components::CardView;
use crate::context::use_app_context;
use crate::store::column_title;

#[component]
pub fn BoardColumn(name: String) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;
    let list_ref = NodeRef::<html::Div>::new();
    let title = column_title(&name);

    let count = {
        let name = name.clone();
        move || board.with(|b| b.count(&name).unwrap_or(0))
    };
    let card_ids = {
        let name = name.clone();
        move || {
            board.with(|b| b.column(&name).map(ColumnState::card_ids).unwrap_or_default())
        }
    };

    let on_add = {
        let name = name.clone();
        move |_| ctx.dispatch(UserAction::Add { column: name.clone() })
    };
    let on_paint = {
        let name = name.clone();
        move |_| ctx.dispatch(UserAction::Paint { column: name.clone() })
    };

    let on_dragover = make_on_dragover(
        ctx.dnd,
        name.clone(),
        list_ref,
        ".card",
        "data-card-id",
        move |column, pointer_y, items| ctx.drag_over(column, pointer_y, items),
    );
    let on_drop = make_on_drop(ctx.dnd, move |key| {
        log::debug!("dropped {}", key);
        ctx.end_drag();
    });

    let is_drop_target = {
        let name = name.clone();
        move || ctx.dnd.over_surface_read.get().as_deref() == Some(name.as_str())
    };
    let column_class = move || if is_drop_target() { "column drop-target" } else { "column" };

    view! {
        <section class=column_class data-col=name.clone()>
            <header class="column__header">
                <h2 class="column__title">{title}</h2>
                <span class="column__count">{count}</span>
                <button class="column__btn" title="Add card" on:click=on_add>"+"</button>
                <button class="column__btn" title="Paint column" on:click=on_paint>"🎨"</button>
            </header>
            <div
                class="column__cards"
                node_ref=list_ref
                on:dragover=on_dragover
                on:drop=on_drop
            >
                <For
                    each=card_ids
                    key=|id: &CardId| id.clone()
                    children=move |id: CardId| view! { <CardView id=id /> }
                />
            </div>
        </section>
    }
}
