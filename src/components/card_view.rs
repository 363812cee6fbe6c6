//! Card Component
//!
//! A single card: editable content, delete and move triggers, click on the
//! background to recolor, draggable between and within columns.

use kanban_core::{CardId, Direction, UserAction};
use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

fn display(visible: bool) -> &'static str {
    if visible {
        "display: inline-block;"
    } else {
        "display: none;"
    }
}

#[component]
pub fn CardView(id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    // Rendered once: the editable region owns the text after mount
    let content = board.with_untracked(|b| b.card(&id).map(|c| c.content.clone()).unwrap_or_default());

    let style = {
        let id = id.clone();
        move || {
            let color = board.with(|b| b.card(&id).map(|c| c.color.clone()).unwrap_or_default());
            format!("background: {};", color)
        }
    };
    let triggers = {
        let id = id.clone();
        move || board.with(|b| b.card(&id).and_then(|c| c.move_triggers))
    };
    let card_class = {
        let id = id.clone();
        move || if board.with(|b| b.is_dragging(&id)) { "card dragging" } else { "card" }
    };
    let left_style = {
        let triggers = triggers.clone();
        move || display(triggers().is_some_and(|t| t.left))
    };
    let right_style = move || display(triggers().is_some_and(|t| t.right));

    let on_click = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                let on_content = target.closest("[data-role=\"content\"]").ok().flatten().is_some();
                let on_button = target.closest("button").ok().flatten().is_some();
                if on_content || on_button {
                    return;
                }
            }
            ctx.dispatch(UserAction::RecolorCard { card: id.clone() });
        }
    };
    let edit_id = id.clone();
    let on_delete = {
        let id = id.clone();
        move |_| ctx.dispatch(UserAction::Delete { card: id.clone() })
    };
    let on_left = {
        let id = id.clone();
        move |_| ctx.dispatch(UserAction::Move { card: id.clone(), direction: Direction::Left })
    };
    let on_right = {
        let id = id.clone();
        move |_| ctx.dispatch(UserAction::Move { card: id.clone(), direction: Direction::Right })
    };
    let on_dragstart = make_on_dragstart(ctx.dnd, id.to_string(), move |key| {
        ctx.begin_drag(CardId::new(key));
    });
    let on_dragend = make_on_dragend(ctx.dnd, move |key| {
        log::debug!("drag of {} ended without a drop", key);
        ctx.cancel_drag();
    });

    view! {
        <article
            class=card_class
            style=style
            draggable="true"
            data-card-id=id.to_string()
            on:click=on_click
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            <div
                class="card__content"
                data-role="content"
                contenteditable="true"
                on:input=move |ev| {
                    let text = event_target::<web_sys::HtmlElement>(&ev).inner_text();
                    ctx.edit_content(edit_id.clone(), text);
                }
            >
                {content}
            </div>
            <div class="card__actions">
                <button class="card__btn" title="Move left" style=left_style on:click=on_left>"←"</button>
                <button class="card__btn" title="Move right" style=right_style on:click=on_right>"→"</button>
                <button class="card__btn card__btn--delete" title="Delete" on:click=on_delete>"×"</button>
            </div>
        </article>
    }
}
