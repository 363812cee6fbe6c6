//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for Leptos lists.
//! Tracks the dragged key, measures the items of the hovered drop surface,
//! and tells a committed drop apart from an abandoned gesture.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Vertical box of a list item on a drop surface
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredItem {
    pub key: String,
    pub top: f64,
    pub height: f64,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_key_read: ReadSignal<Option<String>>,
    pub dragging_key_write: WriteSignal<Option<String>>,
    /// Drop surface the drag is currently over
    pub over_surface_read: ReadSignal<Option<String>>,
    pub over_surface_write: WriteSignal<Option<String>>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_key_read, dragging_key_write) = signal(None::<String>);
    let (over_surface_read, over_surface_write) = signal(None::<String>);
    DndSignals {
        dragging_key_read,
        dragging_key_write,
        over_surface_read,
        over_surface_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_key_write.set(None);
    dnd.over_surface_write.set(None);
}

/// Measure every element matching `item_selector` inside `container`.
/// Elements without `key_attr` are skipped.
pub fn measure_items(container: &web_sys::Element, item_selector: &str, key_attr: &str) -> Vec<MeasuredItem> {
    let Ok(nodes) = container.query_selector_all(item_selector) else {
        return Vec::new();
    };
    let mut items = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let Some(key) = el.get_attribute(key_attr) else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        items.push(MeasuredItem {
            key,
            top: rect.top(),
            height: rect.height(),
        });
    }
    items
}

/// Create dragstart handler for a draggable item
pub fn make_on_dragstart<F>(dnd: DndSignals, key: String, on_start: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(String) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            // Firefox will not start a drag without data
            let _ = dt.set_data("text/plain", &key);
        }
        dnd.dragging_key_write.set(Some(key.clone()));
        on_start(key.clone());
    }
}

/// Create dragover handler for a drop surface.
/// Marks the surface as a valid target and reports the pointer position
/// with the measured items of the surface.
pub fn make_on_dragover<F>(
    dnd: DndSignals,
    surface: String,
    container: NodeRef<html::Div>,
    item_selector: &'static str,
    key_attr: &'static str,
    on_over: F,
) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(&str, f64, Vec<MeasuredItem>) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if dnd.dragging_key_read.get_untracked().is_none() {
            return;
        }
        if dnd.over_surface_read.get_untracked().as_deref() != Some(surface.as_str()) {
            dnd.over_surface_write.set(Some(surface.clone()));
        }
        let Some(el) = container.get_untracked() else {
            return;
        };
        let items = measure_items(&el, item_selector, key_attr);
        on_over(&surface, ev.client_y() as f64, items);
    }
}

/// Create drop handler for a drop surface; commits the gesture
pub fn make_on_drop<F>(dnd: DndSignals, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(String) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(key) = dnd.dragging_key_read.get_untracked() {
            end_drag(&dnd);
            on_drop(key);
        }
    }
}

fn abandon_drag(dnd: &DndSignals, on_abandon: &impl Fn(String)) {
    if let Some(key) = dnd.dragging_key_read.get_untracked() {
        end_drag(dnd);
        on_abandon(key);
    }
}

/// Create dragend handler for the dragged element itself. Fires `on_abandon`
/// when the gesture ended without a drop; after a drop it does nothing.
pub fn make_on_dragend<F>(dnd: DndSignals, on_abandon: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(String) + Clone + 'static,
{
    move |_ev: web_sys::DragEvent| abandon_drag(&dnd, &on_abandon)
}

/// Bind global dragend handler. Catches gestures whose source element was
/// detached before the drag ended, so its own dragend never fired.
pub fn bind_global_dragend<F>(dnd: DndSignals, on_abandon: F)
where
    F: Fn(String) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_dragend = Closure::<dyn FnMut(web_sys::DragEvent)>::new(move |_ev: web_sys::DragEvent| {
        abandon_drag(&dnd, &on_abandon)
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("dragend", on_dragend.as_ref().unchecked_ref());
        }
    }
    on_dragend.forget();
}
