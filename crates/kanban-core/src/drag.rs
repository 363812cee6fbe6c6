//! Drag Reorder Engine
//!
//! Insertion point for a dragged card from the pointer position and the
//! measured boxes of its prospective siblings.

use crate::model::{CardId, CardUnit, ColumnState};

/// Measured vertical extent of a card on the drop surface
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingBox {
    pub id: CardId,
    pub top: f64,
    pub height: f64,
}

impl SiblingBox {
    pub fn new(id: CardId, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Card the dragged card goes in front of: the sibling whose midpoint is
/// below the pointer and nearest to it. `None` means append at the end.
/// The dragged card itself never counts as a sibling.
pub fn insertion_anchor<'a>(
    siblings: &'a [SiblingBox],
    dragged: &CardId,
    pointer_y: f64,
) -> Option<&'a CardId> {
    let mut closest: Option<(f64, &CardId)> = None;
    for sibling in siblings.iter().filter(|s| &s.id != dragged) {
        let offset = pointer_y - sibling.midpoint();
        if offset < 0.0 && closest.map_or(true, |(best, _)| offset > best) {
            closest = Some((offset, &sibling.id));
        }
    }
    closest.map(|(_, id)| id)
}

/// An in-progress drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card: CardId,
    /// Card order of every column when the gesture started
    origin: Vec<Vec<CardId>>,
    /// Whether any speculative move happened
    pub moved: bool,
}

impl DragSession {
    pub fn start(card: CardId, columns: &[ColumnState]) -> Self {
        Self {
            card,
            origin: columns.iter().map(ColumnState::card_ids).collect(),
            moved: false,
        }
    }

    /// Put every card back where it was when the gesture started.
    /// Cards that appeared since then stay at the head of their column.
    pub fn restore(&self, columns: &mut [ColumnState]) {
        let mut units: Vec<(usize, CardUnit)> = Vec::new();
        for (index, column) in columns.iter_mut().enumerate() {
            units.extend(column.cards.drain(..).map(|card| (index, card)));
        }

        for (index, ids) in self.origin.iter().enumerate() {
            let Some(column) = columns.get_mut(index) else { continue };
            for id in ids {
                if let Some(pos) = units.iter().position(|(_, card)| &card.id == id) {
                    column.cards.push(units.remove(pos).1);
                }
            }
        }

        for (index, card) in units.into_iter().rev() {
            if let Some(column) = columns.get_mut(index) {
                column.cards.insert(0, card);
            }
        }
    }
}
