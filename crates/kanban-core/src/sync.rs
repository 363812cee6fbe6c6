//! Board Synchronizer
//!
//! Owns the board state and keeps its three views in step: the card units
//! the UI renders, the derived affordances and counters, and the snapshot
//! in the store. Every mutation settles in the same order: structural change,
//! move triggers, counters, persist.
//!
//! An open drag gesture is reverted before any other mutation, so the store
//! never sees a speculative position.

use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;

use crate::action::{ActionOutcome, UserAction};
use crate::codec::{self, BoardSnapshot};
use crate::columns::{ColumnRegistry, Direction};
use crate::config::BoardConfig;
use crate::debounce::{EditCoalescer, FlushTicket};
use crate::drag::{self, DragSession, SiblingBox};
use crate::error::{BoardError, BoardResult};
use crate::factory::{random_color, CardFactory, CardTemplate};
use crate::model::{CardId, CardUnit, ColumnState};
use crate::store::{KeyValueStore, StoreAdapter};

pub struct BoardSynchronizer<S> {
    config: BoardConfig,
    registry: ColumnRegistry,
    factory: CardFactory,
    columns: Vec<ColumnState>,
    store: StoreAdapter<S>,
    rng: StdRng,
    /// In-memory floor for the next id, in case counter writes are lost
    next_id: u64,
    drag: Option<DragSession>,
    edits: EditCoalescer,
}

impl<S: KeyValueStore> BoardSynchronizer<S> {
    /// Build the board from whatever the store holds
    pub fn load(config: BoardConfig, store: S, rng: StdRng) -> BoardResult<Self> {
        Self::with_template(config, store, rng, CardTemplate::default())
    }

    pub fn with_template(
        config: BoardConfig,
        store: S,
        rng: StdRng,
        template: CardTemplate,
    ) -> BoardResult<Self> {
        let registry = ColumnRegistry::new(config.columns.iter().cloned())?;
        let factory = CardFactory::new(config.placeholder.clone(), template);
        let columns = registry.names().iter().map(ColumnState::new).collect();
        let edits = EditCoalescer::new(config.edit_debounce());

        let mut sync = Self {
            config,
            registry,
            factory,
            columns,
            store: StoreAdapter::new(store),
            rng,
            next_id: 1,
            drag: None,
            edits,
        };
        sync.rebuild_from_store();
        sync.refresh_affordances();
        sync.refresh_counts();
        Ok(sync)
    }

    fn rebuild_from_store(&mut self) {
        let Some(raw) = self.store.get_opt(&self.config.board_key) else {
            log::debug!("no saved board under {}", self.config.board_key);
            return;
        };
        let snapshot = codec::decode(&raw);

        for name in snapshot.columns.keys() {
            if self.registry.index_of(name).is_none() {
                log::warn!("saved board has unknown column {}, ignoring it", name);
            }
        }

        let mut seen = HashSet::new();
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.cards.clear();
            for record in snapshot.cards(&column.name) {
                if !seen.insert(record.id.clone()) {
                    log::warn!("saved board repeats card {}, keeping the first", record.id);
                    continue;
                }
                let unit = self.factory.create(record.clone(), index, &self.registry, &mut self.rng);
                column.cards.push(unit);
            }
        }

        let highest = seen.iter().filter_map(CardId::sequence_number).max().unwrap_or(0);
        self.next_id = successor(highest);
        log::debug!("loaded {} cards", seen.len());
    }

    // ========================
    // Dispatch
    // ========================

    pub fn dispatch(&mut self, action: UserAction) -> BoardResult<ActionOutcome> {
        match action {
            UserAction::Add { column } => self.add(&column).map(|_| ActionOutcome::Persisted),
            UserAction::Paint { column } => self.paint_column(&column).map(|_| ActionOutcome::Persisted),
            UserAction::Delete { card } => self.delete(&card).map(|_| ActionOutcome::Persisted),
            UserAction::Move { card, direction } => Ok(if self.move_card(&card, direction)? {
                ActionOutcome::Persisted
            } else {
                ActionOutcome::Unchanged
            }),
            UserAction::RecolorCard { card } => self.recolor_card(&card).map(|_| ActionOutcome::Persisted),
            UserAction::EditContent { card, text, now_ms } => {
                self.edit_content(&card, text, now_ms).map(ActionOutcome::Deferred)
            }
            UserAction::ReorderDrag { card, column, index } => {
                self.reorder(&card, &column, index).map(|_| ActionOutcome::Persisted)
            }
        }
    }

    // ========================
    // Mutations
    // ========================

    pub fn add(&mut self, column: &str) -> BoardResult<CardId> {
        self.close_drag();
        let index = self.column_index(column)?;
        let id = self.allocate_id();
        let unit = self.factory.blank(id.clone(), index, &self.registry, &mut self.rng);
        self.columns[index].cards.insert(0, unit);
        log::debug!("added {} to {}", id, column);
        self.settle();
        Ok(id)
    }

    pub fn delete(&mut self, card: &CardId) -> BoardResult<()> {
        self.close_drag();
        let (col, pos) = self.locate(card)?;
        self.columns[col].cards.remove(pos);
        log::debug!("deleted {}", card);
        self.settle();
        Ok(())
    }

    /// Fresh color for one card; returns the color
    pub fn recolor_card(&mut self, card: &CardId) -> BoardResult<String> {
        self.close_drag();
        let (col, pos) = self.locate(card)?;
        let color = random_color(&mut self.rng);
        self.columns[col].cards[pos].color = color.clone();
        self.settle();
        Ok(color)
    }

    /// One fresh color applied to every card of the column; returns the color
    pub fn paint_column(&mut self, column: &str) -> BoardResult<String> {
        self.close_drag();
        let index = self.column_index(column)?;
        let color = random_color(&mut self.rng);
        for card in &mut self.columns[index].cards {
            card.color = color.clone();
        }
        log::debug!("painted {} {}", column, color);
        self.settle();
        Ok(color)
    }

    /// Move a card to the head of the neighbouring column.
    /// Returns `false` (and writes nothing) at the board edge.
    pub fn move_card(&mut self, card: &CardId, direction: Direction) -> BoardResult<bool> {
        self.close_drag();
        let (col, pos) = self.locate(card)?;
        let Some(target) = self.registry.target_index(col, direction) else {
            return Ok(false);
        };
        let unit = self.columns[col].cards.remove(pos);
        self.columns[target].cards.insert(0, unit);
        log::debug!("moved {} {} to {}", card, direction.as_str(), self.columns[target].name);
        self.settle();
        Ok(true)
    }

    /// Update content in place; the write is deferred to the returned ticket
    pub fn edit_content(&mut self, card: &CardId, text: String, now_ms: u64) -> BoardResult<FlushTicket> {
        self.close_drag();
        let (col, pos) = self.locate(card)?;
        self.columns[col].cards[pos].content = text;
        Ok(self.edits.record(now_ms))
    }

    /// Persist if `ticket` is still the latest edit; stale tickets are no-ops.
    /// During a drag the edit stays pending and is written when the gesture ends.
    pub fn flush_edit(&mut self, ticket: FlushTicket) -> bool {
        if self.drag.is_some() {
            return false;
        }
        if self.edits.fire(ticket) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Persist a pending edit whose window has elapsed at `now_ms`
    pub fn poll_edits(&mut self, now_ms: u64) -> bool {
        if self.drag.is_some() {
            return false;
        }
        if self.edits.poll(now_ms) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Place a card at `index` of `column` (clamped to the column length)
    pub fn reorder(&mut self, card: &CardId, column: &str, index: usize) -> BoardResult<()> {
        self.close_drag();
        let target = self.column_index(column)?;
        let (col, pos) = self.locate(card)?;
        let unit = self.columns[col].cards.remove(pos);
        let cards = &mut self.columns[target].cards;
        let index = index.min(cards.len());
        cards.insert(index, unit);
        self.settle();
        Ok(())
    }

    // ========================
    // Drag gestures
    // ========================

    /// Start a gesture. A gesture still open from before was never dropped,
    /// so it is reverted first.
    pub fn begin_drag(&mut self, card: &CardId) -> BoardResult<()> {
        self.locate(card)?;
        if self.drag.is_some() {
            self.cancel_drag();
        }
        self.drag = Some(DragSession::start(card.clone(), &self.columns));
        Ok(())
    }

    /// Speculatively place the dragged card under the pointer. Visual only:
    /// nothing is written until the gesture ends. Returns whether it moved.
    pub fn drag_over(&mut self, column: &str, pointer_y: f64, siblings: &[SiblingBox]) -> BoardResult<bool> {
        let Some(dragged) = self.drag.as_ref().map(|d| d.card.clone()) else {
            return Ok(false);
        };
        let target = self.column_index(column)?;
        let anchor = drag::insertion_anchor(siblings, &dragged, pointer_y).cloned();
        let (col, pos) = self.locate(&dragged)?;

        let unit = self.columns[col].cards.remove(pos);
        let cards = &mut self.columns[target].cards;
        let index = anchor
            .and_then(|id| cards.iter().position(|c| c.id == id))
            .unwrap_or(cards.len());
        cards.insert(index, unit);

        let moved = (col, pos) != (target, index);
        if moved {
            if let Some(session) = self.drag.as_mut() {
                session.moved = true;
            }
        }
        Ok(moved)
    }

    /// Commit the last speculative position. Returns `false` with no drag active.
    pub fn end_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        log::debug!("drag of {} ended (moved: {})", session.card, session.moved);
        self.settle();
        true
    }

    fn close_drag(&mut self) {
        if self.cancel_drag() {
            log::warn!("drag gesture still open at the next mutation, reverted");
        }
    }

    /// Abandon the gesture and restore the pre-drag order. Nothing is written
    /// unless a content edit was held back by the gesture.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        session.restore(&mut self.columns);
        log::debug!("drag of {} cancelled", session.card);
        self.refresh_affordances();
        self.refresh_counts();
        if self.edits.is_pending() {
            self.persist();
        }
        true
    }

    // ========================
    // Derived state
    // ========================

    /// Recompute move triggers from each card's column. Cards without
    /// move triggers are skipped.
    pub fn refresh_affordances(&mut self) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            let triggers = self.registry.move_triggers(index);
            for card in &mut column.cards {
                if let Some(current) = card.move_triggers.as_mut() {
                    *current = triggers;
                }
            }
        }
    }

    pub fn refresh_counts(&mut self) {
        for column in &mut self.columns {
            column.count = column.cards.len();
        }
    }

    /// Write the full board snapshot. Also satisfies any pending edit flush.
    pub fn persist(&mut self) {
        let snapshot = codec::capture(&self.columns);
        match codec::encode(&snapshot) {
            Ok(raw) => self.store.set(&self.config.board_key, &raw),
            Err(e) => log::error!("could not encode board: {}", e),
        }
        self.edits.clear();
    }

    fn settle(&mut self) {
        self.refresh_affordances();
        self.refresh_counts();
        self.persist();
    }

    fn allocate_id(&mut self) -> CardId {
        let stored = self
            .store
            .get(&self.config.counter_key, "1")
            .trim()
            .parse::<u64>()
            .unwrap_or(1)
            .max(1);
        let mut n = stored.max(self.next_id);
        while self.locate(&CardId::from_sequence(n)).is_ok() {
            n = successor(n);
        }
        self.next_id = successor(n);
        self.store.set(&self.config.counter_key, &self.next_id.to_string());
        CardId::from_sequence(n)
    }

    // ========================
    // Read model
    // ========================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn columns(&self) -> &[ColumnState] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnState> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn count(&self, column: &str) -> Option<usize> {
        self.column(column).map(|c| c.count)
    }

    pub fn card(&self, id: &CardId) -> Option<&CardUnit> {
        self.columns.iter().flat_map(|c| c.cards.iter()).find(|c| &c.id == id)
    }

    pub fn column_of(&self, id: &CardId) -> Option<&str> {
        self.locate(id).ok().map(|(col, _)| self.columns[col].name.as_str())
    }

    pub fn dragging(&self) -> Option<&CardId> {
        self.drag.as_ref().map(|d| &d.card)
    }

    pub fn is_dragging(&self, id: &CardId) -> bool {
        self.dragging() == Some(id)
    }

    pub fn has_pending_edit(&self) -> bool {
        self.edits.is_pending()
    }

    /// Quiet period before a content edit is written
    pub fn edit_window(&self) -> Duration {
        self.edits.window()
    }

    /// Current board in snapshot form (not necessarily persisted yet)
    pub fn snapshot(&self) -> BoardSnapshot {
        codec::capture(&self.columns)
    }

    /// Snapshot currently in the store, decoded
    pub fn persisted(&self) -> Option<BoardSnapshot> {
        self.store.get_opt(&self.config.board_key).map(|raw| codec::decode(&raw))
    }

    pub fn store(&self) -> &StoreAdapter<S> {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    fn column_index(&self, name: &str) -> BoardResult<usize> {
        self.registry
            .index_of(name)
            .ok_or_else(|| BoardError::UnknownColumn(name.to_string()))
    }

    fn locate(&self, id: &CardId) -> BoardResult<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(col, column)| column.position(id).map(|pos| (col, pos)))
            .ok_or_else(|| BoardError::UnknownCard(id.clone()))
    }
}

/// Next id sequence number. The sequence restarts at 1 once exhausted; the
/// collision check in `allocate_id` keeps ids unique on the board.
fn successor(n: u64) -> u64 {
    n.checked_add(1).unwrap_or_else(|| {
        log::warn!("card id sequence exhausted at {}, restarting at 1", n);
        1
    })
}
