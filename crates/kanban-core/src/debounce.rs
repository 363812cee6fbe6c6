//! Edit Coalescer
//!
//! Content edits are persisted once per burst of input: each edit replaces
//! the pending flush, and only the latest ticket may fire.

use std::time::Duration;

/// Handle for a scheduled flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushTicket {
    generation: u64,
    /// Earliest time (ms) the flush should run
    pub due_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct EditCoalescer {
    window: Duration,
    generation: u64,
    pending: Option<FlushTicket>,
}

impl EditCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register an edit at `now_ms`, superseding any pending flush
    pub fn record(&mut self, now_ms: u64) -> FlushTicket {
        self.generation += 1;
        let ticket = FlushTicket {
            generation: self.generation,
            due_at_ms: now_ms.saturating_add(self.window.as_millis() as u64),
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Consume `ticket` if it is still the pending one
    pub fn fire(&mut self, ticket: FlushTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Consume the pending flush if its window has elapsed
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.pending {
            Some(ticket) if now_ms >= ticket.due_at_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending flush; returns whether one was pending
    pub fn clear(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
