//! Card Factory
//!
//! Builds card units from records: id, color, content and the move
//! triggers for the card's column.

use std::ops::Range;

use rand::Rng;

use crate::columns::ColumnRegistry;
use crate::model::{CardId, CardRecord, CardUnit};

pub const HUE_RANGE: Range<u16> = 0..360;
pub const SATURATION_RANGE: Range<u16> = 70..90;
/// Light enough for dark text to stay readable
pub const LIGHTNESS_RANGE: Range<u16> = 85..93;

/// Random pastel background, e.g. `hsl(212 74% 88%)`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let h = rng.gen_range(HUE_RANGE);
    let s = rng.gen_range(SATURATION_RANGE);
    let l = rng.gen_range(LIGHTNESS_RANGE);
    format!("hsl({} {}% {}%)", h, s, l)
}

/// Which affordances the card markup carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTemplate {
    pub move_triggers: bool,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self { move_triggers: true }
    }
}

#[derive(Debug, Clone)]
pub struct CardFactory {
    placeholder: String,
    template: CardTemplate,
}

impl CardFactory {
    pub fn new(placeholder: impl Into<String>, template: CardTemplate) -> Self {
        Self {
            placeholder: placeholder.into(),
            template,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Build a unit for a card living in column `column_index`
    pub fn create<R: Rng + ?Sized>(
        &self,
        record: CardRecord,
        column_index: usize,
        registry: &ColumnRegistry,
        rng: &mut R,
    ) -> CardUnit {
        let color = match record.color {
            Some(color) if !color.trim().is_empty() => color,
            _ => random_color(rng),
        };
        let content = if record.content.is_empty() {
            self.placeholder.clone()
        } else {
            record.content
        };
        CardUnit {
            id: record.id,
            content,
            color,
            move_triggers: self
                .template
                .move_triggers
                .then(|| registry.move_triggers(column_index)),
        }
    }

    /// Fresh card: placeholder content and a new color
    pub fn blank<R: Rng + ?Sized>(
        &self,
        id: CardId,
        column_index: usize,
        registry: &ColumnRegistry,
        rng: &mut R,
    ) -> CardUnit {
        let record = CardRecord {
            id,
            content: String::new(),
            color: None,
        };
        self.create(record, column_index, registry, rng)
    }
}
