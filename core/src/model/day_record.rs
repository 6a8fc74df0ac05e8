use serde::{Deserialize, Serialize};

use crate::model::position::Position;

/// One `(positionId, quantity)` pair as typed on the day-editing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryInput {
    pub position_id: u32,
    pub quantity: f64,
}

impl EntryInput {
    pub fn new(position_id: u32, quantity: f64) -> Self {
        Self { position_id, quantity }
    }
}

/// A saved line. Name and price are copied from the catalog at save time,
/// so later catalog edits never change historical totals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineEntry {
    pub position_id: u32,
    pub position_name: String,
    #[serde(alias = "price")]
    pub unit_price: f64,
    pub quantity: f64,
    #[serde(alias = "sum")]
    pub line_total: f64,
}

impl LineEntry {
    pub fn snapshot(position: &Position, quantity: f64) -> Self {
        Self {
            position_id: position.id,
            position_name: position.name.clone(),
            unit_price: position.unit_price,
            quantity,
            line_total: position.unit_price * quantity,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub entries: Vec<LineEntry>,
    pub daily_total: f64,
}

impl DayRecord {
    /// Returns `None` when nothing survives, since an empty day is never stored.
    pub fn from_entries(entries: Vec<LineEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let daily_total = entries.iter().map(|e| e.line_total).sum();
        Some(Self { entries, daily_total })
    }

    pub fn is_filled(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.daily_total.is_finite()
            && self
                .entries
                .iter()
                .all(|e| e.unit_price.is_finite() && e.quantity.is_finite() && e.line_total.is_finite())
    }
}

/// Resolves raw inputs against the catalog.
///
/// Pairs pointing at unknown positions, with a quantity that is not a
/// positive finite number, or whose line total overflows are dropped
/// without error.
pub fn resolve_entries(positions: &[Position], inputs: &[EntryInput]) -> Vec<LineEntry> {
    inputs
        .iter()
        .filter(|input| input.quantity.is_finite() && input.quantity > 0.0)
        .filter_map(|input| {
            positions
                .iter()
                .find(|p| p.id == input.position_id)
                .map(|p| LineEntry::snapshot(p, input.quantity))
        })
        .filter(|entry| entry.line_total.is_finite())
        .collect()
}
