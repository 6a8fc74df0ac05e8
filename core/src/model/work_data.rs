use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::keys::MonthKey;
use crate::model::month_record::MonthRecord;
use crate::model::position::Position;
use crate::model::settings::Settings;

const SEED_POSITIONS: [(&str, f64); 5] = [
    ("Bricklaying", 1500.0),
    ("Wall plastering", 800.0),
    ("Painting", 500.0),
    ("Tile laying", 1200.0),
    ("Drywall installation", 600.0),
];

/// January..December coefficients seeded for the tracked year.
const SEED_COEFFICIENTS: [f64; 12] = [
    0.15, 0.12, 0.15, 0.13, 0.15, 0.16, 0.14, 0.15, 0.13, 0.15, 0.14, 0.18,
];

/// The root document. It is always read and written as a whole.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkData {
    pub positions: Vec<Position>,
    #[serde(default)]
    pub months: BTreeMap<MonthKey, MonthRecord>,
    pub settings: Settings,
    #[serde(default)]
    pub coefficients: BTreeMap<MonthKey, f64>,
}

impl WorkData {
    /// Fresh-install contents for `tracked_year`.
    pub fn seeded(tracked_year: i32) -> Self {
        let positions = SEED_POSITIONS
            .iter()
            .zip(1u32..)
            .map(|((name, price), id)| Position {
                id,
                name: name.to_string(),
                unit_price: *price,
            })
            .collect();

        let coefficients = MonthKey::months_of_year(tracked_year)
            .unwrap_or_default()
            .into_iter()
            .zip(SEED_COEFFICIENTS)
            .collect();

        Self {
            positions,
            months: BTreeMap::new(),
            settings: Settings::default(),
            coefficients,
        }
    }

    pub fn position(&self, id: u32) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// False when any amount would not survive a JSON round trip.
    pub fn is_finite(&self) -> bool {
        self.settings.default_coefficient.is_finite()
            && self.positions.iter().all(|p| p.unit_price.is_finite())
            && self.coefficients.values().all(|c| c.is_finite())
            && self.months.values().all(MonthRecord::is_finite)
    }
}
