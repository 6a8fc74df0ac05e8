use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::day_record::DayRecord;
use crate::model::keys::DayKey;

/// Cached month figures, all in whole currency units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub total: f64,
    pub premium: f64,
    pub per_person: f64,
}

impl MonthStats {
    /// `total` and `premium` are rounded first; the share is taken from the
    /// rounded figures and rounded again.
    pub fn compute(raw_total: f64, coefficient: f64, person_count: u32) -> Self {
        let total = round_currency(raw_total);
        let premium = round_currency(raw_total * coefficient);
        let persons = f64::from(person_count.max(1));
        Self {
            total,
            premium,
            per_person: round_currency((total + premium) / persons),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total.is_finite() && self.premium.is_finite() && self.per_person.is_finite()
    }
}

/// Half-up rounding to a whole unit. Amounts here are never negative, so
/// `f64::round` (half away from zero) is the same thing.
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub days: BTreeMap<DayKey, DayRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated: Option<MonthStats>,
}

impl MonthRecord {
    pub fn days_total(&self) -> f64 {
        self.days.values().map(|d| d.daily_total).sum()
    }

    /// The cache is stale when missing or when it no longer matches the
    /// (rounded) sum of the stored days.
    pub fn is_stale(&self) -> bool {
        match &self.calculated {
            Some(stats) => round_currency(self.days_total()) != stats.total,
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// JSON has no representation for infinities, so these must hold before
    /// the record can be stored.
    pub fn is_finite(&self) -> bool {
        self.days.values().all(DayRecord::is_finite)
            && self.calculated.as_ref().map_or(true, MonthStats::is_finite)
    }
}
