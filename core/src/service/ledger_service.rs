use crate::model::day_record::{resolve_entries, DayRecord, EntryInput, LineEntry};
use crate::model::keys::DayKey;
use crate::model::month_record::MonthStats;
use crate::repository::DocumentStore;
use crate::service::coefficient_service::effective_coefficient;
use crate::service::dto::Notice;
use crate::store::WorkStore;

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    /// Replaces the day's entries wholesale.
    ///
    /// Unknown positions and non-positive quantities are dropped. When nothing
    /// is left the day is removed, and its month too if it was the last day.
    /// The owning month is always recomputed and the graph persisted.
    /// Returns the stored record, if any.
    pub fn set_day_entries(&mut self, day: DayKey, inputs: &[EntryInput]) -> Option<DayRecord> {
        let month = day.month_key();
        let entries = resolve_entries(&self.data.positions, inputs);
        let dropped = inputs.len() - entries.len();
        if dropped > 0 {
            tracing::debug!("Dropped {} unusable entries for {}", dropped, day);
        }

        let candidate = DayRecord::from_entries(entries);
        if let Some(record) = &candidate {
            if !self.fits_month(day, record) {
                tracing::warn!("Rejected entries for {}: amounts overflow", day);
                self.notify(Notice::error(format!("Amounts for {} are too large to store", day)));
                return None;
            }
        }

        let stored = match candidate {
            Some(record) => {
                let record_total = record.daily_total;
                self.data
                    .months
                    .entry(month)
                    .or_default()
                    .days
                    .insert(day, record.clone());
                self.notify(Notice::info(format!("Earnings for the day: {}", record_total)));
                Some(record)
            }
            None => {
                let removed = self.remove_day(day);
                if removed {
                    self.notify(Notice::info("Day cleared"));
                } else {
                    self.notify(Notice::info("Nothing to save"));
                }
                None
            }
        };

        self.mark_dirty(month);
        self.recompute(month);
        stored
    }

    pub fn clear_day(&mut self, day: DayKey) {
        self.set_day_entries(day, &[]);
    }

    /// Saved entries for the day, empty when nothing is stored.
    pub fn get_day_entries(&self, day: DayKey) -> Vec<LineEntry> {
        self.day_record(day)
            .map(|record| record.entries.clone())
            .unwrap_or_default()
    }

    pub fn day_record(&self, day: DayKey) -> Option<&DayRecord> {
        self.data
            .months
            .get(&day.month_key())
            .and_then(|m| m.days.get(&day))
    }

    /// Daily total the given inputs would produce, without saving anything.
    pub fn preview_day_total(&self, inputs: &[EntryInput]) -> f64 {
        resolve_entries(&self.data.positions, inputs)
            .iter()
            .map(|e| e.line_total)
            .sum()
    }

    /// True when storing `record` keeps the day and its month figures finite.
    fn fits_month(&self, day: DayKey, record: &DayRecord) -> bool {
        let month = day.month_key();
        let mut next = self.data.months.get(&month).cloned().unwrap_or_default();
        next.days.insert(day, record.clone());
        let stats = MonthStats::compute(
            next.days_total(),
            effective_coefficient(&self.data, &month),
            self.data.settings.person_count,
        );
        next.is_finite() && stats.is_finite()
    }

    fn remove_day(&mut self, day: DayKey) -> bool {
        let month = day.month_key();
        let Some(record) = self.data.months.get_mut(&month) else {
            return false;
        };
        let removed = record.days.remove(&day).is_some();
        if record.is_empty() {
            self.data.months.remove(&month);
        }
        removed
    }
}
