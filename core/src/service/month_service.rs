use crate::model::keys::MonthKey;
use crate::model::month_record::{MonthRecord, MonthStats};
use crate::model::work_data::WorkData;
use crate::repository::DocumentStore;
use crate::service::coefficient_service::effective_coefficient;
use crate::service::dto::{DayCell, MonthOverview};
use crate::store::WorkStore;

/// True when the cached figures are missing or disagree with the days.
pub fn is_stale(record: &MonthRecord) -> bool {
    record.is_stale()
}

/// Rewrites the cached figures of every stored month from current settings.
pub(crate) fn refresh_all_figures(data: &mut WorkData) {
    let person_count = data.settings.person_count;
    let coefficients: Vec<(MonthKey, f64)> = data
        .months
        .keys()
        .map(|month| (*month, effective_coefficient(data, month)))
        .collect();
    for (month, coefficient) in coefficients {
        if let Some(record) = data.months.get_mut(&month) {
            record.calculated = Some(MonthStats::compute(record.days_total(), coefficient, person_count));
        }
    }
}

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    /// Recalculates the month, writes the figures back and persists.
    ///
    /// Months without days are never stored, so for those the zero figures
    /// are only returned.
    pub fn recompute(&mut self, month: MonthKey) -> MonthStats {
        let coefficient = effective_coefficient(&self.data, &month);
        let person_count = self.data.settings.person_count;

        let stats = match self.data.months.get_mut(&month) {
            Some(record) => {
                let stats = MonthStats::compute(record.days_total(), coefficient, person_count);
                record.calculated = Some(stats);
                stats
            }
            None => MonthStats::compute(0.0, coefficient, person_count),
        };

        tracing::debug!(
            "Recomputed {}: total={} premium={} per_person={}",
            month,
            stats.total,
            stats.premium,
            stats.per_person
        );
        self.dirty.remove(&month);
        self.save();
        stats
    }

    /// Cached figures for the month, recomputed first when dirty or stale.
    pub fn get_stats(&mut self, month: MonthKey) -> MonthStats {
        let cached = self
            .data
            .months
            .get(&month)
            .filter(|record| !record.is_stale())
            .and_then(|record| record.calculated);

        match cached {
            Some(stats) if !self.is_dirty(&month) => stats,
            _ => self.recompute(month),
        }
    }

    /// Header figures plus one cell per calendar day.
    pub fn month_overview(&mut self, month: MonthKey) -> MonthOverview {
        let stats = self.get_stats(month);
        let record = self.data.months.get(&month);

        let days = month
            .days()
            .into_iter()
            .map(|day| {
                let stored = record.and_then(|r| r.days.get(&day));
                DayCell {
                    day,
                    daily_total: stored.map_or(0.0, |d| d.daily_total),
                    filled: stored.is_some_and(|d| d.is_filled()),
                }
            })
            .collect();

        MonthOverview {
            month,
            coefficient: self.get_coefficient(&month),
            stats,
            days,
        }
    }

    /// Stored months, newest first.
    pub fn months(&self) -> Vec<MonthKey> {
        self.data.months.keys().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::day_record::EntryInput;
    use crate::model::keys::DayKey;
    use crate::repository::MemoryDocumentStore;
    use crate::service::persistence::PersistenceGateway;

    fn store() -> WorkStore<MemoryDocumentStore, MemoryDocumentStore> {
        WorkStore::open(PersistenceGateway::new(
            MemoryDocumentStore::new(),
            MemoryDocumentStore::new(),
            2026,
        ))
    }

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_reference_month() {
        let mut store = store();
        let jan: MonthKey = "2026-01".parse().unwrap();
        store.set_day_entries(day("2026-01-12"), &[EntryInput::new(1, 3.0)]);

        let stats = store.get_stats(jan);
        assert_eq!(stats.total, 4500.0);
        assert_eq!(stats.premium, 675.0);
        assert_eq!(stats.per_person, 1294.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut store = store();
        let jan: MonthKey = "2026-01".parse().unwrap();
        store.set_day_entries(day("2026-01-05"), &[EntryInput::new(2, 1.5), EntryInput::new(4, 2.0)]);

        let first = store.recompute(jan);
        let second = store.recompute(jan);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_cache_is_refreshed_on_read() {
        let mut store = store();
        let jan: MonthKey = "2026-01".parse().unwrap();
        store.set_day_entries(day("2026-01-05"), &[EntryInput::new(1, 1.0)]);

        // Simulate a document whose cache was written by an older session.
        if let Some(record) = store.data.months.get_mut(&jan) {
            record.calculated = Some(MonthStats { total: 1.0, premium: 0.0, per_person: 0.0 });
            assert!(is_stale(record));
        }

        assert_eq!(store.get_stats(jan).total, 1500.0);
        assert!(!is_stale(&store.data().months[&jan]));
    }

    #[test]
    fn test_empty_month_is_zero_and_not_stored() {
        let mut store = store();
        let mar: MonthKey = "2026-03".parse().unwrap();
        let stats = store.get_stats(mar);
        assert_eq!(stats, MonthStats::default());
        assert!(store.data().months.is_empty());
    }

    #[test]
    fn test_overview_cells() {
        let mut store = store();
        let feb: MonthKey = "2026-02".parse().unwrap();
        store.set_day_entries(day("2026-02-03"), &[EntryInput::new(3, 2.0)]);

        let overview = store.month_overview(feb);
        assert_eq!(overview.days.len(), 28);
        assert_eq!(overview.filled_days(), 1);
        assert_eq!(overview.days[2].daily_total, 1000.0);
        assert!(overview.days[2].filled);
        assert!(!overview.days[0].filled);
        assert_eq!(overview.coefficient, 0.12);
        assert_eq!(overview.stats.premium, 120.0);
    }
}
