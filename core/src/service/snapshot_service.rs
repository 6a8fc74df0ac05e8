use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::error::WorkError;
use crate::repository::DocumentStore;
use crate::service::dto::{Notice, PendingImport, Snapshot};
use crate::store::WorkStore;

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    /// Serializes the whole graph, named after today's date.
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        self.export_snapshot_on(Local::now().date_naive())
    }

    pub fn export_snapshot_on(&self, on: NaiveDate) -> Result<Snapshot> {
        self.gateway.export_snapshot(&self.data, on)
    }

    /// First half of an import: parse and validate. The current graph is
    /// untouched until [`WorkStore::confirm_import`] is called.
    pub fn import_snapshot(&mut self, raw: &str) -> Result<PendingImport, WorkError> {
        let result = self.gateway.import_snapshot(raw);
        if let Err(e) = &result {
            tracing::warn!("Rejected import: {}", e);
            self.notify(Notice::error(e.to_string()));
        }
        result
    }

    /// Replaces the graph with a confirmed import and persists it.
    pub fn confirm_import(&mut self, pending: PendingImport) {
        self.replace_data(pending.into_data());
        self.notify(Notice::info("Data imported"));
    }

    /// Drops everything and starts over from the seeded defaults.
    pub fn reset_data(&mut self) {
        if let Err(e) = self.gateway.clear() {
            tracing::warn!("Could not clear stored documents: {:#}", e);
        }
        let seeded = self.gateway.seed();
        self.replace_data(seeded);
        self.notify(Notice::info("All data deleted"));
    }
}

#[cfg(test)]
mod tests {
    use crate::error::WorkError;
    use crate::model::day_record::EntryInput;
    use crate::model::keys::MonthKey;
    use crate::model::work_data::WorkData;
    use crate::repository::MemoryDocumentStore;
    use crate::service::persistence::PersistenceGateway;
    use crate::store::WorkStore;

    fn store() -> WorkStore<MemoryDocumentStore, MemoryDocumentStore> {
        WorkStore::open(PersistenceGateway::new(
            MemoryDocumentStore::new(),
            MemoryDocumentStore::new(),
            2026,
        ))
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = store();
        store.add_position("Insulation", 333.33).unwrap();
        store.set_day_entries("2026-01-10".parse().unwrap(), &[EntryInput::new(6, 1.5)]);
        store.set_day_entries("2026-02-03".parse().unwrap(), &[EntryInput::new(1, 0.1), EntryInput::new(2, 7.0)]);
        store.set_coefficient("2027-01".parse().unwrap(), 0.07).unwrap();
        let original = store.data().clone();

        let snapshot = store.export_snapshot().unwrap();
        let pending = store.import_snapshot(&snapshot.contents).unwrap();
        assert_eq!(pending.data(), &original);

        store.confirm_import(pending);
        assert_eq!(store.data(), &original);
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut store = store();
        store.set_day_entries("2026-01-10".parse().unwrap(), &[EntryInput::new(1, 1.0)]);
        let before = store.data().clone();

        assert!(matches!(store.import_snapshot("garbage"), Err(WorkError::InvalidImport(_))));
        assert!(matches!(
            store.import_snapshot(r#"{"settings":{"personCount":1,"defaultCoefficient":0}}"#),
            Err(WorkError::InvalidImport(_))
        ));
        assert_eq!(store.data(), &before);
    }

    #[test]
    fn test_pending_import_needs_confirmation() {
        let mut store = store();
        let mut other = WorkData::seeded(2026);
        other.positions.truncate(1);
        let raw = serde_json::to_string(&other).unwrap();

        let pending = store.import_snapshot(&raw).unwrap();
        assert_eq!(store.positions().len(), 5);
        drop(pending);
        assert_eq!(store.positions().len(), 5);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = store();
        store.set_day_entries("2026-01-10".parse().unwrap(), &[EntryInput::new(1, 1.0)]);
        store.add_position("Roofing", 10.0).unwrap();

        store.reset_data();
        assert_eq!(store.data(), &WorkData::seeded(2026));
        let jan: MonthKey = "2026-01".parse().unwrap();
        assert_eq!(store.get_stats(jan).total, 0.0);
    }
}
