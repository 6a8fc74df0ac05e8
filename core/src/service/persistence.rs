use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::{AppConfig, BACKUP_NAME, DOCUMENT_NAME};
use crate::error::{validate_coefficient, validate_person_count, WorkError};
use crate::model::work_data::WorkData;
use crate::repository::DocumentStore;
use crate::service::dto::{LoadOrigin, Notice, PendingImport, SaveOutcome, Snapshot};

/// Result of reading the document at startup.
#[derive(Debug)]
pub struct Loaded {
    pub data: WorkData,
    pub origin: LoadOrigin,
    pub notices: Vec<Notice>,
}

/// Reads and writes the whole graph as a single JSON document.
///
/// `P` is the durable store, `B` the best-effort backup used only when a
/// primary write fails.
pub struct PersistenceGateway<P: DocumentStore, B: DocumentStore> {
    primary: P,
    backup: B,
    document_name: String,
    backup_name: String,
    tracked_year: i32,
}

impl<P: DocumentStore, B: DocumentStore> PersistenceGateway<P, B> {
    pub fn new(primary: P, backup: B, tracked_year: i32) -> Self {
        Self {
            primary,
            backup,
            document_name: DOCUMENT_NAME.to_string(),
            backup_name: BACKUP_NAME.to_string(),
            tracked_year,
        }
    }

    pub fn with_config(primary: P, backup: B, config: &AppConfig) -> Self {
        Self {
            primary,
            backup,
            document_name: config.document_name.clone(),
            backup_name: config.backup_name.clone(),
            tracked_year: config.tracked_year,
        }
    }

    pub fn tracked_year(&self) -> i32 {
        self.tracked_year
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn backup(&self) -> &B {
        &self.backup
    }

    pub fn seed(&self) -> WorkData {
        WorkData::seeded(self.tracked_year)
    }

    /// Writes the graph to the primary store, falling back to the backup.
    /// Never fails; problems come back as notices.
    pub fn save(&self, data: &WorkData) -> (SaveOutcome, Vec<Notice>) {
        // serde_json writes infinities as null, which would not load back.
        if !data.is_finite() {
            tracing::error!("Refusing to save work data with non-finite amounts");
            return (SaveOutcome::Lost, vec![Notice::error("Could not save data: amounts are too large")]);
        }

        let payload = match serde_json::to_string(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Could not serialize work data: {}", e);
                return (SaveOutcome::Lost, vec![Notice::error("Could not save data")]);
            }
        };

        match self.primary.write(&self.document_name, &payload) {
            Ok(()) => {
                tracing::debug!("Saved {} bytes to '{}'", payload.len(), self.document_name);
                (SaveOutcome::Primary, Vec::new())
            }
            Err(e) => {
                tracing::warn!("Primary save failed: {:#}", e);
                match self.backup.write(&self.backup_name, &payload) {
                    Ok(()) => {
                        tracing::warn!("Saved to session backup '{}'", self.backup_name);
                        let notice = Notice::warning("Could not save data, changes are kept for this session only");
                        (SaveOutcome::Backup, vec![notice])
                    }
                    Err(e2) => {
                        tracing::error!("Backup save failed as well: {:#}", e2);
                        (SaveOutcome::Lost, vec![Notice::error("Could not save data")])
                    }
                }
            }
        }
    }

    /// Loads the stored graph, seeding defaults when there is none or when
    /// the stored one cannot be used.
    pub fn load(&self) -> Loaded {
        let raw = match self.primary.read(&self.document_name) {
            Ok(raw) => raw,
            Err(e) if is_undecodable(&e) => {
                tracing::warn!("Stored document is not valid UTF-8: {:#}", e);
                return self.reseed(LoadOrigin::Reseeded);
            }
            Err(e) => {
                // Leave the unreadable document alone; it may come back.
                tracing::error!("Could not read '{}': {:#}", self.document_name, e);
                return Loaded {
                    data: self.seed(),
                    origin: LoadOrigin::Unreadable,
                    notices: vec![Notice::warning(
                        "Could not read saved data, starting with defaults",
                    )],
                };
            }
        };

        match raw {
            None => self.reseed(LoadOrigin::Seeded),
            Some(raw) => match parse_document(&raw) {
                Ok(data) => Loaded { data, origin: LoadOrigin::Stored, notices: Vec::new() },
                Err(e) => {
                    tracing::warn!("Stored document is corrupt, reseeding: {}", e);
                    self.reseed(LoadOrigin::Reseeded)
                }
            },
        }
    }

    /// Starts over from the seed and writes it out.
    fn reseed(&self, origin: LoadOrigin) -> Loaded {
        let data = self.seed();
        let (_, notices) = self.save(&data);
        Loaded { data, origin, notices }
    }

    /// Serializes the graph for download. File name carries the export date.
    pub fn export_snapshot(&self, data: &WorkData, on: NaiveDate) -> Result<Snapshot> {
        let contents = serde_json::to_string_pretty(data)?;
        Ok(Snapshot {
            file_name: format!("work-log-{}.json", on.format("%Y-%m-%d")),
            contents,
        })
    }

    /// Parses an externally produced document. Nothing is replaced until the
    /// pending import is confirmed.
    pub fn import_snapshot(&self, raw: &str) -> Result<PendingImport, WorkError> {
        parse_document(raw).map(PendingImport::new)
    }

    /// Removes the stored document and the backup copy.
    pub fn clear(&self) -> Result<()> {
        self.primary.remove(&self.document_name)?;
        self.backup.remove(&self.backup_name)?;
        Ok(())
    }
}

/// A document whose bytes are not text counts as corrupt, not unreadable.
fn is_undecodable(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::InvalidData)
}

/// Parses and minimally validates a full document.
pub fn parse_document(raw: &str) -> Result<WorkData, WorkError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| WorkError::InvalidImport(format!("not valid JSON: {}", e)))?;

    if !value.get("positions").is_some_and(Value::is_array) {
        return Err(WorkError::InvalidImport("missing 'positions' list".to_string()));
    }
    if !value.get("settings").is_some_and(Value::is_object) {
        return Err(WorkError::InvalidImport("missing 'settings' object".to_string()));
    }

    let data: WorkData = serde_json::from_value(value)
        .map_err(|e| WorkError::InvalidImport(e.to_string()))?;

    validate_person_count(data.settings.person_count)
        .and_then(|_| validate_coefficient(data.settings.default_coefficient))
        .map_err(|e| WorkError::InvalidImport(e.to_string()))?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryDocumentStore;
    use crate::service::dto::NoticeLevel;
    use anyhow::anyhow;

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>> { Err(anyhow!("disk on fire")) }
        fn write(&self, _key: &str, _payload: &str) -> Result<()> { Err(anyhow!("quota exceeded")) }
        fn remove(&self, _key: &str) -> Result<()> { Err(anyhow!("disk on fire")) }
    }

    fn gateway() -> PersistenceGateway<MemoryDocumentStore, MemoryDocumentStore> {
        PersistenceGateway::new(MemoryDocumentStore::new(), MemoryDocumentStore::new(), 2026)
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let gw = gateway();
        let loaded = gw.load();
        assert_eq!(loaded.origin, LoadOrigin::Seeded);
        assert_eq!(loaded.data, WorkData::seeded(2026));
        assert!(gw.primary().read(DOCUMENT_NAME).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_document_is_reseeded_and_overwritten() {
        let gw = gateway();
        gw.primary().write(DOCUMENT_NAME, "{not json").unwrap();

        let loaded = gw.load();
        assert_eq!(loaded.origin, LoadOrigin::Reseeded);
        assert_eq!(loaded.data, WorkData::seeded(2026));

        let stored = gw.primary().read(DOCUMENT_NAME).unwrap().unwrap();
        assert_eq!(parse_document(&stored).unwrap(), WorkData::seeded(2026));
    }

    #[test]
    fn test_save_falls_back_to_backup() {
        let gw = PersistenceGateway::new(BrokenStore, MemoryDocumentStore::new(), 2026);
        let (outcome, notices) = gw.save(&WorkData::seeded(2026));
        assert_eq!(outcome, SaveOutcome::Backup);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert!(gw.backup().read(BACKUP_NAME).unwrap().is_some());
    }

    #[test]
    fn test_save_refuses_non_finite_amounts() {
        let gw = gateway();
        gw.save(&WorkData::seeded(2026));
        let before = gw.primary().read(DOCUMENT_NAME).unwrap();

        let mut data = WorkData::seeded(2026);
        data.positions[0].unit_price = f64::INFINITY;
        let (outcome, notices) = gw.save(&data);
        assert_eq!(outcome, SaveOutcome::Lost);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(gw.primary().read(DOCUMENT_NAME).unwrap(), before);
        assert!(gw.backup().read(BACKUP_NAME).unwrap().is_none());
    }

    #[test]
    fn test_save_with_both_stores_broken_is_not_fatal() {
        let gw = PersistenceGateway::new(BrokenStore, BrokenStore, 2026);
        let (outcome, notices) = gw.save(&WorkData::seeded(2026));
        assert_eq!(outcome, SaveOutcome::Lost);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_unreadable_primary_uses_defaults() {
        let gw = PersistenceGateway::new(BrokenStore, MemoryDocumentStore::new(), 2026);
        let loaded = gw.load();
        assert_eq!(loaded.origin, LoadOrigin::Unreadable);
        assert_eq!(loaded.data.positions.len(), 5);
    }

    #[test]
    fn test_parse_document_shape_checks() {
        assert!(matches!(parse_document("[]"), Err(WorkError::InvalidImport(_))));
        assert!(matches!(
            parse_document(r#"{"positions":{},"settings":{}}"#),
            Err(WorkError::InvalidImport(_))
        ));
        assert!(matches!(
            parse_document(r#"{"positions":[]}"#),
            Err(WorkError::InvalidImport(_))
        ));
        assert!(matches!(
            parse_document(r#"{"positions":[],"settings":{"personCount":0,"defaultCoefficient":0.1}}"#),
            Err(WorkError::InvalidImport(_))
        ));
        assert!(parse_document(r#"{"positions":[],"settings":{"personCount":1,"defaultCoefficient":0.1}}"#).is_ok());
    }

    #[test]
    fn test_export_file_name() {
        let gw = gateway();
        let on = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let snapshot = gw.export_snapshot(&WorkData::seeded(2026), on).unwrap();
        assert_eq!(snapshot.file_name, "work-log-2026-10-19.json");
    }
}
