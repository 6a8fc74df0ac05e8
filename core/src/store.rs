use std::collections::BTreeSet;

use crate::error::WorkError;
use crate::model::keys::MonthKey;
use crate::model::work_data::WorkData;
use crate::repository::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
use crate::service::dto::{LoadOrigin, Notice, SaveOutcome};
use crate::service::persistence::PersistenceGateway;

/// The on-disk store paired with the session-only backup.
pub type LocalWorkStore = WorkStore<FileDocumentStore, MemoryDocumentStore>;

/// The single in-memory copy of the work data for a session.
///
/// Every mutating operation updates the graph and then commits the whole
/// document through the gateway. Save problems never reach the caller as
/// errors; they are queued as notices.
pub struct WorkStore<P: DocumentStore, B: DocumentStore> {
    pub(crate) data: WorkData,
    pub(crate) gateway: PersistenceGateway<P, B>,
    pub(crate) dirty: BTreeSet<MonthKey>,
    notices: Vec<Notice>,
    origin: LoadOrigin,
    last_save: Option<SaveOutcome>,
}

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    /// Loads (or seeds) the document and starts a session.
    pub fn open(gateway: PersistenceGateway<P, B>) -> Self {
        let loaded = gateway.load();
        tracing::debug!(
            "Opened work store: {:?}, {} positions, {} months",
            loaded.origin,
            loaded.data.positions.len(),
            loaded.data.months.len()
        );
        Self {
            data: loaded.data,
            gateway,
            dirty: BTreeSet::new(),
            notices: loaded.notices,
            origin: loaded.origin,
            last_save: None,
        }
    }

    pub fn data(&self) -> &WorkData {
        &self.data
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn gateway(&self) -> &PersistenceGateway<P, B> {
        &self.gateway
    }

    pub fn last_save(&self) -> Option<SaveOutcome> {
        self.last_save
    }

    /// Commits the full graph.
    pub fn save(&mut self) -> SaveOutcome {
        let (outcome, notices) = self.gateway.save(&self.data);
        self.notices.extend(notices);
        self.last_save = Some(outcome);
        outcome
    }

    /// Applies `f` and persists when it succeeds. `f` must validate before
    /// touching the graph, so an `Err` leaves it untouched.
    pub fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut WorkData) -> Result<T, WorkError>,
    ) -> Result<T, WorkError> {
        let value = f(&mut self.data)?;
        self.save();
        Ok(value)
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Queues a success message or the validation error for the user.
    pub(crate) fn report<T>(&mut self, result: &Result<T, WorkError>, success: &str) {
        match result {
            Ok(_) => self.notify(Notice::info(success)),
            Err(e) => self.notify(Notice::error(e.to_string())),
        }
    }

    /// Drains pending user-facing messages.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_dirty(&self, month: &MonthKey) -> bool {
        self.dirty.contains(month)
    }

    pub(crate) fn mark_dirty(&mut self, month: MonthKey) {
        self.dirty.insert(month);
    }

    /// Used when a setting that feeds every month's figures changes.
    pub(crate) fn mark_all_dirty(&mut self) {
        let months: Vec<MonthKey> = self.data.months.keys().copied().collect();
        self.dirty.extend(months);
    }

    pub(crate) fn replace_data(&mut self, data: WorkData) {
        self.data = data;
        self.dirty.clear();
        self.mark_all_dirty();
        self.save();
    }
}
