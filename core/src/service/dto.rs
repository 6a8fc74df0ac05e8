use serde::{Deserialize, Serialize};

use crate::model::keys::{DayKey, MonthKey};
use crate::model::month_record::MonthStats;
use crate::model::work_data::WorkData;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message produced by the core, drained by the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Primary,
    /// Primary failed, the session-only backup took the payload.
    Backup,
    /// Both writes failed; only the in-memory graph holds the data.
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Stored,
    /// Nothing stored yet; defaults seeded and written.
    Seeded,
    /// The stored document was unusable; defaults seeded over it.
    Reseeded,
    /// The primary store could not be read; defaults used for this session only.
    Unreadable,
}

/// A serialized export ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub file_name: String,
    pub contents: String,
}

/// A validated import waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    data: WorkData,
}

impl PendingImport {
    pub(crate) fn new(data: WorkData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &WorkData {
        &self.data
    }

    pub(crate) fn into_data(self) -> WorkData {
        self.data
    }
}

/// One calendar cell.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: DayKey,
    pub daily_total: f64,
    pub filled: bool,
}

/// Everything the calendar surface needs for one month.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthOverview {
    pub month: MonthKey,
    pub coefficient: f64,
    pub stats: MonthStats,
    pub days: Vec<DayCell>,
}

impl MonthOverview {
    pub fn filled_days(&self) -> usize {
        self.days.iter().filter(|d| d.filled).count()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    pub month: MonthKey,
    pub value: f64,
    /// `false` when the value comes from the default coefficient.
    pub overridden: bool,
}
