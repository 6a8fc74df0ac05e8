pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
pub mod time;

pub use config::AppConfig;
pub use error::WorkError;
pub use model::day_record::{DayRecord, EntryInput, LineEntry};
pub use model::keys::{DayKey, MonthKey};
pub use model::month_record::{MonthRecord, MonthStats};
pub use model::position::Position;
pub use model::settings::{Settings, Theme};
pub use model::work_data::WorkData;
pub use repository::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use input::{parse_args, parse_entries, parse_decimal, expand_key, ParsedInput};
pub use time::{parse_human_day, parse_human_month};
pub use service::dto::{CoefficientRow, DayCell, LoadOrigin, MonthOverview, Notice, NoticeLevel, PendingImport, SaveOutcome, Snapshot};
pub use service::persistence::PersistenceGateway;
pub use store::{LocalWorkStore, WorkStore};

/// Opens the on-disk store described by `config`, backed by a session-only
/// fallback.
pub fn open_local(config: &AppConfig) -> anyhow::Result<LocalWorkStore> {
    let primary = FileDocumentStore::new(&config.data_dir)?;
    let gateway = PersistenceGateway::with_config(primary, MemoryDocumentStore::new(), config);
    Ok(WorkStore::open(gateway))
}
