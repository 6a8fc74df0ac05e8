use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};

pub const DOCUMENT_NAME: &str = "workTrackerData";
pub const BACKUP_NAME: &str = "workTrackerData_backup";

const DATA_DIR_ENV: &str = "PIECEWORK_DATA_DIR";
const YEAR_ENV: &str = "PIECEWORK_YEAR";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub document_name: String,
    pub backup_name: String,
    /// Year whose coefficient table is seeded on first run.
    pub tracked_year: i32,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf, tracked_year: i32) -> Self {
        Self {
            data_dir,
            document_name: DOCUMENT_NAME.to_string(),
            backup_name: BACKUP_NAME.to_string(),
            tracked_year,
        }
    }

    /// Resolves the configuration: explicit directory, then
    /// `PIECEWORK_DATA_DIR`, then `~/.piecework`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir.or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from)) {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".piecework")
            }
        };

        let tracked_year = match env::var(YEAR_ENV) {
            Ok(value) => value
                .trim()
                .parse::<i32>()
                .map_err(|_| anyhow!("{} must be a year, got '{}'", YEAR_ENV, value))?,
            Err(_) => Local::now().year(),
        };

        Ok(Self::new(data_dir, tracked_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/piecework-test"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/piecework-test"));
        assert_eq!(config.document_name, DOCUMENT_NAME);
        assert_eq!(config.backup_name, BACKUP_NAME);
    }
}
