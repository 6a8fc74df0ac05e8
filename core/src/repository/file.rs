use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::repository::traits::DocumentStore;

/// Primary store: one pretty-printed JSON file per key inside `base_dir`.
#[derive(Clone)]
pub struct FileDocumentStore {
    base_dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Could not create data directory {}", base_dir.display()))?;
        Ok(FileDocumentStore { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

fn write_payload(file: File, payload: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(payload.as_bytes())?;
    writer.flush()
}

impl DocumentStore for FileDocumentStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read document '{}'", key)),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        // Write next to the target and rename so a crash never leaves half a document.
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        let file = File::create(&tmp_path)
            .with_context(|| format!("Could not create {}", tmp_path.display()))?;
        let written = write_payload(file, payload)
            .with_context(|| format!("Could not write {}", tmp_path.display()))
            .and_then(|()| {
                fs::rename(&tmp_path, &path)
                    .with_context(|| format!("Could not replace {}", path.display()))
            });
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Could not remove document '{}'", key)),
        }
    }
}
