use anyhow::Result;

/// A key/value store holding whole serialized documents.
pub trait DocumentStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, payload: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
