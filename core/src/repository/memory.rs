use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use crate::repository::traits::DocumentStore;

/// Session-only store. Used as the best-effort fallback when the primary
/// store refuses a write; its contents vanish with the process.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RefCell<HashMap<String, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.documents
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.documents.borrow_mut().remove(key);
        Ok(())
    }
}
