pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;
pub use traits::DocumentStore;
