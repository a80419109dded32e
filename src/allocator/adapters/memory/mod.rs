//! In-memory adapters for allocator tests and embedding.

mod directory;

pub use directory::InMemoryCodeDirectory;
