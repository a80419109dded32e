//! In-memory adapters for directory tests and embedding.

mod directory;

pub use directory::InMemoryActorDirectory;
