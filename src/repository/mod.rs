//! Persistence ports and their file-backed and in-memory implementations

pub mod blocklist;
pub mod state;

pub use blocklist::{BlocklistStore, FileBlocklistStore, MemoryBlocklistStore};
pub use state::{FileStateStore, MemoryStateStore, StateStore};
