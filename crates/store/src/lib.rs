//! Snapshot persistence and the assembled marketplace state.
//!
//! Persistence is a flat serialized snapshot of every entity: loaded
//! wholesale at startup, overwritten wholesale on save. No incremental
//! format, no schema versioning, no crash recovery — a crash mid-session
//! loses unsaved state. Access is single-writer, single-reader.

pub mod repository;
pub mod state;

pub use repository::{JsonFileRepository, MemoryRepository, Repository, Snapshot};
pub use state::MarketState;
