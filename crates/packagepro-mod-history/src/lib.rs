/// Undo/redo snapshot history for editing sessions.
///
/// Provides a bounded, linear `HistoryManager` over cloned state snapshots,
/// a trailing `Debouncer` that collapses bursts of edits into one entry,
/// and `Tracked`, a value that records every update immediately.
/// History lives only as long as its owner; nothing is persisted.
pub mod config;
pub mod debounce;
pub mod manager;
pub mod snapshot;
pub mod tracked;

pub use config::HistoryConfig;
pub use debounce::Debouncer;
pub use manager::{HistoryManager, RecordOutcome, RestoreGuard};
pub use snapshot::{HistoryInfo, Snapshot};
pub use tracked::Tracked;
