// Re-exports from packagepro-mod-history, specialized to the editor state.
pub use packagepro_mod_history::{
    Debouncer, HistoryConfig, HistoryInfo, HistoryManager, RecordOutcome, RestoreGuard, Snapshot,
    Tracked,
};

use crate::state::EditorState;

/// Snapshot history of an editing session.
pub type EditorHistory = HistoryManager<EditorState>;
