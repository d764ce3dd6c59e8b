/// Bounded linear undo/redo history of state snapshots.
///
/// The history is a sequence of snapshots with a cursor pointing at the
/// snapshot that matches the live state. Recording after an undo discards
/// the redo branch. When capacity is exceeded the oldest snapshots are
/// evicted and the cursor is shifted down by the same amount.
use std::time::Instant;

use crate::config::HistoryConfig;
use crate::snapshot::{HistoryInfo, Snapshot};

/// Whether the next `record` call is the echo of a restore.
///
/// Restoring a snapshot changes the live state, and the change observer
/// will try to record it. The guard swallows exactly that one record.
/// Observers that can tell the echo apart from a later edit should
/// consume the guard themselves with `settle` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreGuard {
    #[default]
    Idle,
    Restoring,
}

/// Result of a `record` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The snapshot was appended; `evicted` old snapshots were dropped to stay within capacity.
    Appended { evicted: usize },
    /// The call was the echo of an undo/redo/reset and was ignored.
    SkippedRestore,
}

/// Manages the snapshot history for a single editing session.
///
/// Each session owns its own `HistoryManager`. Nothing is persisted; the
/// history is discarded with the manager.
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    /// Snapshots, oldest first.
    entries: Vec<Snapshot<T>>,
    /// Index of the current snapshot. Meaningless while `entries` is empty.
    cursor: usize,
    /// One-shot guard armed by undo/redo/reset.
    guard: RestoreGuard,
    config: HistoryConfig,
}

impl<T: Clone> HistoryManager<T> {
    /// Creates an empty history.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            guard: RestoreGuard::Idle,
            config: config.sanitized(),
        }
    }

    /// Creates an empty history with the given capacity and default debounce.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(HistoryConfig {
            capacity,
            ..HistoryConfig::default()
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records `state` captured now.
    pub fn record(&mut self, state: T) -> RecordOutcome {
        self.record_at(state, Instant::now())
    }

    /// Records `state` captured at `now`.
    ///
    /// Truncates the redo branch, appends, moves the cursor to the new
    /// last entry and evicts from the front if over capacity. Ignored (and
    /// the guard cleared) if the call follows an undo/redo/reset.
    pub fn record_at(&mut self, state: T, now: Instant) -> RecordOutcome {
        if self.guard == RestoreGuard::Restoring {
            self.guard = RestoreGuard::Idle;
            tracing::debug!("Skipping record of restored snapshot");
            return RecordOutcome::SkippedRestore;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(Snapshot::new(state, now));
        self.cursor = self.entries.len() - 1;

        let mut evicted = 0;
        if self.entries.len() > self.config.capacity {
            evicted = self.entries.len() - self.config.capacity;
            self.entries.drain(..evicted);
            self.cursor -= evicted;
        }

        tracing::debug!(
            len = self.entries.len(),
            cursor = self.cursor,
            evicted,
            "Recorded snapshot"
        );
        RecordOutcome::Appended { evicted }
    }

    /// Steps back one snapshot.
    ///
    /// Returns the snapshot now under the cursor, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<Snapshot<T>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.guard = RestoreGuard::Restoring;
        tracing::debug!(cursor = self.cursor, "Undo");
        self.entries.get(self.cursor).cloned()
    }

    /// Steps forward one snapshot.
    ///
    /// Returns the snapshot now under the cursor, or `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot<T>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.guard = RestoreGuard::Restoring;
        tracing::debug!(cursor = self.cursor, "Redo");
        self.entries.get(self.cursor).cloned()
    }

    /// Moves the cursor to the first snapshot and returns it.
    ///
    /// The redo branch is kept. Returns `None` on an empty history.
    pub fn reset(&mut self) -> Option<Snapshot<T>> {
        let first = self.entries.first()?.clone();
        self.cursor = 0;
        self.guard = RestoreGuard::Restoring;
        tracing::debug!("Reset to first snapshot");
        Some(first)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    /// Disarms the restore guard.
    ///
    /// Call when a restore left the live state unchanged, so no record
    /// will arrive to consume the guard.
    pub fn settle(&mut self) {
        self.guard = RestoreGuard::Idle;
    }

    /// Whether the next record will be swallowed.
    pub fn is_restoring(&self) -> bool {
        self.guard == RestoreGuard::Restoring
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot, or `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Snapshot<T>> {
        self.entries.get(self.cursor)
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot<T>] {
        &self.entries
    }

    /// Cursor position summary for display.
    pub fn info(&self) -> HistoryInfo {
        HistoryInfo::new(self.entries.len(), self.cursor)
    }

    /// Drops every snapshot and disarms the guard.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.guard = RestoreGuard::Idle;
    }
}
