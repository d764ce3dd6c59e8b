/// Core types for recorded snapshots and history position reporting.
use std::time::{Duration, Instant};

use serde::Serialize;

/// An immutable capture of editable state at one point in time.
///
/// `captured_at` is only meant for display. History order is the
/// insertion order, never the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    state: T,
    captured_at: Instant,
}

impl<T> Snapshot<T> {
    /// Captures `state` at `captured_at`.
    pub fn new(state: T, captured_at: Instant) -> Self {
        Self { state, captured_at }
    }

    /// The captured state.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Consumes the snapshot, returning the captured state.
    pub fn into_state(self) -> T {
        self.state
    }

    /// When the snapshot was taken.
    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// Time elapsed between capture and `now`. Saturates at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.captured_at)
    }
}

/// Position of the cursor within the history, for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HistoryInfo {
    /// Number of snapshots held.
    pub total: usize,
    /// 1-based position of the cursor (0 when empty).
    pub current: usize,
    /// `current / total` as a rounded percentage (0 when empty).
    pub percentage: u8,
}

impl HistoryInfo {
    /// Computes the info for a history of `total` entries with the cursor at `cursor`.
    pub fn new(total: usize, cursor: usize) -> Self {
        if total == 0 {
            return Self::default();
        }
        let current = cursor + 1;
        let percentage = ((current as f64 / total as f64) * 100.0).round() as u8;
        Self {
            total,
            current,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_accessors() {
        let now = Instant::now();
        let snap = Snapshot::new("state".to_string(), now);
        assert_eq!(snap.state(), "state");
        assert_eq!(snap.captured_at(), now);
        assert_eq!(snap.into_state(), "state");
    }

    #[test]
    fn test_snapshot_age() {
        let start = Instant::now();
        let snap = Snapshot::new(1, start);
        assert_eq!(snap.age(start + Duration::from_millis(250)), Duration::from_millis(250));
    }

    #[test]
    fn test_snapshot_age_saturates() {
        let start = Instant::now();
        let snap = Snapshot::new(1, start + Duration::from_secs(1));
        assert_eq!(snap.age(start), Duration::ZERO);
    }

    #[test]
    fn test_info_empty() {
        assert_eq!(HistoryInfo::new(0, 0), HistoryInfo::default());
    }

    #[test]
    fn test_info_rounding() {
        let info = HistoryInfo::new(3, 0);
        assert_eq!(info.total, 3);
        assert_eq!(info.current, 1);
        assert_eq!(info.percentage, 33);

        let info = HistoryInfo::new(3, 1);
        assert_eq!(info.percentage, 67);

        let info = HistoryInfo::new(3, 2);
        assert_eq!(info.percentage, 100);
    }

    #[test]
    fn test_info_serializes() {
        let json = serde_json::to_string(&HistoryInfo::new(4, 1)).unwrap();
        assert_eq!(json, r#"{"total":4,"current":2,"percentage":50}"#);
    }
}
