/// Configuration for the snapshot history.
use std::time::Duration;

/// Maximum number of snapshots kept per editing session.
/// Oldest snapshots are evicted when this limit is exceeded.
pub const DEFAULT_CAPACITY: usize = 50;

/// Quiescence window in milliseconds that must pass after the last
/// observed change before a snapshot is recorded.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration for the history system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max snapshots retained.
    pub capacity: usize,
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given capacity and debounce window.
    pub fn new(capacity: usize, debounce_ms: u64) -> Self {
        Self {
            capacity,
            debounce_ms,
        }
        .sanitized()
    }

    /// Returns the debounce window as a `Duration`.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Clamps values to valid ranges. A history must hold at least one
    /// snapshot or the cursor invariant cannot be kept.
    pub fn sanitized(mut self) -> Self {
        self.capacity = self.capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HistoryConfig::default();
        assert_eq!(config.capacity, 50);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.debounce_window(), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let config = HistoryConfig::new(0, 100);
        assert_eq!(config.capacity, 1);
        assert_eq!(config.debounce_ms, 100);
    }

    #[test]
    fn test_zero_debounce_is_allowed() {
        let config = HistoryConfig::new(10, 0);
        assert_eq!(config.debounce_window(), Duration::ZERO);
    }
}
