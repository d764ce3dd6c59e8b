/// A value that carries its own undo/redo history.
///
/// Unlike the debounced editor flow, every `update` is recorded
/// immediately and restores are applied in place, so there is no
/// observer to echo them back.
use crate::manager::HistoryManager;

#[derive(Debug, Clone)]
pub struct Tracked<T> {
    value: T,
    history: HistoryManager<T>,
}

impl<T: Clone> Tracked<T> {
    /// Starts tracking `initial`, which becomes the first history entry.
    pub fn new(initial: T, capacity: usize) -> Self {
        let mut history = HistoryManager::with_capacity(capacity);
        history.record(initial.clone());
        Self {
            value: initial,
            history,
        }
    }

    /// The live value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and records it.
    pub fn set(&mut self, value: T) {
        self.history.record(value.clone());
        self.value = value;
    }

    /// Derives the next value from the current one and records it.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next);
    }

    /// Steps back. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo();
        self.apply(restored)
    }

    /// Steps forward. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo();
        self.apply(restored)
    }

    /// Returns to the first recorded value.
    pub fn reset(&mut self) -> bool {
        let restored = self.history.reset();
        self.apply(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The underlying history.
    pub fn history(&self) -> &HistoryManager<T> {
        &self.history
    }

    fn apply(&mut self, restored: Option<crate::Snapshot<T>>) -> bool {
        // Restores never go through `set`, so the guard has nothing to swallow.
        self.history.settle();
        match restored {
            Some(snapshot) => {
                self.value = snapshot.into_state();
                true
            }
            None => false,
        }
    }
}
