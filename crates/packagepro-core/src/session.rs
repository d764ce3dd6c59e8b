//! The editing session: owner of the live state, its history, the
//! debounce timer and the keyboard listener.
//!
//! Components that need the session receive it by reference. A session
//! ends when it is dropped, which discards its history and detaches its
//! key listener.

use std::fmt;
use std::time::Instant;

use packagepro_config::{AppConfig, HexColor};

use crate::history::{Debouncer, EditorHistory, HistoryConfig, HistoryInfo, RecordOutcome, Snapshot};
use crate::overlay::{Axis, OverlayEditor, OverlayPatch, TextOverlay};
use crate::shortcuts::{KeyEvent, KeyListener, KeyboardHub, ShortcutAction};
use crate::state::{EditorState, TemplateRef};

/// Called with the restored state after undo, redo or reset.
pub type RestoreCallback = Box<dyn FnMut(&EditorState)>;

pub struct EditorSession {
    /// The state being edited.
    state: EditorState,
    /// The state as of the last tick; a difference means an unobserved edit.
    observed: Option<EditorState>,
    overlays: OverlayEditor,
    history: EditorHistory,
    debouncer: Debouncer,
    listener: Option<KeyListener>,
    on_state_change: Option<RestoreCallback>,
    nudge_step: f32,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("project_name", &self.state.project_name)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("pending_record", &self.debouncer.is_pending())
            .field("keyboard_attached", &self.keyboard_attached())
            .finish()
    }
}

impl EditorSession {
    /// Starts a session on `initial` with an empty history.
    pub fn new(initial: EditorState, config: HistoryConfig) -> Self {
        Self {
            state: initial,
            observed: None,
            overlays: OverlayEditor::new(),
            history: EditorHistory::new(config),
            debouncer: Debouncer::new(config.debounce_window()),
            listener: None,
            on_state_change: None,
            nudge_step: 0.1,
        }
    }

    /// Starts a blank project session using the application config.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut session = Self::new(EditorState::from_config(config), config.history_config());
        session.nudge_step = config.nudge_step;
        session
    }

    /// Sets the callback invoked whenever undo, redo or reset restores a state.
    pub fn on_state_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&EditorState) + 'static,
    {
        self.on_state_change = Some(Box::new(callback));
        self
    }

    // ── Keyboard ──────────────────────────────────────────────────────

    /// Starts listening for undo/redo shortcuts on `hub`.
    /// Replaces (and thereby detaches) any previous listener.
    pub fn attach_keyboard(&mut self, hub: &KeyboardHub) {
        self.listener = Some(hub.attach());
    }

    /// Stops listening for shortcuts.
    pub fn detach_keyboard(&mut self) {
        self.listener = None;
    }

    pub fn keyboard_attached(&self) -> bool {
        self.listener.as_ref().is_some_and(KeyListener::is_attached)
    }

    /// Handles a key press. Returns true if it was an undo/redo shortcut,
    /// whether or not there was anything to undo or redo.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Some(action) = self.listener.as_ref().and_then(|l| l.translate(event)) else {
            return false;
        };
        tracing::debug!(%action, "Shortcut");
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
        };
        true
    }

    // ── State access and edits ────────────────────────────────────────

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Applies an arbitrary edit to the live state.
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut EditorState),
    {
        f(&mut self.state);
    }

    pub fn set_background_color(&mut self, color: HexColor) {
        self.state.background_color = color;
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.state.project_name = name.into();
    }

    pub fn select_template(&mut self, template: TemplateRef) {
        self.state.apply_template(template);
    }

    /// Adds a default overlay, selects it and returns its id.
    pub fn add_text(&mut self) -> String {
        self.overlays.add_text(&mut self.state.text_overlays)
    }

    pub fn update_text(&mut self, id: &str, patch: &OverlayPatch) -> bool {
        OverlayEditor::update_text(&mut self.state.text_overlays, id, patch)
    }

    pub fn delete_text(&mut self, id: &str) -> bool {
        self.overlays.delete_text(&mut self.state.text_overlays, id)
    }

    pub fn select_text(&mut self, id: Option<&str>) {
        self.overlays.select(&self.state.text_overlays, id);
    }

    pub fn selected_text(&self) -> Option<&TextOverlay> {
        self.overlays.selected(&self.state.text_overlays)
    }

    /// Moves an overlay by `steps` nudge steps along `axis`.
    pub fn nudge_position(&mut self, id: &str, axis: Axis, steps: f32) -> bool {
        let delta = steps * self.nudge_step;
        OverlayEditor::nudge_position(&mut self.state.text_overlays, id, axis, delta)
    }

    /// Rotates an overlay by `steps` nudge steps around `axis`.
    pub fn nudge_rotation(&mut self, id: &str, axis: Axis, steps: f32) -> bool {
        let delta = steps * self.nudge_step;
        OverlayEditor::nudge_rotation(&mut self.state.text_overlays, id, axis, delta)
    }

    // ── Recording ─────────────────────────────────────────────────────

    /// Samples the live state at the current time.
    pub fn tick(&mut self) -> Option<RecordOutcome> {
        self.tick_at(Instant::now())
    }

    /// Samples the live state at `now`.
    ///
    /// A change since the last sample restarts the debounce window. When
    /// the window elapses without further changes, the state is recorded.
    pub fn tick_at(&mut self, now: Instant) -> Option<RecordOutcome> {
        if self.sample() {
            self.debouncer.observe(now);
        }
        if self.debouncer.fire(now) {
            return Some(self.history.record_at(self.state.clone(), now));
        }
        None
    }

    /// Records a pending change right away instead of waiting for the window.
    pub fn flush_at(&mut self, now: Instant) -> Option<RecordOutcome> {
        if !self.sample() && !self.debouncer.is_pending() {
            return None;
        }
        self.debouncer.cancel();
        Some(self.history.record_at(self.state.clone(), now))
    }

    /// Compares the live state with the last sample. Returns true for a
    /// user edit that should be recorded.
    ///
    /// The restore guard is consumed here, on observation: a change that
    /// lands exactly on the restored snapshot is the echo of the restore
    /// and never reaches the debouncer; anything else is a real edit,
    /// even when it follows a restore within the same window.
    fn sample(&mut self) -> bool {
        if self.observed.as_ref() == Some(&self.state) {
            return false;
        }
        self.observed = Some(self.state.clone());
        let echo = self.history.is_restoring()
            && self
                .history
                .current()
                .is_some_and(|snapshot| snapshot.state() == &self.state);
        self.history.settle();
        if echo {
            tracing::debug!("Observed restored snapshot, not recording");
        }
        !echo
    }

    /// Whether an observed change is waiting for the debounce window.
    pub fn pending_record(&self) -> bool {
        self.debouncer.is_pending()
    }

    // ── Undo / redo ───────────────────────────────────────────────────

    /// Restores the previous snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo();
        self.restore(restored)
    }

    /// Restores the next snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo();
        self.restore(restored)
    }

    /// Restores the first snapshot. Returns false on an empty history.
    pub fn reset(&mut self) -> bool {
        let restored = self.history.reset();
        self.restore(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_info(&self) -> HistoryInfo {
        self.history.info()
    }

    pub fn history(&self) -> &EditorHistory {
        &self.history
    }

    fn restore(&mut self, snapshot: Option<Snapshot<EditorState>>) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };
        // An edit waiting on the debounce window is superseded by the restore.
        self.debouncer.cancel();
        self.state = snapshot.into_state();
        // Force the next sample to look at the state, so the guard is
        // consumed even if the live state is edited back before a tick.
        self.observed = None;
        self.overlays.prune_selection(&self.state.text_overlays);
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(&self.state);
        }
        true
    }
}
