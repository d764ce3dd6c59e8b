//! Undo/redo keyboard shortcuts.
//!
//! A `KeyboardHub` stands in for the window-wide key source. Editing
//! sessions `attach` to it and hold the returned `KeyListener`; dropping
//! the listener detaches it, so a session can never leave a stale
//! listener behind.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use anyhow::{bail, Result};

/// A key, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS.
    pub command: bool,
}

impl Modifiers {
    /// Ctrl on Windows/Linux or Cmd on macOS.
    pub fn accel(&self) -> bool {
        self.ctrl || self.command
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Parses accelerators like `"ctrl+z"`, `"cmd+shift+z"` or `"escape"`.
impl FromStr for KeyEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;
        for part in s.split('+').map(str::trim) {
            let lower = part.to_ascii_lowercase();
            match lower.as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "cmd" | "command" | "meta" => modifiers.command = true,
                "escape" | "esc" => key = Some(Key::Escape),
                "enter" | "return" => key = Some(Key::Enter),
                "tab" => key = Some(Key::Tab),
                "backspace" => key = Some(Key::Backspace),
                "delete" | "del" => key = Some(Key::Delete),
                _ => {
                    let mut chars = part.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Character(c)),
                        _ => bail!("unknown key {part:?} in accelerator {s:?}"),
                    }
                }
            }
        }
        match key {
            Some(key) => Ok(Self { key, modifiers }),
            None => bail!("accelerator {s:?} has no key"),
        }
    }
}

/// What a recognized shortcut asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

impl ShortcutAction {
    /// Maps a key press to an action.
    ///
    /// Ctrl/Cmd+Z is undo; Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y are redo.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if !event.modifiers.accel() {
            return None;
        }
        let Key::Character(c) = event.key else {
            return None;
        };
        match c.to_ascii_lowercase() {
            'z' if event.modifiers.shift => Some(Self::Redo),
            'z' => Some(Self::Undo),
            'y' => Some(Self::Redo),
            _ => None,
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutAction::Undo => f.write_str("undo"),
            ShortcutAction::Redo => f.write_str("redo"),
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    attached: BTreeSet<u64>,
}

/// The window-wide key source that listeners attach to.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    registry: Rc<RefCell<Registry>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It stays attached until dropped.
    pub fn attach(&self) -> KeyListener {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.attached.insert(id);
        tracing::debug!(id, "Key listener attached");
        KeyListener {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().attached.len()
    }
}

/// Guard for an attached key listener. Detaches on drop.
#[derive(Debug)]
pub struct KeyListener {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl KeyListener {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// False once the hub is gone.
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().attached.contains(&self.id))
    }

    /// The action bound to `event`, if this listener is attached.
    pub fn translate(&self, event: &KeyEvent) -> Option<ShortcutAction> {
        if !self.is_attached() {
            return None;
        }
        ShortcutAction::from_event(event)
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().attached.remove(&self.id);
            tracing::debug!(id = self.id, "Key listener detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> KeyEvent {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_accelerators() {
        let ev = key("Ctrl+Shift+Z");
        assert_eq!(ev.key, Key::Character('Z'));
        assert!(ev.modifiers.ctrl && ev.modifiers.shift);
        assert!(!ev.modifiers.alt);

        let ev = key("cmd + y");
        assert!(ev.modifiers.command);
        assert_eq!(ev.key, Key::Character('y'));

        assert_eq!(key("esc").key, Key::Escape);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ctrl+".parse::<KeyEvent>().is_err());
        assert!("ctrl+shift".parse::<KeyEvent>().is_err());
        assert!("ctrl+zz".parse::<KeyEvent>().is_err());
    }

    #[test]
    fn test_undo_mapping() {
        assert_eq!(ShortcutAction::from_event(&key("ctrl+z")), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutAction::from_event(&key("cmd+z")), Some(ShortcutAction::Undo));
    }

    #[test]
    fn test_redo_mapping() {
        assert_eq!(ShortcutAction::from_event(&key("ctrl+y")), Some(ShortcutAction::Redo));
        assert_eq!(
            ShortcutAction::from_event(&key("ctrl+shift+z")),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutAction::from_event(&key("cmd+shift+Z")),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutAction::from_event(&key("z")), None);
        assert_eq!(ShortcutAction::from_event(&key("shift+z")), None);
        assert_eq!(ShortcutAction::from_event(&key("alt+z")), None);
        assert_eq!(ShortcutAction::from_event(&key("ctrl+x")), None);
        assert_eq!(ShortcutAction::from_event(&key("ctrl+escape")), None);
    }

    #[test]
    fn test_listener_detaches_on_drop() {
        let hub = KeyboardHub::new();
        let a = hub.attach();
        let b = hub.attach();
        assert_ne!(a.id(), b.id());
        assert_eq!(hub.listener_count(), 2);
        assert!(a.is_attached());

        drop(a);
        assert_eq!(hub.listener_count(), 1);
        assert!(b.is_attached());
    }

    #[test]
    fn test_listener_outliving_hub() {
        let hub = KeyboardHub::new();
        let listener = hub.attach();
        drop(hub);
        assert!(!listener.is_attached());
        assert_eq!(listener.translate(&key("ctrl+z")), None);
    }

    #[test]
    fn test_translate_when_attached() {
        let hub = KeyboardHub::new();
        let listener = hub.attach();
        assert_eq!(listener.translate(&key("ctrl+z")), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutAction::Redo.to_string(), "redo");
    }
}
