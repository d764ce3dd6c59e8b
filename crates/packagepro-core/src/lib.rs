//! Editor core for PackagePro packaging mockups.
//!
//! `EditorSession` owns the project being edited: its `EditorState`
//! (background color, text overlays, template, name), the debounced
//! undo/redo history of that state, and the keyboard listener that maps
//! undo/redo shortcuts onto it.

pub mod history;
pub mod overlay;
pub mod session;
pub mod shortcuts;
pub mod state;

pub use overlay::{Axis, OverlayEditor, OverlayPatch, TextOverlay};
pub use session::{EditorSession, RestoreCallback};
pub use shortcuts::{Key, KeyEvent, KeyListener, KeyboardHub, Modifiers, ShortcutAction};
pub use state::{EditorState, PackageKind, TemplateRef};
