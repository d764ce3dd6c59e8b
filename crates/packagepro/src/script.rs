//! Scripted editing sessions.
//!
//! A script is a JSON array of editor actions replayed against an
//! `EditorSession` on a virtual clock. Text actions target the selected
//! overlay, the same way the text panel does.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use packagepro_config::HexColor;
use packagepro_core::history::HistoryInfo;
use packagepro_core::{Axis, EditorSession, EditorState, KeyEvent, OverlayPatch, TemplateRef};

/// Interval between simulated frames while waiting.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetColor { color: HexColor },
    SetProjectName { name: String },
    SelectTemplate { template: TemplateRef },
    AddText,
    /// Selects the overlay at `index`, or clears the selection.
    SelectText { index: Option<usize> },
    UpdateText { patch: OverlayPatch },
    DeleteText,
    NudgePosition { axis: Axis, steps: f32 },
    NudgeRotation { axis: Axis, steps: f32 },
    /// Lets `ms` milliseconds of frames pass.
    Wait { ms: u64 },
    Key { accelerator: String },
    Undo,
    Redo,
    Reset,
}

/// What the replay leaves behind.
#[derive(Debug, Serialize)]
pub struct Report {
    pub state: EditorState,
    pub history: HistoryInfo,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Reads a script file.
pub fn load(path: &Path) -> Result<Vec<Action>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse(&contents).with_context(|| format!("Failed to parse script {}", path.display()))
}

/// Parses a script from JSON.
pub fn parse(json: &str) -> Result<Vec<Action>> {
    serde_json::from_str(json).context("Invalid script JSON")
}

/// Replays scripts against a session on a virtual clock.
pub struct Player<'a> {
    session: &'a mut EditorSession,
    now: Instant,
}

impl<'a> Player<'a> {
    pub fn new(session: &'a mut EditorSession, start: Instant) -> Self {
        Self {
            session,
            now: start,
        }
    }

    /// Runs every action, ticking the session after each one.
    pub fn run(&mut self, actions: &[Action]) -> Result<()> {
        self.session.tick_at(self.now);
        for (i, action) in actions.iter().enumerate() {
            self.apply(action)
                .with_context(|| format!("Action {i} ({action:?}) failed"))?;
            self.session.tick_at(self.now);
        }
        Ok(())
    }

    /// Lets `span` of frames pass.
    pub fn wait(&mut self, span: Duration) {
        let end = self.now + span;
        while self.now < end {
            self.now = (self.now + FRAME).min(end);
            self.session.tick_at(self.now);
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.session.selected_text().map(|o| o.id.clone())
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::SetColor { color } => self.session.set_background_color(*color),
            Action::SetProjectName { name } => self.session.set_project_name(name.clone()),
            Action::SelectTemplate { template } => self.session.select_template(template.clone()),
            Action::AddText => {
                self.session.add_text();
            }
            Action::SelectText { index } => {
                let id = match index {
                    Some(i) => {
                        let overlay = self
                            .session
                            .state()
                            .text_overlays
                            .get(*i)
                            .with_context(|| format!("No text overlay at index {i}"))?;
                        Some(overlay.id.clone())
                    }
                    None => None,
                };
                self.session.select_text(id.as_deref());
            }
            Action::UpdateText { patch } => {
                if let Some(id) = self.selected_id() {
                    self.session.update_text(&id, patch);
                }
            }
            Action::DeleteText => {
                if let Some(id) = self.selected_id() {
                    self.session.delete_text(&id);
                }
            }
            Action::NudgePosition { axis, steps } => {
                if let Some(id) = self.selected_id() {
                    self.session.nudge_position(&id, *axis, *steps);
                }
            }
            Action::NudgeRotation { axis, steps } => {
                if let Some(id) = self.selected_id() {
                    self.session.nudge_rotation(&id, *axis, *steps);
                }
            }
            Action::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Action::Key { accelerator } => {
                let event: KeyEvent = accelerator.parse()?;
                if !self.session.handle_key(&event) {
                    tracing::info!(%accelerator, "Key not bound, ignored");
                }
            }
            Action::Undo => {
                if !self.session.undo() {
                    tracing::info!("Nothing to undo");
                }
            }
            Action::Redo => {
                if !self.session.redo() {
                    tracing::info!("Nothing to redo");
                }
            }
            Action::Reset => {
                self.session.reset();
            }
        }
        Ok(())
    }

    pub fn report(&self) -> Report {
        Report {
            state: self.session.state().clone(),
            history: self.session.history_info(),
            can_undo: self.session.can_undo(),
            can_redo: self.session.can_redo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packagepro_core::history::HistoryConfig;
    use packagepro_core::KeyboardHub;

    fn play(json: &str) -> Report {
        let hub = KeyboardHub::new();
        let mut session = EditorSession::new(EditorState::default(), HistoryConfig::default());
        session.attach_keyboard(&hub);
        let actions = parse(json).unwrap();
        let mut player = Player::new(&mut session, Instant::now());
        player.run(&actions).unwrap();
        player.wait(Duration::from_millis(600));
        player.report()
    }

    #[test]
    fn test_parse_actions() {
        let actions = parse(
            r##"[
                {"action": "set_color", "color": "#123456"},
                {"action": "wait", "ms": 10},
                {"action": "select_text", "index": null},
                {"action": "undo"}
            ]"##,
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                Action::SetColor {
                    color: HexColor::rgb(0x12, 0x34, 0x56)
                },
                Action::Wait { ms: 10 },
                Action::SelectText { index: None },
                Action::Undo,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(parse(r#"[{"action": "explode"}]"#).is_err());
    }

    #[test]
    fn test_edits_then_undo_by_key() {
        let report = play(
            r##"[
                {"action": "wait", "ms": 600},
                {"action": "set_color", "color": "#2ecc71"},
                {"action": "wait", "ms": 600},
                {"action": "add_text"},
                {"action": "update_text", "patch": {"content": "Organic"}},
                {"action": "wait", "ms": 600},
                {"action": "key", "accelerator": "ctrl+z"}
            ]"##,
        );
        assert_eq!(report.state.background_color, HexColor::rgb(46, 204, 113));
        assert!(report.state.text_overlays.is_empty());
        assert_eq!(report.history.total, 3);
        assert_eq!(report.history.current, 2);
        assert!(report.can_redo);
    }

    #[test]
    fn test_text_actions_target_selection() {
        let report = play(
            r#"[
                {"action": "add_text"},
                {"action": "add_text"},
                {"action": "select_text", "index": 0},
                {"action": "nudge_position", "axis": "y", "steps": 2},
                {"action": "select_text", "index": 1},
                {"action": "delete_text"}
            ]"#,
        );
        assert_eq!(report.state.text_overlays.len(), 1);
        assert!((report.state.text_overlays[0].position[1] - 0.2).abs() < 1e-6);
        assert_eq!(report.history.total, 1);
    }

    #[test]
    fn test_select_missing_index_fails() {
        let mut session = EditorSession::new(EditorState::default(), HistoryConfig::default());
        let actions = parse(r#"[{"action": "select_text", "index": 3}]"#).unwrap();
        let err = Player::new(&mut session, Instant::now())
            .run(&actions)
            .unwrap_err();
        assert!(format!("{err:#}").contains("No text overlay at index 3"));
    }

    #[test]
    fn test_report_serializes() {
        let report = play(r#"[{"action": "set_project_name", "name": "Tea"}]"#);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"]["project_name"], "Tea");
        assert_eq!(json["history"]["total"], 1);
        assert_eq!(json["can_undo"], false);
    }
}
