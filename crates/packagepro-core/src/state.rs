//! The editable state of a packaging project: what undo/redo snapshots capture.

use serde::{Deserialize, Serialize};

use packagepro_config::{AppConfig, HexColor};

use crate::overlay::TextOverlay;

/// Package shape a template is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    Bag,
    Box,
    Can,
    Bottle,
}

/// Reference to an entry in the template catalog.
///
/// The catalog itself is external; the editor only keeps what it needs
/// to seed a project from the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    pub name: String,
    pub kind: PackageKind,
    pub color: HexColor,
}

/// Everything a snapshot captures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorState {
    pub background_color: HexColor,
    pub text_overlays: Vec<TextOverlay>,
    pub selected_template: Option<TemplateRef>,
    pub project_name: String,
}

impl EditorState {
    /// A blank project using the configured defaults.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            background_color: config.default_background,
            text_overlays: Vec::new(),
            selected_template: None,
            project_name: config.default_project_name.clone(),
        }
    }

    /// Selects `template`, taking over its color and naming the project after it.
    pub fn apply_template(&mut self, template: TemplateRef) {
        self.background_color = template.color;
        self.project_name = format!("{} Project", template.name);
        self.selected_template = Some(template);
    }

    /// Looks up an overlay by id.
    pub fn overlay(&self, id: &str) -> Option<&TextOverlay> {
        self.text_overlays.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee_bag() -> TemplateRef {
        TemplateRef {
            id: "1".to_string(),
            name: "Premium Coffee Bag".to_string(),
            kind: PackageKind::Bag,
            color: HexColor::rgb(139, 69, 19),
        }
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig {
            default_background: HexColor::rgb(1, 2, 3),
            default_project_name: "Untitled".to_string(),
            ..Default::default()
        };
        let state = EditorState::from_config(&config);
        assert_eq!(state.background_color, HexColor::rgb(1, 2, 3));
        assert_eq!(state.project_name, "Untitled");
        assert!(state.text_overlays.is_empty());
        assert!(state.selected_template.is_none());
    }

    #[test]
    fn test_apply_template() {
        let mut state = EditorState::default();
        state.apply_template(coffee_bag());
        assert_eq!(state.project_name, "Premium Coffee Bag Project");
        assert_eq!(state.background_color, HexColor::rgb(139, 69, 19));
        assert_eq!(state.selected_template.as_ref().map(|t| t.kind), Some(PackageKind::Bag));
    }

    #[test]
    fn test_overlay_lookup() {
        let mut state = EditorState::default();
        state.text_overlays.push(TextOverlay::new("a"));
        assert!(state.overlay("a").is_some());
        assert!(state.overlay("b").is_none());
    }

    #[test]
    fn test_state_json_shape() {
        let mut state = EditorState::default();
        state.apply_template(coffee_bag());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["background_color"], "#8b4513");
        assert_eq!(json["selected_template"]["kind"], "Bag");
        let back: EditorState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
