//! Text overlays placed on the package model, and the selection-aware
//! manager the editor uses to add, edit, move and remove them.

use serde::{Deserialize, Serialize};

use packagepro_config::HexColor;

/// Font families offered by the text editor panel, default first.
pub const FONT_FAMILIES: &[&str] = &[
    "Inter",
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Georgia",
    "Montserrat",
    "Roboto",
];

/// Smallest font size accepted, in scene units.
pub const MIN_FONT_SIZE: f32 = 0.1;
/// Largest font size accepted, in scene units.
pub const MAX_FONT_SIZE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// One of the three scene axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A piece of text rendered on the package surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub id: String,
    pub content: String,
    pub position: [f32; 3],
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    pub font_size: f32,
    pub color: HexColor,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub align: TextAlign,
}

impl TextOverlay {
    /// A fresh overlay slightly in front of the model's front face.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: "Your Text Here".to_string(),
            position: [0.0, 0.0, 0.6],
            rotation: [0.0; 3],
            font_size: 0.3,
            color: HexColor::BLACK,
            font_family: FONT_FAMILIES[0].to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            align: TextAlign::Center,
        }
    }
}

/// Partial update for a `TextOverlay`. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayPatch {
    pub content: Option<String>,
    pub position: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub font_size: Option<f32>,
    pub color: Option<HexColor>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub align: Option<TextAlign>,
}

impl OverlayPatch {
    /// Applies the set fields to `overlay`. Font size is clamped to the
    /// accepted range; a non-finite size is ignored.
    pub fn apply(&self, overlay: &mut TextOverlay) {
        if let Some(content) = &self.content {
            overlay.content.clone_from(content);
        }
        if let Some(position) = self.position {
            overlay.position = position;
        }
        if let Some(rotation) = self.rotation {
            overlay.rotation = rotation;
        }
        if let Some(size) = self.font_size.filter(|s| s.is_finite()) {
            overlay.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        if let Some(color) = self.color {
            overlay.color = color;
        }
        if let Some(family) = &self.font_family {
            overlay.font_family.clone_from(family);
        }
        if let Some(weight) = self.font_weight {
            overlay.font_weight = weight;
        }
        if let Some(style) = self.font_style {
            overlay.font_style = style;
        }
        if let Some(align) = self.align {
            overlay.align = align;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Manages overlay selection and the edit operations of the text panel.
///
/// Overlays themselves live in the editor state so they take part in
/// undo/redo; the selection does not.
#[derive(Debug, Clone, Default)]
pub struct OverlayEditor {
    selected: Option<String>,
}

impl OverlayEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the selected overlay.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected overlay, if it still exists in `overlays`.
    pub fn selected<'a>(&self, overlays: &'a [TextOverlay]) -> Option<&'a TextOverlay> {
        let id = self.selected.as_deref()?;
        overlays.iter().find(|o| o.id == id)
    }

    /// Selects `id`, or clears the selection with `None`.
    /// Unknown ids clear the selection.
    pub fn select(&mut self, overlays: &[TextOverlay], id: Option<&str>) {
        self.selected = id
            .filter(|id| overlays.iter().any(|o| o.id == *id))
            .map(str::to_string);
    }

    /// Appends a default overlay, selects it and returns its id.
    pub fn add_text(&mut self, overlays: &mut Vec<TextOverlay>) -> String {
        let id = format!("text-{}", uuid::Uuid::new_v4());
        overlays.push(TextOverlay::new(id.clone()));
        self.selected = Some(id.clone());
        tracing::debug!(%id, "Added text overlay");
        id
    }

    /// Applies `patch` to the overlay with `id`. Returns false if no overlay matched.
    pub fn update_text(overlays: &mut [TextOverlay], id: &str, patch: &OverlayPatch) -> bool {
        match overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => {
                patch.apply(overlay);
                true
            }
            None => false,
        }
    }

    /// Removes the overlay with `id`, clearing the selection if it pointed there.
    pub fn delete_text(&mut self, overlays: &mut Vec<TextOverlay>, id: &str) -> bool {
        let before = overlays.len();
        overlays.retain(|o| o.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        overlays.len() != before
    }

    /// Moves the overlay with `id` by `delta` along `axis`.
    pub fn nudge_position(overlays: &mut [TextOverlay], id: &str, axis: Axis, delta: f32) -> bool {
        match overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => {
                overlay.position[axis.index()] += delta;
                true
            }
            None => false,
        }
    }

    /// Rotates the overlay with `id` by `delta` radians around `axis`.
    pub fn nudge_rotation(overlays: &mut [TextOverlay], id: &str, axis: Axis, delta: f32) -> bool {
        match overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => {
                overlay.rotation[axis.index()] += delta;
                true
            }
            None => false,
        }
    }

    /// Drops the selection if its overlay is gone, e.g. after an undo.
    pub fn prune_selection(&mut self, overlays: &[TextOverlay]) {
        if self.selected(overlays).is_none() {
            self.selected = None;
        }
    }
}
