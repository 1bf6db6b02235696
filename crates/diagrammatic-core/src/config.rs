//! Editor configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::snap::DEFAULT_GRID;
use crate::style::StyleColor;
use crate::undo::DEFAULT_UNDO_LIMIT;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default scene rectangle: a landscape sheet in scene units.
pub const DEFAULT_SCENE_RECT: Rect = Rect::new(0.0, 0.0, 11000.0, 8500.0);

/// Predicate used when selecting items by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemSelectionMode {
    /// The region must contain the item's bounding rect.
    #[default]
    ContainsBoundingRect,
    /// The region must contain the item's shape.
    ContainsShape,
    /// The region must touch the item's bounding rect.
    IntersectsBoundingRect,
    /// The region must touch the item's shape.
    IntersectsShape,
}

impl ItemSelectionMode {
    /// Cycle to the next selection mode.
    pub fn next(self) -> Self {
        match self {
            ItemSelectionMode::ContainsBoundingRect => ItemSelectionMode::ContainsShape,
            ItemSelectionMode::ContainsShape => ItemSelectionMode::IntersectsBoundingRect,
            ItemSelectionMode::IntersectsBoundingRect => ItemSelectionMode::IntersectsShape,
            ItemSelectionMode::IntersectsShape => ItemSelectionMode::ContainsBoundingRect,
        }
    }

    /// Whether the predicate requires full containment.
    pub fn is_contains(self) -> bool {
        matches!(
            self,
            ItemSelectionMode::ContainsBoundingRect | ItemSelectionMode::ContainsShape
        )
    }
}

/// Tunable behavior of an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snap grid size in scene units (zero or less disables snapping).
    pub grid: f64,
    /// Maximum number of commands kept on the undo stack.
    pub undo_limit: usize,
    /// Predicate for rubber-band and area selection.
    pub item_selection_mode: ItemSelectionMode,
    /// Whether selection changes are recorded as undoable commands.
    pub undoable_select_commands: bool,
    /// Whether mouse moves emit mouse-info text.
    pub sends_mouse_move_info: bool,
    /// Bounded coordinate space of the scene.
    pub scene_rect: Rect,
    /// Background fill of the scene.
    pub background: StyleColor,
    /// Distance in viewport pixels before a press becomes a drag.
    pub drag_threshold: f64,
    /// Half-size in viewport pixels of the area that picks an item point.
    pub point_hit_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            undo_limit: DEFAULT_UNDO_LIMIT,
            item_selection_mode: ItemSelectionMode::default(),
            undoable_select_commands: true,
            sends_mouse_move_info: true,
            scene_rect: DEFAULT_SCENE_RECT,
            background: StyleColor::WHITE,
            drag_threshold: 4.0,
            point_hit_tolerance: 4.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded editor config from {}", path.as_ref().display());
        Self::from_json(&text)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.grid.is_finite() {
            return Err(ConfigError::Invalid {
                field: "grid",
                reason: format!("{} is not finite", self.grid),
            });
        }
        if self.undo_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "undo_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        let rect = self.scene_rect;
        if ![rect.x0, rect.y0, rect.x1, rect.y1].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "scene_rect",
                reason: "coordinates must be finite".to_string(),
            });
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "drag_threshold",
                reason: format!("{} is not a non-negative distance", self.drag_threshold),
            });
        }
        if !(self.point_hit_tolerance.is_finite() && self.point_hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "point_hit_tolerance",
                reason: format!("{} is not a non-negative distance", self.point_hit_tolerance),
            });
        }
        Ok(())
    }
}
