//! Game settings and presets
//!
//! Overrides can be stored as JSON in LocalStorage. They are laid over the
//! preset picked from the URL, so missing fields keep that preset's values.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, Result};
use crate::input::KeyMap;
use crate::maze::{CellSize, Palette, ProjectionStyle};

/// Built-in maze configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MazePreset {
    /// Small square wireframe maze steered with WASD
    Classic,
    /// Window-sized colored maze steered with the arrow keys
    #[default]
    Fullscreen,
}

impl MazePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazePreset::Classic => "Classic",
            MazePreset::Fullscreen => "Fullscreen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "small" => Some(MazePreset::Classic),
            "fullscreen" | "full" => Some(MazePreset::Fullscreen),
            _ => None,
        }
    }

    /// Preset named by a `preset=` pair in a URL query string
    pub fn from_query(search: &str) -> Option<Self> {
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "preset")
            .and_then(|(_, value)| Self::from_str(value))
    }
}

/// How big the play area is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayArea {
    Fixed { width: f32, height: f32 },
    /// Viewport size minus a margin on each axis
    FitWindow { margin: f32 },
}

impl PlayArea {
    /// Concrete (width, height) for a viewport
    pub fn resolve(&self, viewport: (f32, f32)) -> (f32, f32) {
        match *self {
            PlayArea::Fixed { width, height } => (width, height),
            PlayArea::FitWindow { margin } => (viewport.0 - margin, viewport.1 - margin),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset these settings started from
    pub preset: MazePreset,

    // === Grid ===
    pub rows: usize,
    pub cols: usize,
    pub play_area: PlayArea,

    // === Geometry ===
    pub wall_thickness: f32,
    pub boundary_thickness: f32,
    /// Collision group shared by all walls
    pub wall_group: i32,

    // === Gameplay ===
    /// Velocity change per key-down
    pub ball_step: f32,
    /// Vertical gravity after the win
    pub win_gravity: f32,
    pub keys: KeyMap,

    // === Visuals ===
    /// Draw outlines only
    pub wireframes: bool,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(MazePreset::default())
    }
}

impl Settings {
    /// Settings for a preset
    pub fn from_preset(preset: MazePreset) -> Self {
        match preset {
            MazePreset::Classic => Self {
                preset,
                rows: 6,
                cols: 6,
                play_area: PlayArea::Fixed {
                    width: 600.0,
                    height: 600.0,
                },
                wall_thickness: WALL_THICKNESS,
                boundary_thickness: 2.0,
                wall_group: WALL_GROUP,
                ball_step: BALL_STEP,
                win_gravity: WIN_GRAVITY,
                keys: KeyMap::wasd(),
                wireframes: true,
                palette: Palette::default(),
            },
            MazePreset::Fullscreen => Self {
                preset,
                rows: 15,
                cols: 20,
                play_area: PlayArea::FitWindow { margin: 10.0 },
                wall_thickness: WALL_THICKNESS,
                boundary_thickness: BOUNDARY_THICKNESS,
                wall_group: WALL_GROUP,
                ball_step: BALL_STEP,
                win_gravity: WIN_GRAVITY,
                keys: KeyMap::arrows(),
                wireframes: false,
                palette: Palette {
                    wall: Some("rgb(130, 28, 148)".to_string()),
                    goal: Some("rgb(47, 196, 117)".to_string()),
                    ball: Some("rgb(245, 200, 66)".to_string()),
                },
            },
        }
    }

    /// Geometry knobs for the projector
    pub fn projection_style(&self) -> ProjectionStyle {
        ProjectionStyle {
            wall_thickness: self.wall_thickness,
            boundary_thickness: self.boundary_thickness,
            wall_group: self.wall_group,
            palette: self.palette.clone(),
        }
    }

    /// Check every value and resolve the cell size for a viewport.
    /// Nothing is clamped; the first bad value is reported.
    pub fn validate(&self, viewport: (f32, f32)) -> Result<CellSize> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let (width, height) = self.play_area.resolve(viewport);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MazeError::InvalidPlayArea { width, height });
        }

        for (what, value) in [("wall", self.wall_thickness), ("boundary", self.boundary_thickness)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::InvalidThickness { what, value });
            }
        }

        if !(self.ball_step.is_finite() && self.ball_step > 0.0) {
            return Err(MazeError::InvalidStep(self.ball_step));
        }

        if !(self.win_gravity.is_finite() && self.win_gravity > 0.0) {
            return Err(MazeError::InvalidGravity(self.win_gravity));
        }

        Ok(CellSize::fit(width, height, self.rows, self.cols))
    }

    /// Lay the top-level fields of a stored JSON object over a preset
    pub fn with_overrides(preset: MazePreset, json: &str) -> serde_json::Result<Self> {
        let mut merged = serde_json::to_value(Self::from_preset(preset))?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;

        match (merged.as_object_mut(), overrides) {
            (Some(base), serde_json::Value::Object(fields)) => base.extend(fields),
            (_, other) => {
                return Err(serde::de::Error::custom(format!(
                    "expected a settings object, found {}",
                    other
                )));
            }
        }

        let mut settings: Self = serde_json::from_value(merged)?;
        settings.preset = preset;
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ball_maze_settings";

    /// Load settings from LocalStorage (WASM only), falling back to `preset`
    #[cfg(target_arch = "wasm32")]
    pub fn load(preset: MazePreset) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::with_overrides(preset, &json) {
                    Ok(settings) => {
                        log::info!("Loaded {} settings from LocalStorage", preset.as_str());
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using {} preset", preset.as_str());
        Self::from_preset(preset)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(preset: MazePreset) -> Self {
        Self::from_preset(preset)
    }
}
