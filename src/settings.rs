//! Simulation settings
//!
//! Loaded from a JSON file on native targets; anything missing falls back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::event::PointerAxes;

/// Environment variable naming a settings file (native only)
pub const SETTINGS_ENV: &str = "LIQUID_GRID_SETTINGS";

/// Grid geometry and brush configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Liquid disk radius in cells (cells with dx² + dy² < r² are liquid)
    pub brush_radius: i32,
    /// Centre of the circle the level set is seeded from
    pub seed_origin: Vec2,
    /// Radius of the seed circle
    pub seed_radius: f32,
    /// Canvas-to-cell axis pairing for pointer mapping
    pub pointer_axes: PointerAxes,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            seed_origin: DEFAULT_SEED_ORIGIN,
            seed_radius: DEFAULT_SEED_RADIUS,
            pointer_axes: PointerAxes::default(),
        }
    }
}

impl SimSettings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::Invalid {
                field: "width/height",
                reason: format!("grid must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if self.brush_radius < 0 {
            return Err(SettingsError::Invalid {
                field: "brush_radius",
                reason: format!("must be non-negative, got {}", self.brush_radius),
            });
        }
        // Larger radii cover no additional cells.
        let max_radius = self.width.saturating_add(self.height);
        if usize::try_from(self.brush_radius).is_ok_and(|r| r > max_radius) {
            return Err(SettingsError::Invalid {
                field: "brush_radius",
                reason: format!("must be at most {}, got {}", max_radius, self.brush_radius),
            });
        }
        if !self.seed_origin.is_finite() || !self.seed_radius.is_finite() {
            return Err(SettingsError::Invalid {
                field: "seed_origin/seed_radius",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Load from the file named by `LIQUID_GRID_SETTINGS`, or use defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Web builds are configured by the host page
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
