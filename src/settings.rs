//! Game tuning and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Environment variable naming a settings file to load
pub const SETTINGS_ENV_VAR: &str = "RUNNER_SETTINGS";

/// Run tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Movement ===
    /// Forward speed while running (units per frame at ratio 1.0)
    pub default_speed: f32,
    /// Gravity constant; divided by 100 to get the per-frame vertical delta
    pub gravity: f32,
    /// Vertical delta added each frame while a jump is rising
    pub jump_force: f32,
    /// Altitude at which a jump stops rising
    pub jump_max_altitude: f32,
    /// Altitude the player rests at on top of a tile
    pub resting_altitude: f32,
    /// Falling to or below this altitude kills the player
    pub death_altitude: f32,

    // === Track ===
    /// Forward depth of one tile
    pub tile_depth: f32,
    /// Tiles generated per batch
    pub tiles_per_batch: u32,
    /// Track seed (random when absent)
    pub seed: Option<u64>,

    // === Debug ===
    /// Invulnerability: no gravity and no death callback
    pub god_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_speed: DEFAULT_SPEED,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            jump_max_altitude: JUMP_MAX_ALTITUDE,
            resting_altitude: RESTING_ALTITUDE,
            death_altitude: DEATH_ALTITUDE,

            tile_depth: TILE_DEPTH,
            tiles_per_batch: TILES_PER_BATCH,
            seed: None,

            god_mode: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path`, or from `RUNNER_SETTINGS` when no path is given.
    ///
    /// Falls back to defaults (with a warning) when the file is missing or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let env_path = std::env::var_os(SETTINGS_ENV_VAR);
        let path = path.or(env_path.as_deref().map(Path::new));

        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_speed.is_nan() || self.default_speed <= 0.0 {
            return Err(SettingsError::invalid(
                "default_speed",
                format!("must be positive, got {}", self.default_speed),
            ));
        }
        if self.tile_depth.is_nan() || self.tile_depth <= 0.0 {
            return Err(SettingsError::invalid(
                "tile_depth",
                format!("must be positive, got {}", self.tile_depth),
            ));
        }
        if self.tiles_per_batch == 0 {
            return Err(SettingsError::invalid("tiles_per_batch", "must be at least 1"));
        }
        if self.jump_max_altitude.is_nan()
            || self.resting_altitude.is_nan()
            || self.jump_max_altitude <= self.resting_altitude
        {
            return Err(SettingsError::invalid(
                "jump_max_altitude",
                format!(
                    "must be above the resting altitude ({}), got {}",
                    self.resting_altitude, self.jump_max_altitude
                ),
            ));
        }
        if self.death_altitude.is_nan() || self.death_altitude >= self.resting_altitude {
            return Err(SettingsError::invalid(
                "death_altitude",
                "must be below the resting altitude",
            ));
        }
        Ok(())
    }

    /// Forward speed while dragging
    pub fn drag_speed(&self) -> f32 {
        self.default_speed * DRAG_SPEED_FACTOR
    }

    /// Per-frame vertical delta from gravity
    pub fn gravity_delta(&self) -> f32 {
        self.gravity / 100.0
    }

    /// Track seed, drawing a random one when none is configured
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.default_speed, 15.0);
        assert_eq!(settings.drag_speed(), 22.5);
        assert!((settings.gravity_delta() - -0.12).abs() < 1e-6);
        assert_eq!(settings.tiles_per_batch, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json_str(r#"{ "god_mode": true, "seed": 7 }"#).unwrap();
        assert!(settings.god_mode);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tile_depth, TILE_DEPTH);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json_str(r#"{ "tiles_per_batch": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "tiles_per_batch",
                ..
            }
        ));

        let err = Settings::from_json_str(r#"{ "default_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "default_speed", .. }));
    }

    #[test]
    fn test_nan_and_inverted_values_rejected() {
        let nan_speed = Settings {
            default_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_speed.validate(),
            Err(SettingsError::Invalid { field: "default_speed", .. })
        ));

        let nan_depth = Settings {
            tile_depth: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_depth.validate(),
            Err(SettingsError::Invalid { field: "tile_depth", .. })
        ));

        let low_jump = Settings {
            jump_max_altitude: 0.25,
            ..Default::default()
        };
        assert!(matches!(
            low_jump.validate(),
            Err(SettingsError::Invalid { field: "jump_max_altitude", .. })
        ));

        let high_death = Settings {
            death_altitude: 0.25,
            ..Default::default()
        };
        assert!(matches!(
            high_death.validate(),
            Err(SettingsError::Invalid { field: "death_altitude", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_fixed_seed_is_stable() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 42);
    }
}
