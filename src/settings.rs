//! Game settings
//!
//! Read from an optional JSON file; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH, TARGET_FPS};
use crate::error::GameError;
use crate::tracking::TrackingSettings;
use crate::tuning::Tuning;

/// Display surface options.
///
/// The monitor is never queried: `width` and `height` must be set to its
/// native resolution for the full-screen window to cover it, and for
/// fingertip positions to land where the hand points. The defaults assume a
/// 1920x1080 screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Display size in pixels; the play field covers all of it
    pub width: i32,
    pub height: i32,
    /// Borderless window on top of everything
    pub fullscreen: bool,
    /// Frame cap (0 = uncapped)
    pub target_fps: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            fullscreen: true,
            target_fps: TARGET_FPS,
        }
    }
}

impl DisplaySettings {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub tuning: Tuning,
    pub tracking: TrackingSettings,
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse a settings file and validate it
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = fs::read_to_string(path).map_err(|source| GameError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| GameError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, GameError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let io_err = |source| GameError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        let json = self.to_json();
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let (width, height) = (self.display.width, self.display.height);
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDisplay { width, height });
        }
        self.tuning.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.display.bounds(), Bounds::new(1920, 1080));
        assert_eq!(settings.display.target_fps, 60);
        assert!(settings.tracking.mirror);
        assert!(!settings.tracking.legacy_reference_frame);
        assert!(settings.seed.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.display.width = 1280;
        settings.seed = Some(42);
        settings.tuning.end_on_max_missed = true;

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "display": { "width": 800, "height": 600 } }"#).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded.display.bounds(), Bounds::new(800, 600));
        assert_eq!(loaded.tuning, Tuning::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(&dir.path().join("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, GameError::SettingsIo { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("malformed.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, GameError::SettingsParse { .. }));
    }

    #[test]
    fn test_inverted_speeds_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad-speeds.json");
        fs::write(&path, r#"{ "tuning": { "min_speed": 9, "max_speed": 3 } }"#).unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_invalid_display() {
        let mut settings = Settings::default();
        settings.display.height = 0;
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidDisplay { .. })
        ));
    }
}
