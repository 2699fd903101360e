//! Simulation settings
//!
//! Persisted as JSON. Every field has a default, so partial files load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Simulation and display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of simulated points
    pub num_points: usize,
    /// RNG seed for the initial cloud
    pub seed: u64,
    /// Initial neighbor count
    pub initial_k: usize,

    // === Timing ===
    /// Physics ticks per second
    pub tick_hz: f64,
    /// Ticks allowed per frame when catching up
    pub max_substeps: u32,

    // === Display ===
    /// Half-length of point marker arms (world units)
    pub point_size: f32,
    /// Edges used to draw the enclosing circle
    pub circle_segments: u32,
    /// Initial window size in pixels
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_points: NUM_POINTS,
            seed: DEFAULT_SEED,
            initial_k: INITIAL_K,

            tick_hz: TICK_HZ,
            max_substeps: MAX_SUBSTEPS,

            point_size: POINT_SIZE,
            circle_segments: CIRCLE_SEGMENTS,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
        }
    }
}

impl Settings {
    /// Seconds per physics tick
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_hz
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.validated())
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.num_points == 0 {
            log::warn!("num_points must be at least 1, using {}", defaults.num_points);
            self.num_points = defaults.num_points;
        }
        if self.initial_k == 0 {
            log::warn!("initial_k must be at least 1, using 1");
            self.initial_k = 1;
        }
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            log::warn!("tick_hz must be positive, using {}", defaults.tick_hz);
            self.tick_hz = defaults.tick_hz;
        }
        if self.max_substeps == 0 {
            log::warn!("max_substeps must be at least 1, using 1");
            self.max_substeps = 1;
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            log::warn!("point_size must be positive, using {}", defaults.point_size);
            self.point_size = defaults.point_size;
        }
        if self.circle_segments < 3 {
            log::warn!("circle_segments must be at least 3, using 3");
            self.circle_segments = 3;
        }
        if self.window_width == 0 || self.window_height == 0 {
            log::warn!(
                "window size must be non-zero, using {}x{}",
                defaults.window_width,
                defaults.window_height
            );
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_configuration() {
        let s = Settings::default();
        assert_eq!(s.num_points, 1000);
        assert_eq!(s.initial_k, 2);
        assert!((s.tick_period() - 0.02).abs() < 1e-12);
        assert_eq!(s.circle_segments, 720);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "num_points": 10, "seed": 3 }"#).unwrap();
        assert_eq!(s.num_points, 10);
        assert_eq!(s.seed, 3);
        assert_eq!(s.initial_k, INITIAL_K);
        assert_eq!(s.tick_hz, TICK_HZ);
    }

    #[test]
    fn test_validated_fixes_bad_values() {
        let s = Settings {
            num_points: 0,
            initial_k: 0,
            tick_hz: -5.0,
            max_substeps: 0,
            point_size: f32::NAN,
            circle_segments: 1,
            window_width: 0,
            ..Default::default()
        }
        .validated();

        assert_eq!(s.num_points, NUM_POINTS);
        assert_eq!(s.initial_k, 1);
        assert_eq!(s.tick_hz, TICK_HZ);
        assert_eq!(s.max_substeps, 1);
        assert_eq!(s.point_size, POINT_SIZE);
        assert_eq!(s.circle_segments, 3);
        assert_eq!(s.window_width, WINDOW_WIDTH);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("knn-cloud-settings-does-not-exist.json");
        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
    }
}
