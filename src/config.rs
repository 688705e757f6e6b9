//! TOML-based run configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::grid::ProfileGrid;
use crate::io::export::OutputFormat;
use crate::io::import::DEFAULT_TIME_COLUMN;

/// Top-level run configuration parsed from TOML.
///
/// All sections have defaults matching the four-season preset. Load from
/// TOML with [`RunConfig::from_toml_file`] or use [`RunConfig::four_seasons`]
/// for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Source demand series.
    #[serde(default)]
    pub input: InputConfig,
    /// Time-slice grid of the target model.
    #[serde(default)]
    pub grid: GridConfig,
    /// Profile destination.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Source demand series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// CSV file with a time column and a value column.
    pub path: Option<PathBuf>,
    /// Header of the timestamp column.
    pub time_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            time_column: DEFAULT_TIME_COLUMN.to_string(),
        }
    }
}

/// Time-slice grid of the target model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of seasons (rows).
    pub n_seasons: usize,
    /// Number of hours per season (columns).
    pub n_hours: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_seasons: 4,
            n_hours: 24,
        }
    }
}

impl From<ProfileGrid> for GridConfig {
    fn from(grid: ProfileGrid) -> Self {
        Self {
            n_seasons: grid.n_seasons(),
            n_hours: grid.n_hours(),
        }
    }
}

/// Profile destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File to write; the profile is only summarized when absent.
    pub path: Option<PathBuf>,
    /// Encoding of the written file.
    pub format: OutputFormat,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"grid.n_seasons"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl RunConfig {
    /// Four seasons x 24 hours.
    pub fn four_seasons() -> Self {
        Self::default()
    }

    /// 365 days x 24 hours.
    pub fn daily() -> Self {
        Self {
            grid: ProfileGrid::DailyHourly.into(),
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["four_seasons", "daily"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "four_seasons" => Ok(Self::four_seasons()),
            "daily" => Ok(Self::daily()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Grid selected by `[grid]`, if supported.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGrid` for any dimensions other than 4 x 24 or 365 x 24.
    pub fn profile_grid(&self) -> Result<ProfileGrid, crate::error::ProfileError> {
        ProfileGrid::from_dimensions(self.grid.n_seasons, self.grid.n_hours)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.input.path.is_none() {
            errors.push(ConfigError {
                field: "input.path".into(),
                message: "must name a CSV file".into(),
            });
        }
        if self.input.time_column.trim().is_empty() {
            errors.push(ConfigError {
                field: "input.time_column".into(),
                message: "must not be empty".into(),
            });
        }

        if let Err(e) = self.profile_grid() {
            errors.push(ConfigError {
                field: "grid".into(),
                message: e.to_string(),
            });
        }

        errors
    }
}
