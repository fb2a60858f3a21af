//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside its directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Subdivision, radius and color settings.
    pub generation: GenerationConfig,
    /// Which pivot markers to place.
    pub pivots: PivotConfig,
    /// Where and what to export.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Subdivision passes applied to the icosahedron.
    pub total_depth: u32,
    /// Passes after which triangles become patches. Must be below `total_depth`.
    pub split_depth: u32,
    /// Planet radius.
    pub base_radius: f32,
    /// First end of the patch tint range (RGB).
    pub color1: [u8; 3],
    /// Second end of the patch tint range (RGB).
    pub color2: [u8; 3],
    /// Fixed seed for patch colors; unset picks a new one each run.
    pub color_seed: Option<u64>,
    /// Distance from v = 0 or 1 treated as a pole (0 = exact).
    pub pole_tolerance: f32,
    /// Use a fresh midpoint cache per patch instead of one shared cache.
    pub per_patch_cache: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            total_depth: 3,
            split_depth: 1,
            base_radius: 5.0,
            color1: [20, 148, 0],
            color2: [148, 128, 0],
            color_seed: None,
            pole_tolerance: 0.0,
            per_patch_cache: false,
        }
    }
}

/// Pivot marker settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PivotConfig {
    pub emit_center: bool,
    pub emit_corners: bool,
    /// Emit each shared corner only once.
    pub dedupe_corners: bool,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the exported files land in, relative to the working directory.
    pub directory: PathBuf,
    /// Write `planet.obj`.
    pub write_obj: bool,
    /// Write `pivots.ron`.
    pub write_pivots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            write_obj: true,
            write_pivots: true,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for the generator, or `None` if the platform has none.
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("icoplanet"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
