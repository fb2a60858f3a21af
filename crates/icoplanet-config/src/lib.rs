//! Configuration for the icoplanet generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and tolerate missing or unknown fields so older and newer
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig, OutputConfig, PivotConfig,
    default_config_dir,
};
pub use error::ConfigError;
