//! Command-line front end: load config, generate one planet, export it.

use std::path::PathBuf;

use clap::Parser;
use icoplanet_config::{CONFIG_FILE_NAME, CliArgs, Config, default_config_dir};
use icoplanet_geometry::{CacheScope, Subdivider};
use icoplanet_planet::{
    ExportOptions, GenerationRequest, PivotOptions, PlanetAssembler, Rgb, export_planet,
};

fn request_from_config(config: &Config) -> GenerationRequest {
    let generation = &config.generation;
    GenerationRequest {
        total_depth: generation.total_depth,
        split_depth: generation.split_depth,
        base_radius: generation.base_radius,
        color1: Rgb::from(generation.color1),
        color2: Rgb::from(generation.color2),
        color_seed: generation.color_seed,
        pole_tolerance: generation.pole_tolerance,
        pivots: PivotOptions {
            emit_center: config.pivots.emit_center,
            emit_corners: config.pivots.emit_corners,
            dedupe_corners: config.pivots.dedupe_corners,
            ..PivotOptions::default()
        },
    }
}

fn cache_scope(config: &Config) -> CacheScope {
    if config.generation.per_patch_cache {
        CacheScope::PerPatch
    } else {
        CacheScope::Shared
    }
}

/// `--config` if given, else the platform config dir, else the working directory.
fn resolve_config_dir(args: &CliArgs) -> PathBuf {
    args.config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() {
    let args = CliArgs::parse();
    let config_dir = resolve_config_dir(&args);

    // Logging is not up yet; the outcome is reported once it is.
    let loaded = Config::load_or_create(&config_dir);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    icoplanet_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    match loaded {
        Ok(_) => tracing::info!("Using config {}", config_path.display()),
        Err(e) => tracing::warn!("Failed to load {}: {e}, using defaults", config_path.display()),
    }

    let request = request_from_config(&config);
    let mut assembler = PlanetAssembler::new(Subdivider::new(cache_scope(&config)));
    let planet = match assembler.generate(&request) {
        Ok(planet) => planet,
        Err(e) => {
            tracing::error!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    let options = ExportOptions {
        write_obj: config.output.write_obj,
        write_pivots: config.output.write_pivots,
    };
    match export_planet(planet, &config.output.directory, &options) {
        Ok(paths) => {
            for path in paths {
                tracing::info!("Wrote {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!("Export failed: {e}");
            std::process::exit(1);
        }
    }
}
