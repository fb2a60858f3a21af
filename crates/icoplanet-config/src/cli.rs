//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// icoplanet command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "icoplanet", about = "Icosphere planet patch generator")]
pub struct CliArgs {
    /// Total subdivision depth.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Depth at which the sphere is split into patches.
    #[arg(long)]
    pub split: Option<u32>,

    /// Planet radius.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Seed for patch colors.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pole detection tolerance on v.
    #[arg(long)]
    pub pole_tolerance: Option<f32>,

    /// Give every patch its own midpoint cache.
    #[arg(long)]
    pub per_patch_cache: Option<bool>,

    /// Emit a pivot at each patch center.
    #[arg(long)]
    pub center_pivots: Option<bool>,

    /// Emit pivots at each patch corner.
    #[arg(long)]
    pub corner_pivots: Option<bool>,

    /// Emit shared corners only once.
    #[arg(long)]
    pub dedupe_corners: Option<bool>,

    /// Output directory.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(depth) = args.depth {
            generation.total_depth = depth;
        }
        if let Some(split) = args.split {
            generation.split_depth = split;
        }
        if let Some(radius) = args.radius {
            generation.base_radius = radius;
        }
        if let Some(seed) = args.seed {
            generation.color_seed = Some(seed);
        }
        if let Some(tolerance) = args.pole_tolerance {
            generation.pole_tolerance = tolerance;
        }
        if let Some(per_patch) = args.per_patch_cache {
            generation.per_patch_cache = per_patch;
        }

        if let Some(center) = args.center_pivots {
            self.pivots.emit_center = center;
        }
        if let Some(corners) = args.corner_pivots {
            self.pivots.emit_corners = corners;
        }
        if let Some(dedupe) = args.dedupe_corners {
            self.pivots.dedupe_corners = dedupe;
        }

        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
