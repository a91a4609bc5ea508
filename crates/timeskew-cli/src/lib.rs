//! Shared argument parsing and output helpers for the timeskew tools.
//!
//! All five binaries (`verify`, `sanity`, `demo`, `shapes`, `traffic`)
//! take the same planning flags; each adds its own extras. Note that
//! `-h` is the tile height, so help is available through `--help` only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use clap::Args;
use timeskew_core::AxisShape;
use timeskew_engine::{RunConfig, TiledSchedule};

/// Per-axis tile widths with their shape suffixes, parsed from
/// `wI(t|p),wJ(t|p),wK(t|p)`.
#[derive(Clone, Copy, Debug)]
pub struct TileSpec {
    /// Tile widths per axis.
    pub widths: [usize; 3],
    /// Tile shapes per axis.
    pub shapes: [AxisShape; 3],
}

/// Planning flags shared by every tool.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Grid dimensions, e.g. 400,400,400
    #[arg(short = 'g', long = "grid-size", value_parser = parse_grid_size, value_name = "I,J,K")]
    pub grid_size: [usize; 3],

    /// Tile widths with shape suffix ("t" trapezoid, "p" parallelogram),
    /// e.g. 20t,20t,20t or 20t,20t,20p
    #[arg(short = 't', long = "tile-size", value_parser = parse_tile_spec, value_name = "It,Jt,Kt|Kp")]
    pub tile_size: TileSpec,

    /// Tile height in half-steps (positive and even), e.g. 18
    #[arg(short = 'h', long = "tile-height", value_name = "HALF_STEPS")]
    pub tile_height: usize,
}

impl PlanArgs {
    /// Assemble the full run configuration.
    pub fn to_config(&self, timesteps: usize) -> RunConfig {
        RunConfig {
            grid_size: self.grid_size,
            tile_size: self.tile_size.widths,
            tile_shape: self.tile_size.shapes,
            tile_half_steps: self.tile_height,
            timesteps,
        }
    }
}

fn parse_grid_size(raw: &str) -> Result<[usize; 3], String> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated sizes, got {raw:?}"));
    }
    let mut sizes = [0usize; 3];
    for (slot, part) in sizes.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid grid dimension {part:?}"))?;
        if *slot == 0 {
            return Err(format!("grid dimension must be positive, got {part:?}"));
        }
    }
    Ok(sizes)
}

fn parse_tile_spec(raw: &str) -> Result<TileSpec, String> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated widths, got {raw:?}"));
    }
    let mut widths = [0usize; 3];
    let mut shapes = [AxisShape::Trapezoid; 3];
    for (axis, part) in parts.iter().enumerate() {
        let part = part.trim();
        let Some(suffix) = part.chars().last() else {
            return Err("empty tile width".into());
        };
        let Some(shape) = AxisShape::from_suffix(suffix) else {
            return Err(format!("tile suffix must be 't' or 'p', got {suffix:?}"));
        };
        let width = part[..part.len() - suffix.len_utf8()]
            .parse::<usize>()
            .map_err(|_| format!("invalid tile width {part:?}"))?;
        if width == 0 {
            return Err(format!("tile width must be positive, got {part:?}"));
        }
        widths[axis] = width;
        shapes[axis] = shape;
    }
    if shapes[0] != AxisShape::Trapezoid || shapes[1] != AxisShape::Trapezoid {
        return Err("dimensions i and j only support trapezoid tiling (suffix t)".into());
    }
    Ok(TileSpec { widths, shapes })
}

/// Install the logger. `--dump` raises the filter so the per-range
/// execution traces in the kernels and executors become visible.
pub fn init_logging(dump: bool) {
    let level = if dump { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Print the grid/tile/timesteps header every tool starts with.
pub fn print_run_header(config: &RunConfig) {
    println!(
        "grid\t\t{:04} x {:04} x {:04}",
        config.grid_size[0], config.grid_size[1], config.grid_size[2]
    );
    println!(
        "tile\t\t{:04} x {:04} x {:04}",
        config.tile_size[0], config.tile_size[1], config.tile_size[2]
    );
    println!("timesteps\t{}", config.timesteps);
}

/// Print how a run decomposes into main and remainder batches.
pub fn print_batches(schedule: &TiledSchedule) {
    println!(
        "main batch\t{:04} x {:04} = {:04} timesteps",
        schedule.timesteps_per_batch(),
        schedule.main_batches(),
        schedule.timesteps_per_batch() * schedule.main_batches()
    );
    println!(
        "rem batch\t{:04} x {:04} = {:04} timesteps",
        schedule.remainder_timesteps(),
        usize::from(schedule.remainder_plan().is_some()),
        schedule.remainder_timesteps()
    );
}
