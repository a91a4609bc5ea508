//! Shared fixtures for the timeskew benchmarks.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use timeskew_core::AxisShape;
use timeskew_engine::RunConfig;

/// A mid-sized TTP configuration used across benchmarks.
pub fn reference_config() -> RunConfig {
    RunConfig {
        grid_size: [100, 100, 100],
        tile_size: [20, 20, 10],
        tile_shape: [
            AxisShape::Trapezoid,
            AxisShape::Trapezoid,
            AxisShape::Parallelogram,
        ],
        tile_half_steps: 8,
        timesteps: 40,
    }
}
