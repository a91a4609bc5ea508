//! Run configuration and its validation.

use std::error::Error;
use std::fmt;

use timeskew_core::AxisShape;
use timeskew_plan::PlanError;

/// Everything a tiled run is parameterized by.
///
/// Built once by the argument-parsing layer and threaded explicitly
/// through the executors; nothing in the engine reads configuration
/// from anywhere else.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Grid dimensions `(I, J, K)` in cells.
    pub grid_size: [usize; 3],
    /// Per-axis tile widths.
    pub tile_size: [usize; 3],
    /// Per-axis tile shapes; I and J must be trapezoid.
    pub tile_shape: [AxisShape; 3],
    /// Tile height H in half-steps; positive and even.
    pub tile_half_steps: usize,
    /// Total timesteps to advance (each one electric plus one magnetic
    /// half-step).
    pub timesteps: usize,
}

impl RunConfig {
    /// Check the structural invariants that do not require building a
    /// plan. Geometry-level problems (tile constraints, remainder
    /// tiling) surface later from [`TiledSchedule::build`].
    ///
    /// [`TiledSchedule::build`]: crate::tiled::TiledSchedule::build
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, &size) in self.grid_size.iter().enumerate() {
            if size < 2 {
                return Err(ConfigError::GridTooSmall { axis, size });
            }
        }
        if self.tile_half_steps == 0 || self.tile_half_steps % 2 != 0 {
            return Err(ConfigError::InvalidTileHeight {
                half_steps: self.tile_half_steps,
            });
        }
        if self.timesteps == 0 {
            return Err(ConfigError::ZeroTimesteps);
        }
        if self.tile_shape[0] != AxisShape::Trapezoid || self.tile_shape[1] != AxisShape::Trapezoid
        {
            return Err(ConfigError::UnsupportedShape {
                shapes: self.tile_shape,
            });
        }
        Ok(())
    }
}

/// Errors raised while validating a [`RunConfig`] or turning it into an
/// executable schedule.
#[derive(Debug)]
pub enum ConfigError {
    /// A grid axis is shorter than the two cells the leap-frog boundary
    /// rules need.
    GridTooSmall {
        /// Offending axis (0 = I, 1 = J, 2 = K).
        axis: usize,
        /// Rejected size.
        size: usize,
    },
    /// The tile height is zero or odd.
    InvalidTileHeight {
        /// Rejected height in half-steps.
        half_steps: usize,
    },
    /// A run of zero timesteps was requested.
    ZeroTimesteps,
    /// The per-axis shape combination is not one the combiner supports.
    UnsupportedShape {
        /// Rejected shape tags.
        shapes: [AxisShape; 3],
    },
    /// The main plan could not be generated.
    Plan(PlanError),
    /// The run's tail of `half_steps` half-steps could not be tiled: the
    /// remainder height violates the tile-shape constraints, so the
    /// whole configuration is rejected.
    RemainderNotTileable {
        /// Height of the rejected remainder batch.
        half_steps: usize,
        /// The generator's refusal.
        source: PlanError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { axis, size } => {
                write!(f, "grid axis {axis} must span at least 2 cells, got {size}")
            }
            Self::InvalidTileHeight { half_steps } => {
                write!(
                    f,
                    "tile height must be a positive even number of half-steps, got {half_steps}"
                )
            }
            Self::ZeroTimesteps => write!(f, "total timesteps must be positive"),
            Self::UnsupportedShape { shapes } => write!(
                f,
                "axes I and J support only trapezoid tiling, got ({}, {}, {})",
                shapes[0], shapes[1], shapes[2]
            ),
            Self::Plan(source) => write!(f, "cannot build main plan: {source}"),
            Self::RemainderNotTileable { half_steps, source } => write!(
                f,
                "cannot tile the remaining {half_steps} half-steps: {source}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Plan(source) | Self::RemainderNotTileable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PlanError> for ConfigError {
    fn from(source: PlanError) -> Self {
        Self::Plan(source)
    }
}
