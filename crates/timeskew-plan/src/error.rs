//! Error types for plan construction and composition.

use std::fmt;
use timeskew_core::AxisShape;

/// Errors arising while generating or composing tiling plans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// The tile height is not an even number of half-steps. A full
    /// timestep is one electric plus one magnetic half-step, so tiles
    /// must always close on a magnetic update.
    OddTileHeight {
        /// The rejected height.
        half_steps: usize,
    },
    /// The tile height is too large for the tile width: the shape would
    /// degenerate before reaching its final half-step.
    TileHeightTooLarge {
        /// Which shape rejected the parameters.
        shape: AxisShape,
        /// Tile width T.
        tile_width: usize,
        /// Tile height H in half-steps.
        half_steps: usize,
    },
    /// The axis is too short to place even the first tile of the
    /// requested shape.
    AxisTooNarrow {
        /// Which shape rejected the parameters.
        shape: AxisShape,
        /// Axis width W.
        total_width: usize,
        /// Tile width T.
        tile_width: usize,
    },
    /// A tile's left edge would shift below cell 0. The left-boundary
    /// clip only applies to tile 0; any other tile reaching the boundary
    /// means the height/width combination is inconsistent.
    LeftBoundaryUnderflow {
        /// Ordinal of the offending tile in layout order.
        tile: usize,
        /// Half-step at which the underflow occurred.
        half_step: usize,
    },
    /// Per-axis plans passed to a combiner advance different numbers of
    /// half-steps.
    TemporalMisalignment {
        /// Axis index (0 = I, 1 = J, 2 = K) of the mismatched plan.
        axis: usize,
        /// Height of the mismatched plan.
        found: usize,
        /// Height of the first plan, which the rest must match.
        expected: usize,
    },
    /// The requested axis-shape combination is not supported by any
    /// combiner.
    UnsupportedComposition {
        /// Human-readable description of the rejected combination.
        reason: String,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddTileHeight { half_steps } => {
                write!(f, "tile height must be even, got {half_steps} half-steps")
            }
            Self::TileHeightTooLarge {
                shape,
                tile_width,
                half_steps,
            } => write!(
                f,
                "tile height {half_steps} is too large for {shape} tile width {tile_width}"
            ),
            Self::AxisTooNarrow {
                shape,
                total_width,
                tile_width,
            } => write!(
                f,
                "axis width {total_width} cannot fit a {shape} tile of width {tile_width}"
            ),
            Self::LeftBoundaryUnderflow { tile, half_step } => write!(
                f,
                "tile {tile} would shift past the left boundary at half-step {half_step}"
            ),
            Self::TemporalMisalignment {
                axis,
                found,
                expected,
            } => write!(
                f,
                "per-axis plans must be time-aligned: axis {axis} has height {found}, expected {expected}"
            ),
            Self::UnsupportedComposition { reason } => {
                write!(f, "unsupported composition: {reason}")
            }
        }
    }
}

impl std::error::Error for PlanError {}
