//! 1D tile, stage, and plan containers.

use smallvec::SmallVec;
use timeskew_core::{AxisShape, Range1D};

/// One time-space tile on a single axis.
///
/// `ranges[h]` is the span of cells this tile updates at half-step `h`;
/// the vector's length is the tile height H. Even indices are electric
/// half-steps, odd indices magnetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile1D {
    /// Ordinal position of this tile within its stage.
    pub id: usize,
    /// Per-half-step spans, earliest first.
    pub ranges: Vec<Range1D>,
}

impl Tile1D {
    pub(crate) fn new(id: usize, seed: Range1D, height: usize) -> Self {
        let mut ranges = Vec::with_capacity(height);
        ranges.push(seed);
        Self { id, ranges }
    }

    /// Tile height in half-steps.
    pub fn height(&self) -> usize {
        self.ranges.len()
    }

    /// The span at half-step 0 (the tile's spatial footprint seed).
    pub fn first_range(&self) -> Range1D {
        self.ranges[0]
    }
}

/// All tiles of one stage, in layout order. Tiles within a stage are
/// mutually independent.
pub type TileList1D = Vec<Tile1D>;

/// A complete 1D tiling plan: an ordered sequence of stages.
///
/// Parallelogram plans have one stage whose tiles must execute serially
/// left to right; trapezoid plans have two stages (mountains, then
/// valleys) whose tiles are independent within each stage.
#[derive(Clone, Debug)]
pub struct Plan1D {
    shape: AxisShape,
    total_width: usize,
    half_steps: usize,
    stages: SmallVec<[TileList1D; 2]>,
}

impl Plan1D {
    pub(crate) fn new(
        shape: AxisShape,
        total_width: usize,
        half_steps: usize,
        stages: SmallVec<[TileList1D; 2]>,
    ) -> Self {
        debug_assert_eq!(stages.len(), shape.stage_count());
        Self {
            shape,
            total_width,
            half_steps,
            stages,
        }
    }

    /// The tile shape this plan was generated with.
    pub fn shape(&self) -> AxisShape {
        self.shape
    }

    /// Width of the tiled axis in cells.
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// Number of half-steps every tile advances.
    pub fn half_steps(&self) -> usize {
        self.half_steps
    }

    /// Number of stages (1 for parallelogram, 2 for trapezoid).
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The tiles of one stage.
    ///
    /// # Panics
    ///
    /// Panics if `stage >= self.stage_count()`.
    pub fn stage(&self, stage: usize) -> &TileList1D {
        &self.stages[stage]
    }

    /// Iterate over all stages in execution order.
    pub fn stages(&self) -> impl Iterator<Item = &TileList1D> {
        self.stages.iter()
    }

    /// Total number of tiles across all stages.
    pub fn tile_count(&self) -> usize {
        self.stages.iter().map(Vec::len).sum()
    }
}
