//! 3D subtile, tile, stage, and plan containers.

use smallvec::SmallVec;
use timeskew_core::Range3D;

/// One parallelogram time-slab within a 3D tile.
///
/// Holds one [`Range3D`] per half-step plus a bounding box maintained
/// incrementally as ranges are pushed. TTT tiles contain exactly one
/// subtile; TTP tiles contain one subtile per K-axis parallelogram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtile3D {
    first: [usize; 3],
    last: [usize; 3],
    ranges: Vec<Range3D>,
}

impl Default for Subtile3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Subtile3D {
    /// An empty subtile with an inverted bounding box.
    pub fn new() -> Self {
        Self {
            first: [usize::MAX; 3],
            last: [0; 3],
            ranges: Vec::new(),
        }
    }

    /// Append the next half-step's range, widening the bounding box.
    pub fn push(&mut self, range: Range3D) {
        for axis in 0..3 {
            self.first[axis] = self.first[axis].min(range.first[axis]);
            self.last[axis] = self.last[axis].max(range.last[axis]);
        }
        self.ranges.push(range);
    }

    /// The cached bounding box: componentwise min of `first` and max of
    /// `last` over all member ranges.
    ///
    /// # Panics
    ///
    /// Panics if the subtile holds no ranges.
    pub fn bounding_box(&self) -> Range3D {
        assert!(!self.ranges.is_empty(), "bounding box of an empty subtile");
        Range3D::new(self.first, self.last)
    }

    /// Number of half-steps.
    pub fn height(&self) -> usize {
        self.ranges.len()
    }

    /// The range at one half-step.
    pub fn half_step(&self, half_step: usize) -> Range3D {
        self.ranges[half_step]
    }

    /// Iterate over per-half-step ranges in time order.
    pub fn ranges(&self) -> impl Iterator<Item = &Range3D> {
        self.ranges.iter()
    }

    /// Iterate over `(electric, magnetic)` range pairs in time order.
    ///
    /// This is the shape a driver consumes: the even half-step of each
    /// pair is the electric update, the odd half-step the magnetic
    /// update that follows it.
    pub fn half_step_pairs(&self) -> impl Iterator<Item = (Range3D, Range3D)> + '_ {
        self.ranges.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

/// One unit of worker-assignable work: an ordered sequence of subtiles.
///
/// Subtiles must execute in order on a single worker; consecutive
/// subtiles are the serially-dependent K-axis parallelograms of one
/// (I, J) column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile3D {
    /// Per-axis tile ordinals `(tI, tJ, tK)` identifying this tile
    /// within its stage. TTP tiles aggregate the whole K axis and carry
    /// 0 in the K slot.
    pub id: [usize; 3],
    /// Subtiles in mandatory execution order.
    pub subtiles: Vec<Subtile3D>,
}

impl Tile3D {
    /// Iterate over subtiles in execution order.
    pub fn subtiles(&self) -> impl Iterator<Item = &Subtile3D> {
        self.subtiles.iter()
    }
}

/// All tiles of one stage; mutually independent.
pub type TileList3D = Vec<Tile3D>;

/// A complete 3D execution plan: stages separated by barriers.
#[derive(Clone, Debug)]
pub struct Plan3D {
    half_steps: usize,
    stages: SmallVec<[TileList3D; 8]>,
}

impl Plan3D {
    pub(crate) fn new(half_steps: usize, stages: SmallVec<[TileList3D; 8]>) -> Self {
        Self { half_steps, stages }
    }

    /// Number of half-steps every subtile advances.
    pub fn half_steps(&self) -> usize {
        self.half_steps
    }

    /// Number of stages (8 for TTT, 4 for TTP, fewer after pruning).
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The tiles of one stage.
    pub fn stage(&self, stage: usize) -> &TileList3D {
        &self.stages[stage]
    }

    /// Iterate over stages in execution order.
    pub fn stages(&self) -> impl Iterator<Item = &TileList3D> {
        self.stages.iter()
    }

    /// Total number of tiles across all stages.
    pub fn tile_count(&self) -> usize {
        self.stages.iter().map(Vec::len).sum()
    }

    /// Drop stages that contain no tiles.
    ///
    /// Composition can leave a stage empty (for example when one axis
    /// degenerates to a single mountain); executing it would cost a
    /// barrier for no work. Stage order is preserved, so the count only
    /// ever decreases.
    pub fn prune_empty_stages(&mut self) {
        self.stages.retain(|stage| !stage.is_empty());
    }
}
