//! Subtile shape statistics for a 3D plan.

use indexmap::IndexMap;

use crate::subtile::Plan3D;

/// Values stored per cell (one per polarization).
const VEC_COMPONENTS: usize = 3;
/// Bytes per stored value (f32 in the numeric engine).
const VALUE_BYTES: usize = 4;
/// The four read-only coefficient arrays (`vv`, `vi`, `iv`, `ii`).
const COEFF_ARRAYS: usize = 4;

/// Histogram of subtile bounding-box shapes.
///
/// Tile shapes repeat heavily across a plan (interior tiles are all
/// congruent), so grouping by shape is the quickest way to see what a
/// configuration produces and what per-tile staging buffers would cost.
/// Backed by an insertion-ordered map so reports are deterministic.
#[derive(Clone, Debug, Default)]
pub struct ShapeHistogram {
    counts: IndexMap<[usize; 3], usize>,
}

impl ShapeHistogram {
    /// Count every subtile of `plan` by bounding-box dimensions.
    pub fn of_plan(plan: &Plan3D) -> Self {
        let mut counts: IndexMap<[usize; 3], usize> = IndexMap::new();
        for stage in plan.stages() {
            for tile in stage {
                for subtile in tile.subtiles() {
                    let bbox = subtile.bounding_box();
                    let shape = [bbox.extent(0), bbox.extent(1), bbox.extent(2)];
                    *counts.entry(shape).or_insert(0) += 1;
                }
            }
        }
        Self { counts }
    }

    /// Number of distinct shapes.
    pub fn unique_shapes(&self) -> usize {
        self.counts.len()
    }

    /// Total number of subtiles counted.
    pub fn subtile_count(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(shape, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 3], usize)> + '_ {
        self.counts.iter().map(|(shape, count)| (*shape, *count))
    }

    /// RAM needed if every subtile's bounding box is staged separately
    /// (field vectors plus the four coefficient arrays), overlaps stored
    /// multiple times.
    pub fn overlapped_bytes(&self) -> usize {
        self.iter()
            .map(|(shape, count)| {
                shape[0] * shape[1] * shape[2] * VEC_COMPONENTS * VALUE_BYTES * COEFF_ARRAYS * count
            })
            .sum()
    }
}

/// RAM needed to store the grid once, without per-tile staging.
pub fn naive_grid_bytes(grid_size: [usize; 3]) -> usize {
    grid_size[0] * grid_size[1] * grid_size[2] * VEC_COMPONENTS * VALUE_BYTES * COEFF_ARRAYS
}
