//! Idealized DRAM traffic estimation for a 3D plan.
//!
//! Assumes every tile's working set is fetched from DRAM exactly once
//! per subtile and served from cache for all of the subtile's
//! half-steps; the untiled baseline refetches the whole grid every
//! timestep. Actual machines fall between the two.

use crate::subtile::Plan3D;

/// Bytes per value.
const VALUE_BYTES: usize = 4;
/// Values per cell.
const VEC_COMPONENTS: usize = 3;
/// Streams touched per tiled cell: `volt` and `curr` read+write plus the
/// four coefficient reads.
const TILED_STREAMS: usize = 8;
/// Streams touched per naive cell per timestep: the electric sweep reads
/// `volt` (rw), `curr`, `vv`, `vi`; the magnetic sweep reads `curr`
/// (rw), `volt`, `ii`, `iv`.
const NAIVE_STREAMS: usize = 10;

/// Estimated bytes transferred by one execution of `plan`.
///
/// With `sliding_window` set (meaningful only for TTP plans), each
/// K-chained subtile after the first is charged only for the K-planes it
/// adds beyond its predecessor, modeling a driver that slides one
/// staging buffer along the K axis instead of reloading the overlap.
pub fn plan_traffic(plan: &Plan3D, sliding_window: bool) -> usize {
    let mut total = 0;
    for stage in plan.stages() {
        for tile in stage {
            let mut prev_last_k: Option<usize> = None;
            for subtile in tile.subtiles() {
                let bbox = subtile.bounding_box();
                let depth_k = match prev_last_k {
                    Some(prev) if sliding_window => bbox.last[2].saturating_sub(prev),
                    _ => bbox.extent(2),
                };
                total += bbox.extent(0)
                    * bbox.extent(1)
                    * depth_k
                    * VEC_COMPONENTS
                    * VALUE_BYTES
                    * TILED_STREAMS;
                prev_last_k = Some(bbox.last[2]);
            }
        }
    }
    total
}

/// Bytes transferred by the untiled reference sweep over `timesteps`
/// full timesteps.
pub fn naive_traffic(grid_size: [usize; 3], timesteps: usize) -> usize {
    grid_size[0]
        * grid_size[1]
        * grid_size[2]
        * VEC_COMPONENTS
        * VALUE_BYTES
        * NAIVE_STREAMS
        * timesteps
}
