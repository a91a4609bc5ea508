//! Parallelogram tiling of one axis across many half-steps.
//!
//! In a leap-frog stencil the magnetic value at `(x, t)` reads the
//! electric value at `(x + 1, t - 1)` and the electric value at `(x, t)`
//! reads the magnetic value at `(x - 1, t - 1)`. Slicing the 1D
//! space-time plane along that left-leaning slope produces parallelogram
//! tiles, each advancing many half-steps while staying inside the cache:
//!
//! ```text
//! t ^  AAAAAABBBBBBCCCCCCCCCCDDDDDDDDDDEE
//!   |  AAAAAAABBBBBBCCCCCCCCCCDDDDDDDDDDE
//!   |  AAAAAAABBBBBBCCCCCCCCCCDDDDDDDDDDE
//!   |  AAAAAAAABBBBBBCCCCCCCCCCDDDDDDDDDD
//!   +----------------------------------> x
//! ```
//!
//! Each tile's dependency footprint at every half-step lies inside what
//! its left neighbor and itself computed one half-step earlier, so the
//! single stage must execute serially left to right. See Fukaya &
//! Iwashita, *Time-space tiling with tile-level parallelism for the 3D
//! FDTD method* (HPC Asia 2018) for the derivation.

use smallvec::smallvec;
use timeskew_core::{AxisShape, Range1D};

use crate::error::PlanError;
use crate::tile::{Plan1D, Tile1D};

/// Generate the single-stage parallelogram plan for one axis.
///
/// `total_width` is the axis length W, `tile_width` the base width T,
/// and `half_steps` the tile height H. The first tile is `min(T, W)`
/// wide; every later tile is `T - H/2` wide so that after H half-steps
/// of leftward drift the tiles still abut. Requires `H` even and
/// `H/2 < T`.
///
/// # Examples
///
/// ```
/// use timeskew_plan::parallelogram_tiles;
///
/// let plan = parallelogram_tiles(70, 10, 8).unwrap();
/// assert_eq!(plan.stage_count(), 1);
/// assert_eq!(plan.stage(0)[0].first_range().len(), 10);
/// assert_eq!(plan.stage(0)[1].first_range().len(), 6);
/// ```
pub fn parallelogram_tiles(
    total_width: usize,
    tile_width: usize,
    half_steps: usize,
) -> Result<Plan1D, PlanError> {
    let shape = AxisShape::Parallelogram;

    if half_steps % 2 != 0 {
        return Err(PlanError::OddTileHeight { half_steps });
    }
    if half_steps / 2 >= tile_width {
        return Err(PlanError::TileHeightTooLarge {
            shape,
            tile_width,
            half_steps,
        });
    }
    if total_width < 2 {
        return Err(PlanError::AxisTooNarrow {
            shape,
            total_width,
            tile_width,
        });
    }

    let t_min = tile_width - half_steps / 2;
    let t_max = tile_width;

    // Lay out the half-step-0 footprints left to right.
    let mut tiles: Vec<Tile1D> = Vec::new();
    let mut seed = Range1D::new(0, (t_max - 1).min(total_width - 1));
    loop {
        tiles.push(Tile1D::new(tiles.len(), seed, half_steps));
        if seed.last >= total_width - 1 {
            break;
        }
        seed = Range1D::new(seed.last + 1, (seed.last + t_min).min(total_width - 1));
    }
    tiles.retain(|tile| !tile.first_range().is_empty());

    // Advance every tile through the remaining half-steps.
    let tile_count = tiles.len();
    for (tile_id, tile) in tiles.iter_mut().enumerate() {
        for half_step in 1..half_steps {
            let prev = tile.ranges[half_step - 1];

            // Odd half-steps drift one cell left; even half-steps hold.
            let drift: isize = if half_step % 2 == 1 { -1 } else { 0 };

            let mut shift_first = drift;
            let mut shift_last = drift;

            // Tile 0 is pinned to the left boundary.
            if tile_id == 0 {
                shift_first = 0;
            }
            // The last tile is pinned to the right boundary, and no tile
            // may move its right edge out of the grid.
            let moved_last = prev.last as isize + shift_last;
            if tile_id == tile_count - 1 || moved_last < 0 || moved_last as usize > total_width - 1
            {
                shift_last = 0;
            }

            let first = prev.first.checked_add_signed(shift_first).ok_or(
                PlanError::LeftBoundaryUnderflow {
                    tile: tile_id,
                    half_step,
                },
            )?;
            let last = prev.last.wrapping_add_signed(shift_last);
            tile.ranges.push(Range1D::new(first, last));
        }
    }

    clip_magnetic_boundary(&mut tiles, total_width);

    Ok(Plan1D::new(
        shape,
        total_width,
        half_steps,
        smallvec![tiles],
    ))
}

/// Clip every odd (magnetic) half-step to `W - 2`: the boundary cell's
/// magnetic update reads a cell outside the grid and is never computed.
pub(crate) fn clip_magnetic_boundary(tiles: &mut [Tile1D], total_width: usize) {
    for tile in tiles {
        for (half_step, range) in tile.ranges.iter_mut().enumerate() {
            if half_step % 2 == 1 && range.last > total_width - 2 {
                range.last = total_width - 2;
            }
        }
    }
}
