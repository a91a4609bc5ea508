//! Trapezoid (mountain/valley) tiling of one axis across many half-steps.
//!
//! Where parallelogram tiles trade all parallelism for cache reuse,
//! trapezoid tiles split the axis into two interleaved families:
//!
//! ```text
//! t ^  AAAAAAAEEEEEEEEEBBBBBBBFFFFFFFFFCC
//!   |  AAAAAAEEEEEEEEEEEBBBBBBFFFFFFFFFFC
//!   |  AAAAAAEEEEEEEEEEEBBBBBBFFFFFFFFFFC
//!   |  AAAAAEEEEEEEEEEEEEBBBBBFFFFFFFFFFF
//!   +----------------------------------> x
//! ```
//!
//! Mountains (`A`, `B`, `C`) shrink as time advances; valleys (`E`,
//! `F`) grow into the space the mountains vacate. No mountain ever
//! shares a cell with a valley at any half-step, so all mountains can
//! run concurrently, then all valleys: a two-stage plan. See Fukaya &
//! Iwashita (HPC Asia 2018), figure 8(b).

use smallvec::smallvec;
use timeskew_core::{AxisShape, Range1D};

use crate::error::PlanError;
use crate::parallelogram::clip_magnetic_boundary;
use crate::tile::{Plan1D, Tile1D, TileList1D};

/// Generate the two-stage trapezoid plan for one axis.
///
/// `total_width` is the axis length W, `tile_width` the mountain base
/// width T, and `half_steps` the tile height H. Valleys seed at
/// `T - H + 1` wide (their narrow bottom) and grow to T. Requires `H`
/// even, `H + 1 < T`, and `W >= T`.
///
/// Stage 0 holds the mountains, stage 1 the valleys.
///
/// # Examples
///
/// ```
/// use timeskew_plan::trapezoid_tiles;
///
/// let plan = trapezoid_tiles(70, 10, 8).unwrap();
/// assert_eq!(plan.stage_count(), 2);
/// // Mountain bases are wider than the valley bottoms between them.
/// assert!(plan.stage(0)[0].first_range().len() > plan.stage(1)[0].first_range().len());
/// ```
pub fn trapezoid_tiles(
    total_width: usize,
    tile_width: usize,
    half_steps: usize,
) -> Result<Plan1D, PlanError> {
    let shape = AxisShape::Trapezoid;

    if half_steps % 2 != 0 {
        return Err(PlanError::OddTileHeight { half_steps });
    }
    if half_steps + 1 >= tile_width {
        return Err(PlanError::TileHeightTooLarge {
            shape,
            tile_width,
            half_steps,
        });
    }
    if total_width < tile_width {
        return Err(PlanError::AxisTooNarrow {
            shape,
            total_width,
            tile_width,
        });
    }

    let t_min = tile_width - half_steps + 1;
    let t_max = tile_width;
    // How far past its seed a mountain's footprint reaches at the top,
    // which is also how far a valley's right edge travels while growing.
    let mountain_overlap = half_steps / 2 - 1;

    // Lay out the half-step-0 footprints: alternate a mountain base
    // (wide) and a valley bottom (narrow), left to right.
    let mut tiles: Vec<Tile1D> = Vec::new();
    let mut seed = Range1D::new(0, (t_max - 1).min(total_width - 1));
    loop {
        tiles.push(Tile1D::new(tiles.len(), seed, half_steps));
        if seed.last >= total_width - 1 {
            break;
        }

        let first = seed.last + 1;
        let next_is_mountain = tiles.len() % 2 == 0;
        let last = if next_is_mountain {
            (first + t_max - 1).min(total_width - 1)
        } else {
            let mut last = (first + t_min - 1).min(total_width - 1);
            // If this valley's top-right corner would reach the last
            // column, the mountain after it could not keep a full-height
            // base of its own: fold the leftover cells into the valley
            // instead of emitting a truncated terminal mountain.
            if last + mountain_overlap >= total_width - 1 {
                last = total_width - 1;
            }
            last
        };
        seed = Range1D::new(first, last);
    }
    tiles.retain(|tile| !tile.first_range().is_empty());

    // Advance every tile through the remaining half-steps.
    let tile_count = tiles.len();
    for (tile_id, tile) in tiles.iter_mut().enumerate() {
        let is_mountain = tile_id % 2 == 0;
        for half_step in 1..half_steps {
            let prev = tile.ranges[half_step - 1];

            let (mut shift_first, mut shift_last): (isize, isize) =
                match (is_mountain, half_step % 2 == 1) {
                    // Mountains shrink: right edge on odd half-steps,
                    // left edge on even ones.
                    (true, true) => (0, -1),
                    (true, false) => (1, 0),
                    // Valleys grow into the vacated cells, mirrored.
                    (false, true) => (-1, 0),
                    (false, false) => (0, 1),
                };

            if tile_id == 0 {
                shift_first = 0;
            }
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

    // Even layout ordinals are mountains (stage 0), odd are valleys
    // (stage 1); re-number each family within its own stage.
    let mut mountains: TileList1D = Vec::new();
    let mut valleys: TileList1D = Vec::new();
    for tile in tiles {
        if tile.id % 2 == 0 {
            mountains.push(Tile1D {
                id: mountains.len(),
                ranges: tile.ranges,
            });
        } else {
            valleys.push(Tile1D {
                id: valleys.len(),
                ranges: tile.ranges,
            });
        }
    }

    Ok(Plan1D::new(
        shape,
        total_width,
        half_steps,
        smallvec![mountains, valleys],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seventy_wide_reference_layout() {
        let plan = trapezoid_tiles(70, 10, 8).unwrap();
        assert_eq!(plan.stage_count(), 2);

        let mountains = plan.stage(0);
        let valleys = plan.stage(1);
        assert!(!mountains.is_empty());
        assert!(!valleys.is_empty());

        // Every mountain base is wider than the valley-bottom minimum.
        let t_min = 10 - 8 + 1;
        for mountain in mountains {
            assert!(mountain.first_range().len() > t_min);
        }
        // A mountain has shrunk to its narrow top by the final
        // half-step.
        let interior = &mountains[1];
        assert!(interior.ranges[7].len() < interior.ranges[0].len());
    }

    #[test]
    fn mountains_shrink_and_valleys_grow_monotonically() {
        let plan = trapezoid_tiles(64, 12, 6).unwrap();
        for mountain in plan.stage(0) {
            for pair in mountain.ranges.windows(2) {
                assert!(pair[1].len() <= pair[0].len() + 1);
            }
        }
        for valley in plan.stage(1) {
            for half_step in 1..valley.height() {
                // Ignore the magnetic clip when checking growth.
                if half_step % 2 == 0 {
                    assert!(valley.ranges[half_step].len() >= valley.ranges[half_step - 2].len());
                }
            }
        }
    }

    #[test]
    fn odd_height_is_rejected() {
        assert!(matches!(
            trapezoid_tiles(70, 10, 7),
            Err(PlanError::OddTileHeight { half_steps: 7 })
        ));
    }

    #[test]
    fn oversized_height_is_rejected() {
        // H + 1 >= T
        assert!(matches!(
            trapezoid_tiles(70, 9, 8),
            Err(PlanError::TileHeightTooLarge { .. })
        ));
    }

    #[test]
    fn grid_narrower_than_tile_is_rejected() {
        assert!(matches!(
            trapezoid_tiles(8, 10, 4),
            Err(PlanError::AxisTooNarrow { .. })
        ));
    }

    #[test]
    fn full_width_tile_degenerates_to_single_pinned_mountain() {
        // W == T: the first mountain already spans the whole axis and
        // the valley stage stays empty (the combiner prunes the stages
        // that compose empty from it). Both edges are pinned, so only
        // the magnetic clip ever narrows the tile.
        let plan = trapezoid_tiles(10, 10, 4).unwrap();
        assert_eq!(plan.stage_count(), 2);
        assert_eq!(plan.stage(0).len(), 1);
        assert!(plan.stage(1).is_empty());

        let mountain = &plan.stage(0)[0];
        assert_eq!(mountain.ranges[0], Range1D::new(0, 9));
        assert_eq!(mountain.ranges[1], Range1D::new(0, 8));
        assert_eq!(mountain.ranges[2], Range1D::new(0, 9));
        assert_eq!(mountain.ranges[3], Range1D::new(0, 8));
    }

    #[test]
    fn terminal_mountain_is_merged_into_last_valley() {
        // W chosen so the last valley's top would reach the final
        // column: the leftover cells must fold into that valley rather
        // than seed a truncated mountain.
        let plan = trapezoid_tiles(24, 10, 8).unwrap();
        let valleys = plan.stage(1);
        let last_valley = valleys.last().unwrap();
        assert_eq!(last_valley.first_range().last, 23);
    }

    fn arb_params() -> impl Strategy<Value = (usize, usize, usize)> {
        (1usize..8, 4usize..30).prop_flat_map(|(pairs, extra)| {
            let half_steps = 2 * pairs;
            let tile_width = half_steps + 2 + extra % 8;
            let min_w = tile_width;
            (min_w..min_w + 150)
                .prop_map(move |total_width| (total_width, tile_width, half_steps))
        })
    }

    proptest! {
        // At every half-step, mountains and valleys are pairwise
        // disjoint and together cover the axis (minus the final
        // magnetic boundary column on odd half-steps).
        #[test]
        fn stages_are_disjoint_and_cover((total_width, tile_width, half_steps) in arb_params()) {
            let plan = trapezoid_tiles(total_width, tile_width, half_steps).unwrap();

            for half_step in 0..half_steps {
                let mut covered = vec![0u32; total_width];
                for stage in plan.stages() {
                    for tile in stage {
                        let range = tile.ranges[half_step];
                        if range.is_empty() {
                            continue;
                        }
                        for pos in range.first..=range.last {
                            covered[pos] += 1;
                        }
                    }
                }

                let full_extent = if half_step % 2 == 1 {
                    total_width - 1
                } else {
                    total_width
                };
                for (pos, &count) in covered.iter().enumerate().take(full_extent) {
                    prop_assert_eq!(
                        count, 1,
                        "cell {} covered {} times at half-step {}",
                        pos, count, half_step
                    );
                }
            }
        }

        // Published tiles all advance exactly H half-steps and respect
        // the boundary clips.
        #[test]
        fn heights_and_clips_hold((total_width, tile_width, half_steps) in arb_params()) {
            let plan = trapezoid_tiles(total_width, tile_width, half_steps).unwrap();
            for stage in plan.stages() {
                for tile in stage {
                    prop_assert_eq!(tile.height(), half_steps);
                    for (half_step, range) in tile.ranges.iter().enumerate() {
                        if range.is_empty() {
                            continue;
                        }
                        prop_assert!(range.last <= total_width - 1);
                        if half_step % 2 == 1 {
                            prop_assert!(range.last <= total_width - 2);
                        }
                    }
                }
            }
        }
    }
}
