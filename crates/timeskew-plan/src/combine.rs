//! Cartesian composition of per-axis 1D plans into a staged 3D plan.

use smallvec::SmallVec;
use timeskew_core::{AxisShape, Range3D};

use crate::error::PlanError;
use crate::parallelogram::parallelogram_tiles;
use crate::subtile::{Plan3D, Subtile3D, Tile3D, TileList3D};
use crate::tile::{Plan1D, Tile1D};
use crate::trapezoid::trapezoid_tiles;

fn check_alignment(plans: [&Plan1D; 3]) -> Result<usize, PlanError> {
    let expected = plans[0].half_steps();
    for (axis, plan) in plans.iter().enumerate().skip(1) {
        if plan.half_steps() != expected {
            return Err(PlanError::TemporalMisalignment {
                axis,
                found: plan.half_steps(),
                expected,
            });
        }
    }
    Ok(expected)
}

fn product_subtile(tile_i: &Tile1D, tile_j: &Tile1D, tile_k: &Tile1D) -> Subtile3D {
    debug_assert!(
        tile_i.height() == tile_j.height() && tile_j.height() == tile_k.height(),
        "per-axis tiles must be time-aligned"
    );
    let mut subtile = Subtile3D::new();
    for half_step in 0..tile_i.height() {
        let ri = tile_i.ranges[half_step];
        let rj = tile_j.ranges[half_step];
        let rk = tile_k.ranges[half_step];
        subtile.push(Range3D::new(
            [ri.first, rj.first, rk.first],
            [ri.last, rj.last, rk.last],
        ));
    }
    subtile
}

/// Combine three trapezoid plans into an 8-stage 3D plan.
///
/// Each stage is selected by a 3-bit code `(sI, sJ, sK)`: bit set means
/// the valley stage of that axis, clear the mountain stage. Every tile
/// triple in the selected stage lists produces one 3D tile holding a
/// single subtile whose ranges are the per-half-step Cartesian products.
pub fn combine_ttt(i: &Plan1D, j: &Plan1D, k: &Plan1D) -> Result<Plan3D, PlanError> {
    for (axis, plan) in [i, j, k].into_iter().enumerate() {
        if plan.stage_count() != 2 {
            return Err(PlanError::UnsupportedComposition {
                reason: format!(
                    "TTT requires trapezoid plans on all axes, axis {axis} has {} stage(s)",
                    plan.stage_count()
                ),
            });
        }
    }
    let half_steps = check_alignment([i, j, k])?;

    let mut stages: SmallVec<[TileList3D; 8]> = SmallVec::new();
    for stage in 0..8 {
        // 3-to-8 decoder over the per-axis stage pair.
        let list_i = i.stage((stage >> 2) & 1);
        let list_j = j.stage((stage >> 1) & 1);
        let list_k = k.stage(stage & 1);

        let mut tiles: TileList3D = Vec::with_capacity(list_i.len() * list_j.len() * list_k.len());
        for (ti, tile_i) in list_i.iter().enumerate() {
            for (tj, tile_j) in list_j.iter().enumerate() {
                for (tk, tile_k) in list_k.iter().enumerate() {
                    tiles.push(Tile3D {
                        id: [ti, tj, tk],
                        subtiles: vec![product_subtile(tile_i, tile_j, tile_k)],
                    });
                }
            }
        }
        stages.push(tiles);
    }

    Ok(Plan3D::new(half_steps, stages))
}

/// Combine two trapezoid plans (I, J) and one parallelogram plan (K)
/// into a 4-stage 3D plan.
///
/// The K axis has a single serially-dependent stage, so it does not
/// participate in the stage selector. Instead, for every (I, J) tile
/// pair the K-axis parallelograms become consecutive subtiles of one 3D
/// tile, preserving the serial K dependency on a single worker and the
/// cache reuse between K-neighbors.
pub fn combine_ttp(i: &Plan1D, j: &Plan1D, k: &Plan1D) -> Result<Plan3D, PlanError> {
    for (axis, plan) in [i, j].into_iter().enumerate() {
        if plan.stage_count() != 2 {
            return Err(PlanError::UnsupportedComposition {
                reason: format!(
                    "TTP requires trapezoid plans on axes I and J, axis {axis} has {} stage(s)",
                    plan.stage_count()
                ),
            });
        }
    }
    if k.stage_count() != 1 {
        return Err(PlanError::UnsupportedComposition {
            reason: format!(
                "TTP requires a parallelogram plan on axis K, got {} stage(s)",
                k.stage_count()
            ),
        });
    }
    let half_steps = check_alignment([i, j, k])?;

    let list_k = k.stage(0);
    let mut stages: SmallVec<[TileList3D; 8]> = SmallVec::new();
    for stage in 0..4 {
        // 2-to-4 decoder; K is folded into every tile below.
        let list_i = i.stage((stage >> 1) & 1);
        let list_j = j.stage(stage & 1);

        let mut tiles: TileList3D = Vec::with_capacity(list_i.len() * list_j.len());
        for (ti, tile_i) in list_i.iter().enumerate() {
            for (tj, tile_j) in list_j.iter().enumerate() {
                let subtiles = list_k
                    .iter()
                    .map(|tile_k| product_subtile(tile_i, tile_j, tile_k))
                    .collect();
                tiles.push(Tile3D {
                    id: [ti, tj, 0],
                    subtiles,
                });
            }
        }
        stages.push(tiles);
    }

    Ok(Plan3D::new(half_steps, stages))
}

/// Build the 3D plan for a full axis-shape configuration.
///
/// Dispatches on the per-axis shape tags: I and J must be trapezoid; K
/// selects between [`combine_ttt`] and [`combine_ttp`]. Any other
/// combination is rejected.
///
/// Stages left empty by composition (an axis whose tile width equals
/// the grid width degenerates to a single mountain, so every stage
/// selecting that axis's valley side holds no tiles) are pruned before
/// the plan is published; executing them would cost a barrier for no
/// work.
pub fn build_plan(
    grid_size: [usize; 3],
    tile_size: [usize; 3],
    shapes: [AxisShape; 3],
    half_steps: usize,
) -> Result<Plan3D, PlanError> {
    if shapes[0] != AxisShape::Trapezoid || shapes[1] != AxisShape::Trapezoid {
        return Err(PlanError::UnsupportedComposition {
            reason: format!(
                "axes I and J support only trapezoid tiling, got ({}, {})",
                shapes[0], shapes[1]
            ),
        });
    }

    let plan_i = trapezoid_tiles(grid_size[0], tile_size[0], half_steps)?;
    let plan_j = trapezoid_tiles(grid_size[1], tile_size[1], half_steps)?;

    let mut plan = match shapes[2] {
        AxisShape::Trapezoid => {
            let plan_k = trapezoid_tiles(grid_size[2], tile_size[2], half_steps)?;
            combine_ttt(&plan_i, &plan_j, &plan_k)?
        }
        AxisShape::Parallelogram => {
            let plan_k = parallelogram_tiles(grid_size[2], tile_size[2], half_steps)?;
            combine_ttp(&plan_i, &plan_j, &plan_k)?
        }
    };
    plan.prune_empty_stages();
    log::debug!(
        "composed {} stages holding {} tiles",
        plan.stage_count(),
        plan.tile_count()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeskew_core::Range1D;

    fn ttt_inputs() -> (Plan1D, Plan1D, Plan1D) {
        (
            trapezoid_tiles(20, 8, 4).unwrap(),
            trapezoid_tiles(20, 8, 4).unwrap(),
            trapezoid_tiles(20, 8, 4).unwrap(),
        )
    }

    #[test]
    fn ttt_has_eight_stages_of_single_subtile_tiles() {
        let (i, j, k) = ttt_inputs();
        let plan = combine_ttt(&i, &j, &k).unwrap();
        assert_eq!(plan.stage_count(), 8);
        assert_eq!(plan.half_steps(), 4);
        for stage in plan.stages() {
            for tile in stage {
                assert_eq!(tile.subtiles.len(), 1);
                assert_eq!(tile.subtiles[0].height(), 4);
            }
        }
    }

    #[test]
    fn ttt_stage_tiles_have_disjoint_ij_footprints() {
        let (i, j, k) = ttt_inputs();
        let plan = combine_ttt(&i, &j, &k).unwrap();
        for stage in plan.stages() {
            for (a, tile_a) in stage.iter().enumerate() {
                for tile_b in stage.iter().skip(a + 1) {
                    let ra = tile_a.subtiles[0].half_step(0);
                    let rb = tile_b.subtiles[0].half_step(0);
                    let overlap_i = Range1D::new(ra.first[0], ra.last[0])
                        .overlaps(&Range1D::new(rb.first[0], rb.last[0]));
                    let overlap_j = Range1D::new(ra.first[1], ra.last[1])
                        .overlaps(&Range1D::new(rb.first[1], rb.last[1]));
                    let overlap_k = Range1D::new(ra.first[2], ra.last[2])
                        .overlaps(&Range1D::new(rb.first[2], rb.last[2]));
                    assert!(
                        !(overlap_i && overlap_j && overlap_k),
                        "tiles {:?} and {:?} overlap at half-step 0",
                        tile_a.id,
                        tile_b.id
                    );
                }
            }
        }
    }

    #[test]
    fn ttp_has_four_stages_with_k_subtile_chains() {
        let i = trapezoid_tiles(20, 8, 4).unwrap();
        let j = trapezoid_tiles(20, 8, 4).unwrap();
        let k = parallelogram_tiles(20, 4, 4).unwrap();
        let k_tiles = k.stage(0).len();
        assert!(k_tiles > 1);

        let plan = combine_ttp(&i, &j, &k).unwrap();
        assert_eq!(plan.stage_count(), 4);
        for stage in plan.stages() {
            for tile in stage {
                assert_eq!(tile.subtiles.len(), k_tiles);
                // Subtiles follow K-plan order.
                for pair in tile.subtiles.windows(2) {
                    assert!(
                        pair[0].half_step(0).first[2] < pair[1].half_step(0).first[2]
                    );
                }
            }
        }
    }

    #[test]
    fn ttt_rejects_parallelogram_axis() {
        let (i, j, _) = ttt_inputs();
        let k = parallelogram_tiles(20, 4, 4).unwrap();
        assert!(matches!(
            combine_ttt(&i, &j, &k),
            Err(PlanError::UnsupportedComposition { .. })
        ));
    }

    #[test]
    fn ttp_rejects_trapezoid_k_axis() {
        let (i, j, k) = ttt_inputs();
        assert!(matches!(
            combine_ttp(&i, &j, &k),
            Err(PlanError::UnsupportedComposition { .. })
        ));
    }

    #[test]
    fn misaligned_heights_are_rejected() {
        let i = trapezoid_tiles(20, 8, 4).unwrap();
        let j = trapezoid_tiles(20, 8, 4).unwrap();
        let k = trapezoid_tiles(20, 10, 8).unwrap();
        assert!(matches!(
            combine_ttt(&i, &j, &k),
            Err(PlanError::TemporalMisalignment {
                axis: 2,
                found: 8,
                expected: 4
            })
        ));
    }

    #[test]
    fn build_plan_rejects_parallelogram_on_i() {
        use AxisShape::{Parallelogram, Trapezoid};
        let err = build_plan(
            [20, 20, 20],
            [8, 8, 8],
            [Parallelogram, Trapezoid, Trapezoid],
            4,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::UnsupportedComposition { .. }));
    }

    #[test]
    fn degenerate_axis_stages_are_pruned_before_publication() {
        use AxisShape::{Parallelogram, Trapezoid};

        // J's tile width equals its grid width: that axis degenerates
        // to a single mountain, so every stage selecting J's valley
        // side composes empty. The raw combiner keeps them; the
        // published plan must not.
        let raw = {
            let i = trapezoid_tiles(20, 8, 4).unwrap();
            let j = trapezoid_tiles(8, 8, 4).unwrap();
            let k = trapezoid_tiles(20, 8, 4).unwrap();
            combine_ttt(&i, &j, &k).unwrap()
        };
        assert_eq!(raw.stage_count(), 8);
        assert_eq!(raw.stages().filter(|stage| stage.is_empty()).count(), 4);

        let published = build_plan([20, 8, 20], [8, 8, 8], [Trapezoid; 3], 4).unwrap();
        assert_eq!(published.stage_count(), 4);
        assert!(published.stages().all(|stage| !stage.is_empty()));
        assert_eq!(published.tile_count(), raw.tile_count());

        let published_ttp = build_plan(
            [20, 8, 20],
            [8, 8, 4],
            [Trapezoid, Trapezoid, Parallelogram],
            4,
        )
        .unwrap();
        assert_eq!(published_ttp.stage_count(), 2);
        assert!(published_ttp.stages().all(|stage| !stage.is_empty()));
    }

    #[test]
    fn subtile_bounding_boxes_match_member_ranges() {
        let i = trapezoid_tiles(20, 8, 4).unwrap();
        let j = trapezoid_tiles(20, 8, 4).unwrap();
        let k = parallelogram_tiles(20, 4, 4).unwrap();
        let plan = combine_ttp(&i, &j, &k).unwrap();
        for stage in plan.stages() {
            for tile in stage {
                for subtile in tile.subtiles() {
                    let bbox = subtile.bounding_box();
                    let mut first = [usize::MAX; 3];
                    let mut last = [0usize; 3];
                    for range in subtile.ranges() {
                        for axis in 0..3 {
                            first[axis] = first[axis].min(range.first[axis]);
                            last[axis] = last[axis].max(range.last[axis]);
                        }
                    }
                    assert_eq!(bbox.first, first);
                    assert_eq!(bbox.last, last);
                }
            }
        }
    }
}
