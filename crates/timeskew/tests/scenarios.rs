//! End-to-end scenarios exercising the whole workspace through the
//! facade: generation, composition, scheduling, and verification.

use timeskew::prelude::*;

#[test]
fn parallelogram_70_cell_axis_layout() {
    let plan = timeskew::plan::parallelogram_tiles(70, 10, 8).unwrap();
    assert_eq!(plan.stage_count(), 1);

    // Half-step-0 footprints cover [0, 69] without overlap: the first
    // tile at full width, the rest at T - H/2.
    let mut next = 0;
    for (ordinal, tile) in plan.stage(0).iter().enumerate() {
        let seed = tile.first_range();
        assert_eq!(seed.first, next);
        assert_eq!(seed.len(), if ordinal == 0 { 10 } else { 6 });
        next = seed.last + 1;
    }
    assert_eq!(next, 70);

    // Boundary clipping: leftmost edge pinned at zero, odd half-steps
    // clipped to W - 2.
    for tile in plan.stage(0) {
        assert_eq!(tile.height(), 8);
        for (half_step, range) in tile.ranges.iter().enumerate() {
            assert!(range.first <= range.last);
            if half_step % 2 == 1 {
                assert!(range.last <= 68);
            } else {
                assert!(range.last <= 69);
            }
        }
    }
}

#[test]
fn trapezoid_70_cell_axis_has_mountains_then_valleys() {
    let plan = timeskew::plan::trapezoid_tiles(70, 10, 8).unwrap();
    assert_eq!(plan.stage_count(), 2);

    let t_min = 10 - 8 + 1;
    // Mountain bases start wider than the valley-bottom minimum and a
    // mountain has shrunk to its top by the final half-step.
    for mountain in plan.stage(0) {
        assert!(mountain.first_range().len() > t_min);
    }
    let interior = &plan.stage(0)[1];
    assert!(interior.ranges[7].len() < interior.ranges[0].len());
    // Valleys grow toward the final half-step.
    let valley = &plan.stage(1)[0];
    assert!(valley.ranges[6].len() > valley.ranges[0].len());
}

#[test]
fn ttt_composition_has_eight_stages_of_disjoint_tiles() {
    let plan = build_plan([20, 20, 20], [8, 8, 8], [AxisShape::Trapezoid; 3], 4).unwrap();
    assert_eq!(plan.stage_count(), 8);

    for stage in plan.stages() {
        for (a, tile_a) in stage.iter().enumerate() {
            assert_eq!(tile_a.subtiles.len(), 1);
            for tile_b in stage.iter().skip(a + 1) {
                let ra = tile_a.subtiles[0].half_step(0);
                let rb = tile_b.subtiles[0].half_step(0);
                let disjoint_on_some_axis = (0..3).any(|axis| {
                    ra.last[axis] < rb.first[axis] || rb.last[axis] < ra.first[axis]
                });
                assert!(disjoint_on_some_axis, "{:?} vs {:?}", tile_a.id, tile_b.id);
            }
        }
    }
}

#[test]
fn ttp_composition_has_four_stages_of_subtile_chains() {
    let plan = build_plan(
        [20, 20, 20],
        [8, 8, 4],
        [
            AxisShape::Trapezoid,
            AxisShape::Trapezoid,
            AxisShape::Parallelogram,
        ],
        4,
    )
    .unwrap();
    assert_eq!(plan.stage_count(), 4);
    for stage in plan.stages() {
        for tile in stage {
            assert!(tile.subtiles.len() > 1);
        }
    }
}

#[test]
fn symbolic_verification_passes_for_both_compositions() {
    let mut config = RunConfig {
        grid_size: [10, 10, 10],
        tile_size: [8, 8, 8],
        tile_shape: [AxisShape::Trapezoid; 3],
        tile_half_steps: 4,
        timesteps: 8,
    };
    verify_symbolic(&config).unwrap();

    config.tile_shape[2] = AxisShape::Parallelogram;
    config.tile_size[2] = 4;
    verify_symbolic(&config).unwrap();
}

#[test]
fn odd_tile_height_never_produces_a_plan() {
    let config = RunConfig {
        grid_size: [20, 20, 20],
        tile_size: [12, 12, 12],
        tile_shape: [AxisShape::Trapezoid; 3],
        tile_half_steps: 9,
        timesteps: 10,
    };
    assert!(TiledSchedule::build(&config).is_err());
    assert!(verify_symbolic(&config).is_err());
    assert!(verify_counters(&config).is_err());
}

#[test]
fn counter_harness_matches_symbolic_verdict_on_a_shared_config() {
    let config = RunConfig {
        grid_size: [10, 10, 10],
        tile_size: [10, 10, 6],
        tile_shape: [
            AxisShape::Trapezoid,
            AxisShape::Trapezoid,
            AxisShape::Parallelogram,
        ],
        tile_half_steps: 8,
        timesteps: 5,
    };
    verify_counters(&config).unwrap();
    verify_symbolic(&config).unwrap();
}
