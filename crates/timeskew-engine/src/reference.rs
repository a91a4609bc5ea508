//! The naive reference executor.

use timeskew_core::Range3D;

use crate::stepper::Stepper;

/// Advance `timesteps` full timesteps in strict order: one electric
/// sweep over the whole grid, then one magnetic sweep shrunk by one
/// cell per axis (the boundary cell's `+1` reads would leave the grid).
///
/// No tiling, no parallelism. This defines the correct answer that
/// tiled execution must reproduce.
pub fn run_reference<S: Stepper>(
    stepper: &mut S,
    grid_size: [usize; 3],
    timesteps: usize,
) -> Result<(), S::Error> {
    let electric = Range3D::new(
        [0, 0, 0],
        [grid_size[0] - 1, grid_size[1] - 1, grid_size[2] - 1],
    );
    let magnetic = Range3D::new(
        [0, 0, 0],
        [grid_size[0] - 2, grid_size[1] - 2, grid_size[2] - 2],
    );

    for _ in 0..timesteps {
        stepper.electric(electric)?;
        stepper.magnetic(magnetic)?;
    }
    Ok(())
}
