//! The tiled executor: batching, remainder handling, and the driver
//! loop that consumes a plan in its mandated order.

use timeskew_plan::{build_plan, Plan3D};

use crate::config::{ConfigError, RunConfig};
use crate::stepper::Stepper;

/// A run's worth of tiled work: the main plan repeated over full
/// batches, plus an optional shorter remainder plan for the tail.
///
/// A plan of height H advances every cell H/2 timesteps per execution.
/// When the requested timestep count is not divisible by H/2, the tail
/// is covered by a second plan of height `2 * (timesteps mod H/2)`,
/// built through the same generators and therefore subject to the same
/// shape constraints; a configuration whose remainder cannot be tiled
/// is rejected outright.
#[derive(Clone, Debug)]
pub struct TiledSchedule {
    main: Plan3D,
    main_batches: usize,
    remainder: Option<Plan3D>,
}

impl TiledSchedule {
    /// Validate `config` and build its main (and, if needed, remainder)
    /// plan.
    pub fn build(config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let half_steps = config.tile_half_steps;
        let main_batches = config.timesteps * 2 / half_steps;
        let remainder_half_steps = (config.timesteps - main_batches * half_steps / 2) * 2;

        let main = build_plan(
            config.grid_size,
            config.tile_size,
            config.tile_shape,
            half_steps,
        )?;

        let remainder = if remainder_half_steps > 0 {
            Some(
                build_plan(
                    config.grid_size,
                    config.tile_size,
                    config.tile_shape,
                    remainder_half_steps,
                )
                .map_err(|source| ConfigError::RemainderNotTileable {
                    half_steps: remainder_half_steps,
                    source,
                })?,
            )
        } else {
            None
        };

        Ok(Self {
            main,
            main_batches,
            remainder,
        })
    }

    /// The main plan.
    pub fn main_plan(&self) -> &Plan3D {
        &self.main
    }

    /// How many times the main plan executes.
    pub fn main_batches(&self) -> usize {
        self.main_batches
    }

    /// The remainder plan, when the tail is not empty.
    pub fn remainder_plan(&self) -> Option<&Plan3D> {
        self.remainder.as_ref()
    }

    /// Timesteps advanced per main-plan execution.
    pub fn timesteps_per_batch(&self) -> usize {
        self.main.half_steps() / 2
    }

    /// Timesteps advanced by the remainder plan.
    pub fn remainder_timesteps(&self) -> usize {
        self.remainder.as_ref().map_or(0, |p| p.half_steps() / 2)
    }

    /// Drive the whole schedule through `stepper`.
    pub fn run<S: Stepper>(&self, stepper: &mut S) -> Result<(), S::Error> {
        for batch in 0..self.main_batches {
            log::debug!("main batch {batch}");
            execute_plan(&self.main, stepper)?;
        }
        if let Some(remainder) = &self.remainder {
            log::debug!("remainder batch");
            execute_plan(remainder, stepper)?;
        }
        Ok(())
    }
}

/// Execute one plan in its mandated order: stages in sequence, tiles
/// within a stage in any order (here: in sequence), subtiles within a
/// tile in sequence, and each subtile's half-steps in index order as
/// alternating electric/magnetic range sweeps.
pub fn execute_plan<S: Stepper>(plan: &Plan3D, stepper: &mut S) -> Result<(), S::Error> {
    for (stage_idx, stage) in plan.stages().enumerate() {
        log::debug!("stage {stage_idx}");
        for tile in stage {
            for subtile in tile.subtiles() {
                for (electric, magnetic) in subtile.half_step_pairs() {
                    stepper.electric(electric)?;
                    stepper.magnetic(magnetic)?;
                }
            }
        }
    }
    Ok(())
}
