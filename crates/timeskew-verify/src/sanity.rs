//! The counter-based sanity harness.

use std::error::Error;
use std::fmt;

use timeskew_core::Field4D;
use timeskew_engine::{run_reference, ConfigError, CounterSweeper, RunConfig, TiledSchedule};
use timeskew_kernel::CounterError;

/// Failure modes of the counter harness.
#[derive(Debug)]
pub enum SanityError {
    /// The configuration could not be turned into a tiled schedule.
    Config(ConfigError),
    /// A stencil update would have read a cell at the wrong half-step.
    Ordering(CounterError),
}

impl fmt::Display for SanityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(source) => write!(f, "{source}"),
            Self::Ordering(source) => write!(f, "{source}"),
        }
    }
}

impl Error for SanityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(source) => Some(source),
            Self::Ordering(source) => Some(source),
        }
    }
}

impl From<ConfigError> for SanityError {
    fn from(source: ConfigError) -> Self {
        Self::Config(source)
    }
}

impl From<CounterError> for SanityError {
    fn from(source: CounterError) -> Self {
        Self::Ordering(source)
    }
}

/// Run the tiled executor (and, as a self-check of the harness, the
/// reference executor) over half-step counter fields.
///
/// Every update asserts the leap-frog dependency pattern locally, so an
/// out-of-order tile surfaces at the first cell it touches. Unlike the
/// symbolic harness this cannot distinguish two updates that happen at
/// the right count but read through the wrong intermediate values; in
/// exchange it runs on grids and timestep counts the symbolic harness
/// could never hold in memory.
pub fn verify_counters(config: &RunConfig) -> Result<(), SanityError> {
    let schedule = TiledSchedule::build(config)?;
    let grid = config.grid_size;

    log::info!("checking tiled execution order");
    let mut volt: Field4D<u32> = Field4D::new("volt", grid, 1);
    let mut curr: Field4D<u32> = Field4D::new("curr", grid, 1);
    schedule.run(&mut CounterSweeper {
        volt: &mut volt,
        curr: &mut curr,
    })?;

    log::info!("checking reference execution order");
    let mut volt: Field4D<u32> = Field4D::new("volt", grid, 1);
    let mut curr: Field4D<u32> = Field4D::new("curr", grid, 1);
    run_reference(
        &mut CounterSweeper {
            volt: &mut volt,
            curr: &mut curr,
        },
        grid,
        config.timesteps,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeskew_core::AxisShape::{Parallelogram, Trapezoid};

    #[test]
    fn large_counter_run_passes_for_both_compositions() {
        // Far past what the symbolic harness could hold.
        let mut config = RunConfig {
            grid_size: [40, 40, 40],
            tile_size: [10, 10, 10],
            tile_shape: [Trapezoid; 3],
            tile_half_steps: 8,
            timesteps: 50,
        };
        verify_counters(&config).unwrap();

        config.tile_shape = [Trapezoid, Trapezoid, Parallelogram];
        config.tile_size = [10, 10, 6];
        verify_counters(&config).unwrap();
    }

    #[test]
    fn config_errors_pass_through() {
        let config = RunConfig {
            grid_size: [20, 20, 20],
            tile_size: [10, 10, 10],
            tile_shape: [Parallelogram, Trapezoid, Trapezoid],
            tile_half_steps: 8,
            timesteps: 10,
        };
        assert!(matches!(
            verify_counters(&config),
            Err(SanityError::Config(_))
        ));
    }
}
