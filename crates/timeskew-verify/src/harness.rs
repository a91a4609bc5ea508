//! The symbolic verification harness.

use std::error::Error;
use std::fmt;

use timeskew_core::Field4D;
use timeskew_engine::{
    run_reference, Coefficients, ConfigError, RunConfig, StencilSweeper, TiledSchedule,
};
use timeskew_kernel::{Expr, ExprComparer};

/// The first cell at which the tiled run's expression differed from the
/// reference run's.
#[derive(Clone, Debug)]
pub struct Divergence {
    /// Field that diverged (`volt` or `curr`).
    pub field: &'static str,
    /// Cell and polarization `(i, j, k, n)`.
    pub index: [usize; 4],
    /// Expression the reference executor produced.
    pub expected: Expr,
    /// Expression the tiled executor produced.
    pub received: Expr,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(i={}, j={}, k={}, n={}) verification failed!\n\n\
             Expected:\n\n{}\n\n\
             Received:\n\n{}",
            self.field,
            self.index[0],
            self.index[1],
            self.index[2],
            self.index[3],
            self.expected,
            self.received
        )
    }
}

/// Failure modes of the symbolic harness.
#[derive(Debug)]
pub enum VerifyError {
    /// The configuration could not be turned into a tiled schedule.
    Config(ConfigError),
    /// The tiled run produced a different expression somewhere.
    Diverged(Box<Divergence>),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(source) => write!(f, "{source}"),
            Self::Diverged(divergence) => write!(f, "{divergence}"),
        }
    }
}

impl Error for VerifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(source) => Some(source),
            Self::Diverged(_) => None,
        }
    }
}

impl From<ConfigError> for VerifyError {
    fn from(source: ConfigError) -> Self {
        Self::Config(source)
    }
}

/// Seed a field with one unique symbol per element, named after the
/// element's address so a diverging expression identifies every operand
/// it was built from.
fn seeded(name: &'static str, grid_size: [usize; 3]) -> Field4D<Expr> {
    let mut field = Field4D::new(name, grid_size, 3);
    field.fill_with(|i, j, k, n| Expr::symbol(format!("{name}({i},{j},{k},{n})")));
    field
}

fn compare(
    field: &'static str,
    reference: &Field4D<Expr>,
    tiled: &Field4D<Expr>,
    comparer: &mut ExprComparer,
) -> Result<(), Box<Divergence>> {
    let [size_i, size_j, size_k] = reference.size();
    for n in 0..reference.components() {
        for i in 0..size_i {
            for j in 0..size_j {
                for k in 0..size_k {
                    let expected = reference.get(i, j, k, n);
                    let received = tiled.get(i, j, k, n);
                    if !comparer.equal(expected, received) {
                        return Err(Box::new(Divergence {
                            field,
                            index: [i, j, k, n],
                            expected: expected.clone(),
                            received: received.clone(),
                        }));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Run the reference and tiled executors over symbolically-seeded
/// fields and compare every cell's expression tree.
///
/// Both runs share one set of coefficient symbols; the field grids are
/// cloned before either executor touches them so the two executions are
/// fully independent.
pub fn verify_symbolic(config: &RunConfig) -> Result<(), VerifyError> {
    let schedule = TiledSchedule::build(config)?;
    let grid = config.grid_size;

    let coefficients = Coefficients {
        vv: seeded("vv", grid),
        vi: seeded("vi", grid),
        ii: seeded("ii", grid),
        iv: seeded("iv", grid),
    };

    let mut volt_reference = seeded("volt", grid);
    let mut curr_reference = seeded("curr", grid);
    let mut volt_tiled = volt_reference.clone();
    let mut curr_tiled = curr_reference.clone();

    log::info!("generating golden results");
    let reference_run = run_reference(
        &mut StencilSweeper {
            volt: &mut volt_reference,
            curr: &mut curr_reference,
            coefficients: &coefficients,
        },
        grid,
        config.timesteps,
    );
    reference_run.unwrap_or_else(|never| match never {});

    log::info!("generating tiled results");
    let tiled_run = schedule.run(&mut StencilSweeper {
        volt: &mut volt_tiled,
        curr: &mut curr_tiled,
        coefficients: &coefficients,
    });
    tiled_run.unwrap_or_else(|never| match never {});

    // One memo across both fields: the grids share most of their
    // history, so subtrees proven equal for volt carry over to curr.
    let mut comparer = ExprComparer::new();
    compare("volt", &volt_reference, &volt_tiled, &mut comparer)
        .map_err(VerifyError::Diverged)?;
    compare("curr", &curr_reference, &curr_tiled, &mut comparer)
        .map_err(VerifyError::Diverged)?;
    Ok(())
}
