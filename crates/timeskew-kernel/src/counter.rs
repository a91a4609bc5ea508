//! Half-step counters: the cheap alternative to symbolic verification.
//!
//! Instead of field values, every cell holds the number of half-steps
//! applied to it. The leap-frog dependency structure then becomes two
//! local assertions: an electric cell may only advance when the three
//! magnetic neighbors it reads all sit at the same count one behind it,
//! and a magnetic cell when its electric neighborhood is aligned with
//! it. Memory stays one counter per cell regardless of how many
//! timesteps run, so this scales to grids the symbolic harness cannot.

use std::fmt;

use timeskew_core::{Field4D, Range3D};

/// A leap-frog ordering violation found by the counter kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterError {
    /// The neighboring cells a stencil update reads disagree on how many
    /// half-steps they have advanced: some were updated out of order.
    StaleNeighbourhood {
        /// Field being advanced (`volt` or `curr`).
        field: &'static str,
        /// Cell being advanced.
        index: [usize; 3],
        /// Counts seen at the cell itself and its three read neighbors.
        counts: [u32; 4],
    },
    /// The advanced cell's count does not sit exactly half a timestep
    /// ahead of the grid it reads.
    StepMismatch {
        /// Field being advanced.
        field: &'static str,
        /// Cell being advanced.
        index: [usize; 3],
        /// Count the leap-frog pattern requires.
        expected: u32,
        /// Count actually found.
        found: u32,
    },
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNeighbourhood {
                field,
                index,
                counts,
            } => write!(
                f,
                "{field}({}, {}, {}) read a stale neighbourhood: counts {:?}",
                index[0], index[1], index[2], counts
            ),
            Self::StepMismatch {
                field,
                index,
                expected,
                found,
            } => write!(
                f,
                "{field}({}, {}, {}) advanced to {found}, expected {expected}",
                index[0], index[1], index[2]
            ),
        }
    }
}

impl std::error::Error for CounterError {}

fn check_electric_cell(
    volt: &mut Field4D<u32>,
    curr: &Field4D<u32>,
    i: usize,
    j: usize,
    k: usize,
) -> Result<(), CounterError> {
    let pi = i.saturating_sub(1);
    let pj = j.saturating_sub(1);
    let pk = k.saturating_sub(1);

    let curr_here = *curr.get(i, j, k, 0);
    let curr_pk = *curr.get(i, j, pk, 0);
    let curr_pj = *curr.get(i, pj, k, 0);
    let curr_pi = *curr.get(pi, j, k, 0);

    let advanced = *volt.get(i, j, k, 0) + 1;
    volt.set(i, j, k, 0, advanced);

    let size = curr.size();
    if pi == 0 || pj == 0 || pk == 0 {
        // The clamped reads alias untouched boundary cells whose counts
        // legitimately lag; nothing to check here.
        return Ok(());
    }
    if i == size[0] - 1 || j == size[1] - 1 || k == size[2] - 1 {
        // Likewise for the never-updated magnetic boundary layer.
        return Ok(());
    }

    if !(curr_here == curr_pk && curr_pk == curr_pj && curr_pj == curr_pi) {
        return Err(CounterError::StaleNeighbourhood {
            field: "volt",
            index: [i, j, k],
            counts: [curr_here, curr_pi, curr_pj, curr_pk],
        });
    }
    if advanced != curr_here + 1 {
        return Err(CounterError::StepMismatch {
            field: "volt",
            index: [i, j, k],
            expected: curr_here + 1,
            found: advanced,
        });
    }
    Ok(())
}

fn check_magnetic_cell(
    curr: &mut Field4D<u32>,
    volt: &Field4D<u32>,
    i: usize,
    j: usize,
    k: usize,
) -> Result<(), CounterError> {
    let volt_here = *volt.get(i, j, k, 0);
    let volt_nk = *volt.get(i, j, k + 1, 0);
    let volt_nj = *volt.get(i, j + 1, k, 0);
    let volt_ni = *volt.get(i + 1, j, k, 0);

    let advanced = *curr.get(i, j, k, 0) + 1;
    curr.set(i, j, k, 0, advanced);

    if !(volt_here == volt_nk && volt_nk == volt_nj && volt_nj == volt_ni) {
        return Err(CounterError::StaleNeighbourhood {
            field: "curr",
            index: [i, j, k],
            counts: [volt_here, volt_ni, volt_nj, volt_nk],
        });
    }
    // The magnetic grid trails the electric grid by half a timestep.
    if advanced != volt_here {
        return Err(CounterError::StepMismatch {
            field: "curr",
            index: [i, j, k],
            expected: volt_here,
            found: advanced,
        });
    }
    Ok(())
}

/// Advance and check every electric cell in an inclusive 3D range.
pub fn check_electric_range(
    volt: &mut Field4D<u32>,
    curr: &Field4D<u32>,
    range: Range3D,
) -> Result<(), CounterError> {
    log::debug!("checking volt {range}");
    for i in range.first[0]..=range.last[0] {
        for j in range.first[1]..=range.last[1] {
            for k in range.first[2]..=range.last[2] {
                check_electric_cell(volt, curr, i, j, k)?;
            }
        }
    }
    Ok(())
}

/// Advance and check every magnetic cell in an inclusive 3D range.
pub fn check_magnetic_range(
    curr: &mut Field4D<u32>,
    volt: &Field4D<u32>,
    range: Range3D,
) -> Result<(), CounterError> {
    log::debug!("checking curr {range}");
    for i in range.first[0]..=range.last[0] {
        for j in range.first[1]..=range.last[1] {
            for k in range.first[2]..=range.last[2] {
                check_magnetic_cell(curr, volt, i, j, k)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(size: [usize; 3]) -> (Field4D<u32>, Field4D<u32>) {
        (Field4D::new("volt", size, 1), Field4D::new("curr", size, 1))
    }

    fn full_electric(size: [usize; 3]) -> Range3D {
        Range3D::new([0, 0, 0], [size[0] - 1, size[1] - 1, size[2] - 1])
    }

    fn full_magnetic(size: [usize; 3]) -> Range3D {
        Range3D::new([0, 0, 0], [size[0] - 2, size[1] - 2, size[2] - 2])
    }

    #[test]
    fn alternating_full_sweeps_pass() {
        let size = [5, 5, 5];
        let (mut volt, mut curr) = counters(size);
        for _ in 0..4 {
            check_electric_range(&mut volt, &curr, full_electric(size)).unwrap();
            check_magnetic_range(&mut curr, &volt, full_magnetic(size)).unwrap();
        }
        assert_eq!(*volt.get(2, 2, 2, 0), 4);
        assert_eq!(*curr.get(2, 2, 2, 0), 4);
    }

    #[test]
    fn skipped_electric_sweep_is_detected() {
        let size = [5, 5, 5];
        let (mut volt, mut curr) = counters(size);
        check_electric_range(&mut volt, &curr, full_electric(size)).unwrap();
        check_magnetic_range(&mut curr, &volt, full_magnetic(size)).unwrap();
        // Magnetic again without the electric half-step in between.
        let err = check_magnetic_range(&mut curr, &volt, full_magnetic(size)).unwrap_err();
        assert!(matches!(err, CounterError::StepMismatch { field: "curr", .. }));
    }

    #[test]
    fn partially_advanced_neighbourhood_is_detected() {
        let size = [6, 6, 6];
        let (mut volt, mut curr) = counters(size);
        check_electric_range(&mut volt, &curr, full_electric(size)).unwrap();
        // Advance only a corner of the magnetic grid, then try a full
        // electric sweep: interior cells see mixed neighbour counts.
        check_magnetic_range(&mut curr, &volt, Range3D::new([0, 0, 0], [2, 2, 2])).unwrap();
        let err = check_electric_range(&mut volt, &curr, full_electric(size)).unwrap_err();
        assert!(matches!(
            err,
            CounterError::StaleNeighbourhood { field: "volt", .. }
        ));
    }
}
