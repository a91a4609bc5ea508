//! The seam between executors and half-step kernels.

use std::convert::Infallible;

use timeskew_core::{Field4D, Range3D};
use timeskew_kernel::counter::{check_electric_range, check_magnetic_range};
use timeskew_kernel::{update_electric_range, update_magnetic_range, CellAlgebra, CounterError};

/// The four read-only coefficient arrays of the leap-frog update.
#[derive(Clone, Debug)]
pub struct Coefficients<T> {
    /// Electric self-coupling (`vv`).
    pub vv: Field4D<T>,
    /// Electric curl coupling (`vi`).
    pub vi: Field4D<T>,
    /// Magnetic self-coupling (`ii`).
    pub ii: Field4D<T>,
    /// Magnetic curl coupling (`iv`).
    pub iv: Field4D<T>,
}

/// Something that can advance field state by one electric or magnetic
/// half-step over a 3D range.
///
/// Executors are written once against this trait; the symbolic and
/// scalar stencils plug in through [`StencilSweeper`] and the leap-frog
/// counter checks through [`CounterSweeper`].
pub trait Stepper {
    /// How a sweep can fail. [`Infallible`] for the stencils; the
    /// counter sweeps report ordering violations.
    type Error;

    /// Apply the electric update to every cell in `range`.
    fn electric(&mut self, range: Range3D) -> Result<(), Self::Error>;

    /// Apply the magnetic update to every cell in `range`.
    fn magnetic(&mut self, range: Range3D) -> Result<(), Self::Error>;
}

/// [`Stepper`] over the real stencil kernels, for any cell algebra.
#[derive(Debug)]
pub struct StencilSweeper<'a, T: CellAlgebra> {
    /// Electric field grid.
    pub volt: &'a mut Field4D<T>,
    /// Magnetic field grid.
    pub curr: &'a mut Field4D<T>,
    /// Read-only coefficients.
    pub coefficients: &'a Coefficients<T>,
}

impl<T: CellAlgebra> Stepper for StencilSweeper<'_, T> {
    type Error = Infallible;

    fn electric(&mut self, range: Range3D) -> Result<(), Infallible> {
        update_electric_range(
            self.volt,
            self.curr,
            &self.coefficients.vv,
            &self.coefficients.vi,
            range,
        );
        Ok(())
    }

    fn magnetic(&mut self, range: Range3D) -> Result<(), Infallible> {
        update_magnetic_range(
            self.curr,
            self.volt,
            &self.coefficients.ii,
            &self.coefficients.iv,
            range,
        );
        Ok(())
    }
}

/// [`Stepper`] over the half-step counter checks.
#[derive(Debug)]
pub struct CounterSweeper<'a> {
    /// Electric half-step counters.
    pub volt: &'a mut Field4D<u32>,
    /// Magnetic half-step counters.
    pub curr: &'a mut Field4D<u32>,
}

impl Stepper for CounterSweeper<'_> {
    type Error = CounterError;

    fn electric(&mut self, range: Range3D) -> Result<(), CounterError> {
        check_electric_range(self.volt, self.curr, range)
    }

    fn magnetic(&mut self, range: Range3D) -> Result<(), CounterError> {
        check_magnetic_range(self.curr, self.volt, range)
    }
}
