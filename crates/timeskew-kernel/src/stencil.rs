//! The leap-frog electric/magnetic update, cell-by-cell and over ranges.
//!
//! The electric (`volt`) grid reads magnetic (`curr`) neighbors at
//! `-1` offsets, clamped to 0 at the boundary; the magnetic grid reads
//! electric neighbors at `+1` offsets and is therefore only ever swept
//! over ranges shrunk by one per axis, so no clamp is needed on that
//! side. Coefficient arrays (`vv`, `vi`, `ii`, `iv`) are read-only.

use timeskew_core::{Field4D, Range3D};

use crate::algebra::CellAlgebra;

/// Advance one electric cell by one half-step.
///
/// Implements, per polarization (shown for `n = 0`):
///
/// ```text
/// v[0] <- v[0]*vv[0] + vi[0]*(c[2](i,j,k) - c[2](i,j-1,k)
///                           - c[1](i,j,k) + c[1](i,j,k-1))
/// ```
///
/// with `-1` indices clamped to 0.
pub fn update_electric_cell<T: CellAlgebra>(
    volt: &mut Field4D<T>,
    curr: &Field4D<T>,
    vv: &Field4D<T>,
    vi: &Field4D<T>,
    i: usize,
    j: usize,
    k: usize,
) {
    let pi = i.saturating_sub(1);
    let pj = j.saturating_sub(1);
    let pk = k.saturating_sub(1);

    let curr0 = curr.get(i, j, k, 0);
    let curr1 = curr.get(i, j, k, 1);
    let curr2 = curr.get(i, j, k, 2);
    let curr0_pk = curr.get(i, j, pk, 0);
    let curr1_pk = curr.get(i, j, pk, 1);
    let curr0_pj = curr.get(i, pj, k, 0);
    let curr2_pj = curr.get(i, pj, k, 2);
    let curr1_pi = curr.get(pi, j, k, 1);
    let curr2_pi = curr.get(pi, j, k, 2);

    let v0 = volt
        .get(i, j, k, 0)
        .mul(vv.get(i, j, k, 0))
        .add(&vi.get(i, j, k, 0).mul(
            &curr2.sub(curr2_pj).sub(curr1).add(curr1_pk),
        ));
    let v1 = volt
        .get(i, j, k, 1)
        .mul(vv.get(i, j, k, 1))
        .add(&vi.get(i, j, k, 1).mul(
            &curr0.sub(curr0_pk).sub(curr2).add(curr2_pi),
        ));
    let v2 = volt
        .get(i, j, k, 2)
        .mul(vv.get(i, j, k, 2))
        .add(&vi.get(i, j, k, 2).mul(
            &curr1.sub(curr1_pi).sub(curr0).add(curr0_pj),
        ));

    volt.set(i, j, k, 0, v0);
    volt.set(i, j, k, 1, v1);
    volt.set(i, j, k, 2, v2);
}

/// Advance one magnetic cell by one half-step.
///
/// The `+1` neighbor reads require `i`, `j`, `k` to be at most
/// `size - 2` on each axis; callers enforce this through the magnetic
/// range bounds.
pub fn update_magnetic_cell<T: CellAlgebra>(
    curr: &mut Field4D<T>,
    volt: &Field4D<T>,
    ii: &Field4D<T>,
    iv: &Field4D<T>,
    i: usize,
    j: usize,
    k: usize,
) {
    let volt0 = volt.get(i, j, k, 0);
    let volt1 = volt.get(i, j, k, 1);
    let volt2 = volt.get(i, j, k, 2);
    let volt0_nk = volt.get(i, j, k + 1, 0);
    let volt1_nk = volt.get(i, j, k + 1, 1);
    let volt0_nj = volt.get(i, j + 1, k, 0);
    let volt2_nj = volt.get(i, j + 1, k, 2);
    let volt1_ni = volt.get(i + 1, j, k, 1);
    let volt2_ni = volt.get(i + 1, j, k, 2);

    let c0 = curr
        .get(i, j, k, 0)
        .mul(ii.get(i, j, k, 0))
        .add(&iv.get(i, j, k, 0).mul(
            &volt2.sub(volt2_nj).sub(volt1).add(volt1_nk),
        ));
    let c1 = curr
        .get(i, j, k, 1)
        .mul(ii.get(i, j, k, 1))
        .add(&iv.get(i, j, k, 1).mul(
            &volt0.sub(volt0_nk).sub(volt2).add(volt2_ni),
        ));
    let c2 = curr
        .get(i, j, k, 2)
        .mul(ii.get(i, j, k, 2))
        .add(&iv.get(i, j, k, 2).mul(
            &volt1.sub(volt1_ni).sub(volt0).add(volt0_nj),
        ));

    curr.set(i, j, k, 0, c0);
    curr.set(i, j, k, 1, c1);
    curr.set(i, j, k, 2, c2);
}

/// Apply the electric update over an inclusive 3D range in (i, j, k)
/// order. An inverted (empty) range is a no-op.
pub fn update_electric_range<T: CellAlgebra>(
    volt: &mut Field4D<T>,
    curr: &Field4D<T>,
    vv: &Field4D<T>,
    vi: &Field4D<T>,
    range: Range3D,
) {
    log::debug!("updating volt {range}");
    for i in range.first[0]..=range.last[0] {
        for j in range.first[1]..=range.last[1] {
            for k in range.first[2]..=range.last[2] {
                update_electric_cell(volt, curr, vv, vi, i, j, k);
            }
        }
    }
}

/// Apply the magnetic update over an inclusive 3D range in (i, j, k)
/// order. An inverted (empty) range is a no-op.
pub fn update_magnetic_range<T: CellAlgebra>(
    curr: &mut Field4D<T>,
    volt: &Field4D<T>,
    ii: &Field4D<T>,
    iv: &Field4D<T>,
    range: Range3D,
) {
    log::debug!("updating curr {range}");
    for i in range.first[0]..=range.last[0] {
        for j in range.first[1]..=range.last[1] {
            for k in range.first[2]..=range.last[2] {
                update_magnetic_cell(curr, volt, ii, iv, i, j, k);
            }
        }
    }
}
