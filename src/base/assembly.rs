use super::{Dof, Equations, PointId};
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CooMatrix;

/// Holds all displacement DOFs in the order used by local vectors
const DOFS: [Dof; 3] = [Dof::Ux, Dof::Uy, Dof::Uz];

/// Computes the local-to-global map needed for the assembly process
///
/// The local equation of the i-th displacement component at the m-th node is `m · ndim + i`.
pub fn compute_local_to_global(eqs: &Equations, points: &[PointId]) -> Result<Vec<usize>, StrError> {
    let ndim = eqs.ndim;
    let mut local_to_global = vec![0; points.len() * ndim];
    for (m, point_id) in points.iter().enumerate() {
        for i in 0..ndim {
            local_to_global[m * ndim + i] = eqs.eq(*point_id, DOFS[i])?;
        }
    }
    Ok(local_to_global)
}

/// Adds the local residual vector of an element to the global residual vector
///
/// Entries mapped to prescribed equations are skipped (their global entries remain unchanged).
///
/// # Panics
///
/// Panics if `local_to_global` holds an equation outside `rr_global` or `prescribed`
#[inline]
pub fn assemble_vector(rr_global: &mut DVector<f64>, r_local: &DVector<f64>, local_to_global: &[usize], prescribed: &[bool]) {
    for (value, eq) in r_local.iter().zip(local_to_global) {
        if !prescribed[*eq] {
            rr_global[*eq] += value;
        }
    }
}

/// Pushes the local Jacobian matrix of an element into the global triplet matrix
///
/// Rows and columns of prescribed equations are skipped; duplicate entries are summed
/// when the triplet (COO) matrix is converted.
///
/// # Panics
///
/// Panics if `local_to_global` holds an equation outside `kk_global` or `prescribed`
#[inline]
pub fn assemble_matrix(
    kk_global: &mut CooMatrix<f64>,
    kk_local: &DMatrix<f64>,
    local_to_global: &[usize],
    prescribed: &[bool],
) {
    let n_equation_local = kk_local.nrows();
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !prescribed[g] {
            for ll in 0..n_equation_local {
                let gg = local_to_global[ll];
                if !prescribed[gg] {
                    kk_global.push(g, gg, kk_local[(l, ll)]);
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
