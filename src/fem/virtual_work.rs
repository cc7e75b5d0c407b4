use crate::base::IntegPoint;
use nalgebra::{DMatrix, DVector};

/// Calculates the internal force vector by the principle of virtual work
///
/// ```text
///       ⌠
/// rᵐᵢ = │ Pᵢⱼ Gᵐⱼ dΩ   ≈   Σ_p Pᵢⱼ(ιₚ) Gᵐⱼ(ιₚ) wdvₚ
///       ⌡
///       Ωₑ
/// ```
///
/// where P is the first Piola-Kirchhoff stress and G are the gradients of the interpolation
/// functions with respect to the reference coordinates.
///
/// # Output
///
/// * `residual` -- the local vector (nnode · ndim), ordered as `m · ndim + i`; it is zeroed first
///
/// # Input
///
/// * `stress` -- the first Piola-Kirchhoff stress at each integration point (ngauss)
/// * `ips` -- the integration point data (ngauss)
///
/// # Panics
///
/// This function will panic if the dimensions are inconsistent
pub fn calc_virtual_work(residual: &mut DVector<f64>, stress: &[DMatrix<f64>], ips: &[IntegPoint]) {
    assert_eq!(stress.len(), ips.len());
    residual.fill(0.0);
    for (pp, ip) in stress.iter().zip(ips) {
        let (nnode, ndim) = ip.gradient.shape();
        for m in 0..nnode {
            for i in 0..ndim {
                for j in 0..ndim {
                    residual[m * ndim + i] += pp[(i, j)] * ip.gradient[(m, j)] * ip.wdv;
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
