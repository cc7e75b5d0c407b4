use crate::util::t2_symmetric;
use nalgebra::{DMatrix, DVector};

/// Holds the deformation state at an integration point
///
/// ```text
/// F = I + ∇u    J = det(F)
/// ```
///
/// The gradient is taken with respect to the reference coordinates.
#[derive(Clone, Debug)]
pub struct DeformationState {
    /// Displacement gradient ∂uᵢ/∂Xⱼ (ndim, ndim)
    pub grad_u: DMatrix<f64>,

    /// Deformation gradient F (ndim, ndim)
    pub ff: DMatrix<f64>,

    /// Determinant of the deformation gradient J = det(F)
    pub jj: f64,
}

impl DeformationState {
    /// Calculates the deformation state from the displacement gradient
    ///
    /// # Panics
    ///
    /// This function will panic if `grad_u` is not a square (ndim, ndim) matrix,
    /// i.e., if the number of displacement components does not match the space dimension.
    pub fn new(grad_u: DMatrix<f64>, ndim: usize) -> Self {
        assert_eq!(grad_u.nrows(), ndim, "the number of displacement components must equal ndim");
        assert_eq!(grad_u.ncols(), ndim, "the number of gradient components must equal ndim");
        let ff = DMatrix::identity(ndim, ndim) + &grad_u;
        let jj = ff.determinant();
        DeformationState { grad_u, ff, jj }
    }

    /// Returns the undeformed state (F = I, J = 1)
    pub fn undeformed(ndim: usize) -> Self {
        DeformationState::new(DMatrix::zeros(ndim, ndim), ndim)
    }

    /// Returns the small strain tensor ε = sym(∇u)
    pub fn small_strain(&self) -> DMatrix<f64> {
        t2_symmetric(&self.grad_u)
    }
}

/// Calculates the displacement gradient from nodal displacements
///
/// ```text
/// ∂uᵢ/∂Xⱼ = Σ_m uᵢᵐ Gₘⱼ
/// ```
///
/// # Input
///
/// * `gradient` -- the gradients of the interpolation functions G (nnode, ndim)
/// * `u_local` -- the nodal displacements ordered as `m · ndim + i` (nnode · ndim)
pub fn calc_displacement_gradient(gradient: &DMatrix<f64>, u_local: &DVector<f64>) -> DMatrix<f64> {
    let (nnode, ndim) = gradient.shape();
    let mut grad_u = DMatrix::zeros(ndim, ndim);
    for m in 0..nnode {
        for i in 0..ndim {
            let u = u_local[m * ndim + i];
            for j in 0..ndim {
                grad_u[(i, j)] += u * gradient[(m, j)];
            }
        }
    }
    grad_u
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
