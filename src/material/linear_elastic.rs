use super::DeformationState;
use nalgebra::DMatrix;

/// Implements a linear elastic model (small strain)
///
/// ```text
/// σ = 2μ ε + λ tr(ε) I
///
/// μ = E / (2 (1 + ν))
/// λ = E ν / ((1 + ν) (1 - 2ν))
/// ```
///
/// In 2D, the tensors are (2, 2) and the relation corresponds to plane-strain.
#[derive(Clone, Debug)]
pub struct LinearElastic {
    /// Lamé's first parameter λ
    lambda: f64,

    /// Shear modulus μ
    mu: f64,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Self {
        LinearElastic {
            lambda: young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson)),
            mu: young / (2.0 * (1.0 + poisson)),
        }
    }

    /// Returns the Lamé parameters (λ, μ)
    pub fn lame(&self) -> (f64, f64) {
        (self.lambda, self.mu)
    }

    /// Calculates the Cauchy stress from the small strain tensor
    pub fn calc_stress(&self, eps: &DMatrix<f64>) -> DMatrix<f64> {
        let ndim = eps.nrows();
        let mut sigma = eps * (2.0 * self.mu);
        let lambda_tr = self.lambda * eps.trace();
        for i in 0..ndim {
            sigma[(i, i)] += lambda_tr;
        }
        sigma
    }

    /// Calculates the Cauchy stress from the deformation state, using ε = sym(∇u)
    pub fn update(&self, deformation: &DeformationState) -> DMatrix<f64> {
        self.calc_stress(&deformation.small_strain())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
