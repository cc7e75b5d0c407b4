use super::{DeformationState, PointHistory};
use crate::base::SQRT_2_BY_3;
use crate::util::t2_deviator;
use crate::StrError;
use nalgebra::DMatrix;

/// Defines the default maximum number of iterations of the return mapping
pub const J2_MAX_ITERATIONS: usize = 30;

/// Defines the tolerance to detect yielding (f > tol)
const J2_TOL_YIELD: f64 = 1e-12;

/// Defines the tolerance of the return mapping residual (absolute and relative)
const J2_TOL_RESIDUAL: f64 = 1e-11;

/// Implements the J2 (von Mises) plasticity model with multiplicative decomposition
///
/// The model employs the isochoric elastic left Cauchy-Green tensor computed from the
/// plastic part of the deformation gradient Fp stored at the integration point:
///
/// ```text
/// b̄e = J^(-2/3) F (Fp⁻¹ Fp⁻ᵀ) Fᵀ
/// s  = μ dev(b̄e)
/// f  = ‖s‖ - √(2/3) (Y + K εp)
/// σ  = p I + s / J    with    p = ½ κ (J - 1/J)
/// ```
///
/// **Note:** In 2D, all tensors are (2, 2).
#[derive(Clone, Debug)]
pub struct J2Plasticity {
    /// Bulk modulus κ
    kappa: f64,

    /// Shear modulus μ
    mu: f64,

    /// Linear isotropic hardening modulus K
    hardening: f64,

    /// Initial yield stress Y
    yield_stress: f64,

    /// Maximum number of iterations of the return mapping
    max_iterations: usize,
}

impl J2Plasticity {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64, hardening: f64, yield_stress: f64) -> Self {
        J2Plasticity {
            kappa: young / (3.0 * (1.0 - 2.0 * poisson)),
            mu: young / (2.0 * (1.0 + poisson)),
            hardening,
            yield_stress,
            max_iterations: J2_MAX_ITERATIONS,
        }
    }

    /// Sets the maximum number of iterations of the return mapping
    pub fn set_max_iterations(&mut self, value: usize) -> &mut Self {
        self.max_iterations = value;
        self
    }

    /// Returns the bulk and shear moduli (κ, μ)
    pub fn moduli(&self) -> (f64, f64) {
        (self.kappa, self.mu)
    }

    /// Returns the radius of the yield surface √(2/3) (Y + K εp)
    pub fn yield_radius(&self, accumulated_plastic_strain: f64) -> f64 {
        SQRT_2_BY_3 * (self.yield_stress + self.hardening * accumulated_plastic_strain)
    }

    /// Updates the Cauchy stress and the history variables
    ///
    /// Returns the Cauchy stress, the new history, and the consistency parameter Δγ
    /// (zero if the step is elastic).
    ///
    /// The old history is only read; the new history is returned by value.
    pub fn update(
        &self,
        deformation: &DeformationState,
        old: &PointHistory,
    ) -> Result<(DMatrix<f64>, PointHistory, f64), StrError> {
        let ndim = deformation.ff.nrows();
        let jj = deformation.jj;
        if jj <= 0.0 || !jj.is_finite() {
            return Err("the determinant of the deformation gradient must be positive");
        }
        let ff = &deformation.ff;

        // elastic trial state
        let fp_inv = old
            .plastic_deformation
            .clone()
            .try_inverse()
            .ok_or("the plastic deformation gradient is singular")?;
        let cp_inv = &fp_inv * fp_inv.transpose();
        let be = ff * cp_inv * ff.transpose() * f64::powf(jj, -2.0 / 3.0);
        let mut s = t2_deviator(&be) * self.mu;
        let mubar = self.mu * be.trace() / (ndim as f64);
        let smag = s.norm();

        // check yield
        let eqps_old = old.accumulated_plastic_strain;
        let f = smag - self.yield_radius(eqps_old);
        let mut new = old.clone();
        let mut dgam = 0.0;
        if f > J2_TOL_YIELD {
            if smag <= 0.0 {
                return Err("the trial deviatoric stress is zero during yielding");
            }
            dgam = self.return_mapping(f, smag, mubar, eqps_old, self.max_iterations)?;
            let nn = &s / smag;
            s -= &nn * (2.0 * mubar * dgam);
            new.accumulated_plastic_strain = eqps_old + SQRT_2_BY_3 * dgam;
            new.plastic_deformation = (&nn * dgam).exp() * &old.plastic_deformation;
        }

        // volumetric part
        let p = 0.5 * self.kappa * (jj - 1.0 / jj);
        let mut sigma = s / jj;
        for i in 0..ndim {
            sigma[(i, i)] += p;
        }
        Ok((sigma, new, dgam))
    }

    /// Solves the consistency condition for Δγ using Newton's method
    ///
    /// ```text
    /// R(x) = ‖s_trial‖ - (2 μ̄ x + √(2/3) (Y + K (εp_old + √(2/3) x)))
    /// dR/dx = -2 μ̄ (1 + K / (3 μ̄))
    /// ```
    pub(crate) fn return_mapping(
        &self,
        f_trial: f64,
        smag: f64,
        mubar: f64,
        eqps_old: f64,
        max_iterations: usize,
    ) -> Result<f64, StrError> {
        let drdx = -2.0 * mubar * (1.0 + self.hardening / (3.0 * mubar));
        let mut x = 0.0;
        let mut r = f_trial;
        for iteration in 0..(max_iterations + 1) {
            let converged = f64::abs(r) < J2_TOL_RESIDUAL
                || f64::abs(r / self.yield_stress) < J2_TOL_RESIDUAL
                || f64::abs(r / f_trial) < J2_TOL_RESIDUAL;
            if converged {
                return Ok(x);
            }
            if iteration == max_iterations {
                break;
            }
            x -= r / drdx;
            if !x.is_finite() {
                return Err("found NaN or Inf in the return mapping");
            }
            let eqps = eqps_old + SQRT_2_BY_3 * x;
            r = smag - (2.0 * mubar * x + SQRT_2_BY_3 * (self.yield_stress + self.hardening * eqps));
        }
        Err("J2 return mapping did not converge")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::J2Plasticity;
    use crate::material::{DeformationState, PointHistory};
    use crate::util::t2_deviator;
    use approx::assert_abs_diff_eq;
    use nalgebra::DMatrix;

    const YOUNG: f64 = 1500.0;
    const POISSON: f64 = 0.25;
    const HARDENING: f64 = 800.0;
    const YIELD_STRESS: f64 = 9.0;

    fn model() -> J2Plasticity {
        J2Plasticity::new(YOUNG, POISSON, HARDENING, YIELD_STRESS)
    }

    // isochoric extension along x plus compression along the other directions
    fn stretch(ndim: usize, lx: f64) -> DeformationState {
        let mut grad_u = DMatrix::zeros(ndim, ndim);
        grad_u[(0, 0)] = lx - 1.0;
        let lt = f64::powf(lx, -1.0 / ((ndim - 1) as f64));
        for i in 1..ndim {
            grad_u[(i, i)] = lt - 1.0;
        }
        DeformationState::new(grad_u, ndim)
    }

    #[test]
    fn moduli_work() {
        let (kappa, mu) = model().moduli();
        assert_abs_diff_eq!(kappa, 1000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mu, 600.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_displacement_gives_zero_stress() {
        let model = model();
        for ndim in [2, 3] {
            let old = PointHistory::new(ndim);
            let (sigma, new, dgam) = model.update(&DeformationState::undeformed(ndim), &old).unwrap();
            assert_abs_diff_eq!(sigma.norm(), 0.0, epsilon = 1e-15);
            assert_eq!(new, old);
            assert_eq!(dgam, 0.0);
        }
    }

    #[test]
    fn elastic_step_keeps_history() {
        let model = model();
        for ndim in [2, 3] {
            let mut old = PointHistory::new(ndim);
            old.accumulated_plastic_strain = 0.01;
            let deformation = stretch(ndim, 1.001);
            let (sigma, new, dgam) = model.update(&deformation, &old).unwrap();
            assert_eq!(dgam, 0.0);
            assert_eq!(new, old);
            // the stress is inside the yield surface
            let smag = t2_deviator(&sigma).norm() * deformation.jj;
            assert!(smag < model.yield_radius(old.accumulated_plastic_strain));
            // calling again gives the same result
            let (sigma_again, new_again, _) = model.update(&deformation, &new).unwrap();
            assert_eq!(sigma_again, sigma);
            assert_eq!(new_again, old);
        }
    }

    #[test]
    fn plastic_step_returns_to_the_yield_surface() {
        let model = model();
        for ndim in [2, 3] {
            let old = PointHistory::new(ndim);
            let deformation = stretch(ndim, 1.05);
            let (sigma, new, dgam) = model.update(&deformation, &old).unwrap();
            assert!(dgam > 0.0);
            assert!(new.accumulated_plastic_strain > old.accumulated_plastic_strain);
            let smag = t2_deviator(&sigma).norm() * deformation.jj;
            let radius = model.yield_radius(new.accumulated_plastic_strain);
            assert_abs_diff_eq!(smag, radius, epsilon = 1e-10);
            // plastic flow is isochoric
            assert_abs_diff_eq!(new.plastic_deformation.determinant(), 1.0, epsilon = 1e-12);
            // the Cauchy stress is symmetric
            assert_abs_diff_eq!(sigma[(0, 1)], sigma[(1, 0)], epsilon = 1e-12);
        }
    }

    #[test]
    fn plastic_strain_is_non_decreasing() {
        let model = model();
        let mut old = PointHistory::new(3);
        let mut previous = 0.0;
        for lx in [1.005, 1.01, 1.02, 1.03, 1.025, 1.0, 0.98] {
            let (_, new, _) = model.update(&stretch(3, lx), &old).unwrap();
            assert!(new.accumulated_plastic_strain >= previous);
            previous = new.accumulated_plastic_strain;
            old = new;
        }
        assert!(previous > 0.0);
    }

    #[test]
    fn zero_hardening_works() {
        let model = J2Plasticity::new(YOUNG, POISSON, 0.0, YIELD_STRESS);
        let old = PointHistory::new(3);
        let deformation = stretch(3, 1.05);
        let (sigma, new, _) = model.update(&deformation, &old).unwrap();
        let smag = t2_deviator(&sigma).norm() * deformation.jj;
        assert_abs_diff_eq!(smag, model.yield_radius(0.0), epsilon = 1e-10);
        assert!(new.accumulated_plastic_strain > 0.0);
    }

    #[test]
    fn update_captures_errors() {
        let model = model();
        let old = PointHistory::new(2);
        let grad_u = DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            model.update(&DeformationState::new(grad_u, 2), &old).err(),
            Some("the determinant of the deformation gradient must be positive")
        );

        let mut old = PointHistory::new(2);
        old.plastic_deformation[(0, 0)] = 0.0;
        assert_eq!(
            model.update(&DeformationState::undeformed(2), &old).err(),
            Some("the plastic deformation gradient is singular")
        );

        // inconsistent parameters: the yield radius is negative
        let model = J2Plasticity::new(YOUNG, POISSON, 0.0, -1.0);
        let old = PointHistory::new(2);
        assert_eq!(
            model.update(&DeformationState::undeformed(2), &old).err(),
            Some("the trial deviatoric stress is zero during yielding")
        );
    }

    #[test]
    fn return_mapping_captures_non_convergence() {
        let model = model();
        let smag = 10.0;
        let f = smag - model.yield_radius(0.0);
        assert_eq!(
            model.return_mapping(f, smag, 600.0, 0.0, 0).err(),
            Some("J2 return mapping did not converge")
        );
        // the residual is linear in Δγ; thus one iteration suffices
        let x = model.return_mapping(f, smag, 600.0, 0.0, 1).unwrap();
        let (_, mu) = model.moduli();
        assert!(x > 0.0);
        assert_abs_diff_eq!(x, f / (2.0 * mu + 2.0 * HARDENING / 3.0), epsilon = 1e-15);
    }
}
