use super::DeformationState;
use crate::StrError;
use nalgebra::DMatrix;

/// Calculates the first Piola-Kirchhoff stress from the Cauchy stress
///
/// ```text
/// P = J σ F⁻ᵀ      (finite strain)
/// P = σ            (small strain)
/// ```
///
/// If `pressure` is given, the volumetric part of σ is replaced by it before the transformation:
///
/// ```text
/// σᵢᵢ ← σᵢᵢ + (p - tr(σ) / d)
/// ```
///
/// where d is the space dimension (mixed formulations).
///
/// With finite strains, an error is returned if J = det(F) is not positive (inverted element).
pub fn calc_first_piola_kirchhoff(
    sigma: &DMatrix<f64>,
    deformation: &DeformationState,
    pressure: Option<f64>,
    small_strain: bool,
) -> Result<DMatrix<f64>, StrError> {
    let ndim = sigma.nrows();
    let mut pp = sigma.clone();
    if let Some(p) = pressure {
        let correction = p - sigma.trace() / (ndim as f64);
        for i in 0..ndim {
            pp[(i, i)] += correction;
        }
    }
    if small_strain {
        return Ok(pp);
    }
    if deformation.jj <= 0.0 || !deformation.jj.is_finite() {
        return Err("the determinant of the deformation gradient must be positive");
    }
    let ff_inv = deformation
        .ff
        .clone()
        .try_inverse()
        .ok_or("cannot compute the inverse of the deformation gradient")?;
    Ok((pp * ff_inv.transpose()) * deformation.jj)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::calc_first_piola_kirchhoff;
    use crate::material::DeformationState;
    use approx::assert_abs_diff_eq;
    use nalgebra::DMatrix;

    #[test]
    fn small_strain_is_identity() {
        let sigma = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 3.0]);
        let grad_u = DMatrix::from_row_slice(2, 2, &[0.1, 0.0, 0.3, 0.2]);
        let deformation = DeformationState::new(grad_u, 2);
        let pp = calc_first_piola_kirchhoff(&sigma, &deformation, None, true).unwrap();
        assert_eq!(pp, sigma);
    }

    #[test]
    fn finite_strain_works() {
        let sigma = DMatrix::from_row_slice(3, 3, &[1.0, 0.5, 0.0, 0.5, 2.0, 0.1, 0.0, 0.1, 3.0]);
        let grad_u = DMatrix::from_row_slice(3, 3, &[0.1, 0.02, 0.0, 0.0, -0.05, 0.03, 0.01, 0.0, 0.2]);
        let deformation = DeformationState::new(grad_u, 3);
        let pp = calc_first_piola_kirchhoff(&sigma, &deformation, None, false).unwrap();
        // σ = P Fᵀ / J
        let back = &pp * deformation.ff.transpose() / deformation.jj;
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(back[(i, j)], sigma[(i, j)], epsilon = 1e-14);
            }
        }
        // undeformed: P = σ
        let pp = calc_first_piola_kirchhoff(&sigma, &DeformationState::undeformed(3), None, false).unwrap();
        assert_eq!(pp, sigma);
    }

    #[test]
    fn pressure_substitution_works() {
        let sigma = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 3.0]);
        let deformation = DeformationState::undeformed(2);
        let pp = calc_first_piola_kirchhoff(&sigma, &deformation, Some(-4.0), true).unwrap();
        // mean stress of σ is 2.0; replaced by -4.0
        assert_abs_diff_eq!(pp[(0, 0)], -5.0, epsilon = 1e-15);
        assert_abs_diff_eq!(pp[(1, 1)], -3.0, epsilon = 1e-15);
        assert_eq!(pp[(0, 1)], 0.5);
        assert_abs_diff_eq!(pp.trace() / 2.0, -4.0, epsilon = 1e-15);
    }

    #[test]
    fn calc_first_piola_kirchhoff_captures_errors() {
        let sigma = DMatrix::identity(2, 2);

        // singular F
        let grad_u = DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, 0.0]);
        let deformation = DeformationState::new(grad_u, 2);
        assert_eq!(
            calc_first_piola_kirchhoff(&sigma, &deformation, None, false).err(),
            Some("the determinant of the deformation gradient must be positive")
        );

        // inverted element: F is invertible but J < 0
        let grad_u = DMatrix::from_row_slice(2, 2, &[-1.5, 0.0, 0.0, 0.0]);
        let deformation = DeformationState::new(grad_u, 2);
        assert_eq!(deformation.jj, -0.5);
        assert_eq!(
            calc_first_piola_kirchhoff(&sigma, &deformation, None, false).err(),
            Some("the determinant of the deformation gradient must be positive")
        );

        // small strain does not require the inverse
        assert!(calc_first_piola_kirchhoff(&sigma, &deformation, None, true).is_ok());
    }
}
