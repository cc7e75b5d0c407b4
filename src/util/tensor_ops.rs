use nalgebra::DMatrix;

/// Calculates the deviatoric part of a second-order tensor
///
/// ```text
/// dev(a) = a - (tr(a) / d) I
/// ```
///
/// where d is the space dimension.
pub fn t2_deviator(a: &DMatrix<f64>) -> DMatrix<f64> {
    let d = a.nrows();
    let mean = a.trace() / (d as f64);
    let mut dev = a.clone();
    for i in 0..d {
        dev[(i, i)] -= mean;
    }
    dev
}

/// Calculates the symmetric part of a second-order tensor: (a + aᵀ) / 2
pub fn t2_symmetric(a: &DMatrix<f64>) -> DMatrix<f64> {
    (a + a.transpose()) * 0.5
}

/// Calculates the von Mises equivalent of a stress tensor: √(3/2) ‖dev(σ)‖
pub fn t2_von_mises(sigma: &DMatrix<f64>) -> f64 {
    f64::sqrt(1.5) * t2_deviator(sigma).norm()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{t2_deviator, t2_symmetric, t2_von_mises};
    use approx::assert_abs_diff_eq;
    use nalgebra::DMatrix;

    #[test]
    fn t2_deviator_works() {
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let dev = t2_deviator(&a);
        assert_abs_diff_eq!(dev.trace(), 0.0, epsilon = 1e-15);
        assert_eq!(dev[(0, 0)], -4.0);
        assert_eq!(dev[(1, 1)], 0.0);
        assert_eq!(dev[(2, 2)], 4.0);
        assert_eq!(dev[(0, 1)], 2.0);

        let a = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 1.0]);
        let dev = t2_deviator(&a);
        assert_eq!(dev.as_slice(), &[1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn t2_symmetric_works() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 3.0]);
        let sym = t2_symmetric(&a);
        assert_eq!(sym, DMatrix::from_row_slice(2, 2, &[1.0, 3.0, 3.0, 3.0]));
    }

    #[test]
    fn t2_von_mises_works() {
        // uniaxial stress
        let sigma = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
        assert_abs_diff_eq!(t2_von_mises(&sigma), 10.0, epsilon = 1e-14);
    }
}
