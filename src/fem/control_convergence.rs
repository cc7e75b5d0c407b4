use crate::base::Config;
use crate::StrError;
use nalgebra::DVector;

/// Controls the convergence of the Newton-Raphson iterations
///
/// The residual is measured with the Euclidean norm ‖R‖₂ and compared with the absolute
/// tolerance `config.tol_rr`. The norms of the current load step are recorded.
pub struct ConvergenceControl<'a> {
    config: &'a Config,
    iteration: usize,
    norm_rr_prev: f64,
    norm_rr: f64,
    norm_du: f64,
    converged: bool,
    diverging: bool,
    norms: Vec<f64>,
}

impl<'a> ConvergenceControl<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ConvergenceControl {
            config,
            iteration: 0,
            norm_rr_prev: 0.0,
            norm_rr: 0.0,
            norm_du: 0.0,
            converged: false,
            diverging: false,
            norms: Vec::new(),
        }
    }

    /// Resets the flags and the history of norms at the beginning of a load step
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.norm_rr_prev = 0.0;
        self.norm_rr = 0.0;
        self.norm_du = 0.0;
        self.converged = false;
        self.diverging = false;
        self.norms.clear();
    }

    /// Marks the load step as converged (linear problems)
    pub(crate) fn set_converged_linear_problem(&mut self) {
        self.converged = true;
    }

    /// Returns true if the residual norm is below the tolerance
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns the current iteration number
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns the last residual norm ‖R‖₂
    pub fn norm_rr(&self) -> f64 {
        self.norm_rr
    }

    /// Returns the residual norms of the current (or last) load step
    ///
    /// The first entry corresponds to the residual before the first linear solution.
    pub fn residual_norms(&self) -> &[f64] {
        &self.norms
    }

    /// Analyzes the residual vector
    ///
    /// Returns an error if NaN or Inf values are found.
    pub(crate) fn analyze_rr(&mut self, iteration: usize, rr: &DVector<f64>) -> Result<(), StrError> {
        self.iteration = iteration;
        self.norm_rr = rr.norm();
        let found_nan_or_inf = !self.norm_rr.is_finite();
        self.converged = if found_nan_or_inf {
            false
        } else {
            self.norm_rr < self.config.tol_rr
        };
        self.diverging = if found_nan_or_inf || iteration == 0 {
            false
        } else {
            self.norm_rr > self.norm_rr_prev
        };
        self.norm_rr_prev = self.norm_rr;
        self.norms.push(self.norm_rr);
        if found_nan_or_inf {
            Err("found NaN or Inf in the residual vector")
        } else {
            Ok(())
        }
    }

    /// Records the norm of the displacement correction
    pub(crate) fn analyze_du(&mut self, du: &DVector<f64>) -> Result<(), StrError> {
        if du.iter().any(|v| !v.is_finite()) {
            return Err("found NaN or Inf in the displacement correction");
        }
        self.norm_du = du.amax();
        Ok(())
    }

    /// Prints the header before the load steps
    pub fn print_header(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("\nPLASTSIM === LOAD STEPPING AND CONVERGENCE STATISTICS =========================");
            println!("\nLegend:");
            println!("✅ : converged");
            println!("🔹 : converging");
            println!("🎈 : diverging");
            println!("\"iter\" means iteration\n");
            println!("{}", "─".repeat(79));
            println!(
                "{:8} {:>11} {:>11} {:>5} {:>9} {:>9}",
                "timestep", "t", "Δt", "iter", "‖Δu‖∞", "‖R‖₂"
            );
            println!("{}", "─".repeat(79));
        }
    }

    /// Prints the load step information
    pub(crate) fn print_timestep(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>8} {:>11.6e} {:>11.6e}", timestep + 1, t, dt);
        }
    }

    /// Prints the iteration information
    pub(crate) fn print_iteration(&self) {
        if self.config.verbose_iterations {
            let icon = if self.converged {
                "✅"
            } else if self.diverging {
                "🎈"
            } else {
                "🔹"
            };
            if self.iteration == 0 {
                println!(
                    "{:>8} {:>11} {:>11} {:>5} {:>9} {:>9.2e} {}",
                    "·", "·", "·", self.iteration, "·", self.norm_rr, icon
                );
            } else {
                println!(
                    "{:>8} {:>11} {:>11} {:>5} {:>9.2e} {:>9.2e} {}",
                    "·", "·", "·", self.iteration, self.norm_du, self.norm_rr, icon
                );
            }
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("{}", "─".repeat(79));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ConvergenceControl;
    use crate::base::{Config, SampleMeshes};
    use nalgebra::DVector;

    #[test]
    fn analyze_rr_works() {
        let mesh = SampleMeshes::one_qua4();
        let mut config = Config::new(&mesh);
        config.set_tol_rr(1e-6).set_verbose_iterations(true).set_verbose_timesteps(true);
        let mut control = ConvergenceControl::new(&config);
        control.print_header();
        control.print_timestep(0, 1.0, 1.0);

        control.analyze_rr(0, &DVector::from_vec(vec![3.0, 4.0])).unwrap();
        control.print_iteration();
        assert_eq!(control.norm_rr(), 5.0);
        assert!(!control.converged());

        control.analyze_du(&DVector::from_vec(vec![-0.5, 0.1])).unwrap();
        control.analyze_rr(1, &DVector::from_vec(vec![6.0, 8.0])).unwrap();
        control.print_iteration();
        assert!(control.diverging);

        control.analyze_rr(2, &DVector::from_vec(vec![0.0, 0.0])).unwrap();
        control.print_iteration();
        assert!(control.converged());
        assert!(!control.diverging);
        assert_eq!(control.iteration(), 2);
        assert_eq!(control.residual_norms(), &[5.0, 10.0, 0.0]);
        control.print_footer();

        control.reset();
        assert!(!control.converged());
        assert_eq!(control.residual_norms().len(), 0);
        control.set_converged_linear_problem();
        assert!(control.converged());
    }

    #[test]
    fn analyze_captures_nan() {
        let mesh = SampleMeshes::one_qua4();
        let config = Config::new(&mesh);
        let mut control = ConvergenceControl::new(&config);
        assert_eq!(
            control.analyze_rr(0, &DVector::from_vec(vec![f64::NAN, 0.0])).err(),
            Some("found NaN or Inf in the residual vector")
        );
        assert!(!control.converged());
        assert_eq!(
            control.analyze_du(&DVector::from_vec(vec![f64::INFINITY])).err(),
            Some("found NaN or Inf in the displacement correction")
        );
    }
}
