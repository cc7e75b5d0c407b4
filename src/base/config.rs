use super::{Mesh, CONFIG_MIN_TOL};
use crate::material::J2_MAX_ITERATIONS;
use crate::FnTime;
use std::fmt;

/// Holds configuration parameters for the static (pseudo-time) simulation
pub struct Config {
    /// Space dimension
    pub(crate) ndim: usize,

    /// Small strain analysis: the first Piola-Kirchhoff stress equals the Cauchy stress
    pub(crate) small_strain: bool,

    /// Initial pseudo-time
    pub(crate) t_ini: f64,

    /// Final pseudo-time
    pub(crate) t_fin: f64,

    /// Pseudo-time increment as a function of t
    pub(crate) dt: FnTime,

    /// Constant pseudo-time increment (overrides `dt` if set)
    pub(crate) dt_constant: Option<f64>,

    /// Maximum number of load steps
    pub(crate) n_max_time_steps: usize,

    /// Maximum number of Newton-Raphson iterations per load step
    pub(crate) n_max_iterations: usize,

    /// Maximum number of iterations of the local (integration point) solvers, e.g., the return mapping
    pub(crate) n_max_iterations_local: usize,

    /// Absolute tolerance for the Euclidean norm of the residual vector
    pub(crate) tol_rr: f64,

    /// Relative step to compute the finite-difference Jacobian of elements
    pub(crate) perturbation: f64,

    /// Show messages for every load step
    pub(crate) verbose_timesteps: bool,

    /// Show messages for every iteration
    pub(crate) verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new(mesh: &Mesh) -> Self {
        Config {
            ndim: mesh.ndim,
            small_strain: false,
            t_ini: 0.0,
            t_fin: 1.0,
            dt: |_| 1.0,
            dt_constant: None,
            n_max_time_steps: 1_000,
            n_max_iterations: 10,
            n_max_iterations_local: J2_MAX_ITERATIONS,
            tol_rr: 1e-10,
            perturbation: 1e-7,
            verbose_timesteps: false,
            verbose_iterations: false,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.ndim < 2 || self.ndim > 3 {
            return Some(format!("ndim = {:?} is incorrect; it must be 2 or 3", self.ndim));
        }
        if self.t_ini < 0.0 {
            return Some(format!("t_ini = {:?} is incorrect; it must be ≥ 0.0", self.t_ini));
        }
        if self.t_fin < self.t_ini {
            return Some(format!("t_fin = {:?} is incorrect; it must be ≥ t_ini = {:?}", self.t_fin, self.t_ini));
        }
        let dt = self.time_increment(self.t_ini);
        if dt <= 0.0 || !dt.is_finite() {
            return Some(format!("dt(t_ini) = {:?} is incorrect; it must be > 0.0", dt));
        }
        if self.n_max_time_steps < 1 {
            return Some(format!(
                "n_max_time_steps = {:?} is incorrect; it must be ≥ 1",
                self.n_max_time_steps
            ));
        }
        if self.tol_rr < CONFIG_MIN_TOL {
            return Some(format!(
                "tol_rr = {:?} is incorrect; it must be ≥ {:e}",
                self.tol_rr, CONFIG_MIN_TOL
            ));
        }
        if self.perturbation <= 0.0 {
            return Some(format!(
                "perturbation = {:?} is incorrect; it must be > 0.0",
                self.perturbation
            ));
        }
        None // all good
    }

    /// Sets a small strain analysis (otherwise finite strain)
    pub fn set_small_strain(&mut self, flag: bool) -> &mut Self {
        self.small_strain = flag;
        self
    }

    /// Sets the initial pseudo-time
    pub fn set_t_ini(&mut self, value: f64) -> &mut Self {
        self.t_ini = value;
        self
    }

    /// Sets the final pseudo-time
    pub fn set_t_fin(&mut self, value: f64) -> &mut Self {
        self.t_fin = value;
        self
    }

    /// Sets the pseudo-time increment function
    pub fn set_dt(&mut self, dt: FnTime) -> &mut Self {
        self.dt = dt;
        self.dt_constant = None;
        self
    }

    /// Sets a constant pseudo-time increment
    pub fn set_dt_constant(&mut self, value: f64) -> &mut Self {
        self.dt_constant = Some(value);
        self
    }

    /// Returns the pseudo-time increment at time t
    pub fn time_increment(&self, t: f64) -> f64 {
        match self.dt_constant {
            Some(dt) => dt,
            None => (self.dt)(t),
        }
    }

    /// Sets the maximum number of load steps
    pub fn set_n_max_time_steps(&mut self, value: usize) -> &mut Self {
        self.n_max_time_steps = value;
        self
    }

    /// Sets the maximum number of Newton-Raphson iterations
    pub fn set_n_max_iterations(&mut self, value: usize) -> &mut Self {
        self.n_max_iterations = value;
        self
    }

    /// Sets the maximum number of iterations of the local (integration point) solvers
    pub fn set_n_max_iterations_local(&mut self, value: usize) -> &mut Self {
        self.n_max_iterations_local = value;
        self
    }

    /// Sets the absolute tolerance for the norm of the residual vector
    pub fn set_tol_rr(&mut self, value: f64) -> &mut Self {
        self.tol_rr = value;
        self
    }

    /// Sets the relative perturbation for the finite-difference Jacobian
    pub fn set_perturbation(&mut self, value: f64) -> &mut Self {
        self.perturbation = value;
        self
    }

    /// Enables or disables messages for each load step
    pub fn set_verbose_timesteps(&mut self, flag: bool) -> &mut Self {
        self.verbose_timesteps = flag;
        self
    }

    /// Enables or disables messages for each iteration
    pub fn set_verbose_iterations(&mut self, flag: bool) -> &mut Self {
        self.verbose_iterations = flag;
        self
    }

    /// Returns the space dimension
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Returns whether the analysis uses small strains or not
    pub fn small_strain(&self) -> bool {
        self.small_strain
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "ndim = {:?}\n", self.ndim)?;
        write!(f, "small_strain = {:?}\n", self.small_strain)?;
        write!(f, "t_ini = {:?}\n", self.t_ini)?;
        write!(f, "t_fin = {:?}\n", self.t_fin)?;
        write!(f, "n_max_time_steps = {:?}\n", self.n_max_time_steps)?;
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations)?;
        write!(f, "n_max_iterations_local = {:?}\n", self.n_max_iterations_local)?;
        write!(f, "tol_rr = {:?}\n", self.tol_rr)?;
        write!(f, "perturbation = {:?}\n", self.perturbation)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
