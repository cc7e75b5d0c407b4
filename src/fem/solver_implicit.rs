use super::{BcPrescribedArray, Boundaries, ConvergenceControl, Elements, FemBase, FemState};
use super::{LinearSolver, LinearSystem};
use crate::base::{Config, Essential, Mesh, Natural, T_FIN_TOL};
use crate::StrError;

/// Defines the states of the Newton-Raphson iterations within a load step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewtonState {
    /// Computes the global Jacobian matrix (the residual is already available)
    Assembling,

    /// Solves the linear system and updates the displacements
    LinearSolving,

    /// Computes the residual at the updated displacements and checks its norm
    CheckingConvergence,

    /// The load step is accepted
    Converged,

    /// The maximum number of iterations has been reached
    Failed,
}

/// Implements the implicit (static) finite element method solver
///
/// The global residual R = Fint - Fext is driven to zero by Newton-Raphson iterations within
/// each load step. The history variables are committed after each accepted load step and
/// rolled back if the load step fails.
pub struct SolverImplicit<'a> {
    /// Holds configuration parameters
    pub config: &'a Config,

    /// Holds a collection of prescribed displacements
    pub bc_prescribed: BcPrescribedArray,

    /// Holds a collection of boundary elements (distributed loads)
    pub boundaries: Boundaries,

    /// Holds a collection of elements
    pub elements: Elements,

    /// Holds variables to solve the global linear system
    pub linear_system: LinearSystem,

    /// Holds the convergence statistics
    pub control: ConvergenceControl<'a>,

    /// Indicates that all elements are linear elastic with small strains
    linear_problem: bool,
}

impl<'a> SolverImplicit<'a> {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        config: &'a Config,
        essential: &Essential,
        natural: &Natural,
    ) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate solver because config.validate() failed");
        }
        if config.ndim != mesh.ndim {
            return Err("the space dimension of the mesh is inconsistent with the config");
        }
        let bc_prescribed = BcPrescribedArray::new(mesh, base, essential)?;
        let boundaries = Boundaries::new(mesh, base, natural)?;
        let elements = Elements::new(mesh, base, config)?;
        let linear_system = LinearSystem::new(base, &bc_prescribed, &elements);
        let linear_problem = elements.all_elastic() && config.small_strain;
        Ok(SolverImplicit {
            config,
            bc_prescribed,
            boundaries,
            elements,
            linear_system,
            control: ConvergenceControl::new(config),
            linear_problem,
        })
    }

    /// Replaces the solver of the global linear system
    pub fn set_linear_solver(&mut self, solver: Box<dyn LinearSolver>) -> &mut Self {
        self.linear_system.solver = solver;
        self
    }

    /// Tells whether the problem is linear (one linear solution per load step) or not
    pub fn linear_problem(&self) -> bool {
        self.linear_problem
    }

    /// Solves the equilibrium problem for all load steps from the current time up to t_fin
    ///
    /// On failure, the history, the displacements, and the time are restored to the last
    /// accepted load step and the error is returned.
    pub fn solve(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let config = self.config;
        self.control.print_header();
        for timestep in 0..config.n_max_time_steps {
            // update time
            let dt = config.time_increment(state.t);
            if state.t + dt > config.t_fin + T_FIN_TOL {
                break;
            }
            let t_old = state.t;
            let uu_old = state.uu.clone();
            state.dt = dt;
            state.t += dt;

            // set the prescribed displacements at the new time
            self.bc_prescribed.apply(&mut state.uu, state.t);
            self.control.reset();
            self.control.print_timestep(timestep, state.t, state.dt);

            // run the iterations and accept or reject the load step
            match self.run_load_step(state) {
                Ok(()) => state.history.commit(),
                Err(e) => {
                    state.history.rollback();
                    state.uu.copy_from(&uu_old);
                    state.t = t_old;
                    self.control.print_footer();
                    return Err(e);
                }
            }
        }
        self.control.print_footer();
        Ok(())
    }

    /// Runs the Newton-Raphson state machine for the current load step
    fn run_load_step(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let config = self.config;

        // residual at the trial displacements
        self.calc_residual(state)?;
        self.control.analyze_rr(0, &self.linear_system.rr)?;
        self.control.print_iteration();

        let mut iteration = 0;
        let mut newton = if !self.linear_problem && self.control.converged() {
            NewtonState::Converged
        } else {
            NewtonState::Assembling
        };
        loop {
            newton = match newton {
                NewtonState::Assembling => {
                    if !self.linear_problem && iteration >= config.n_max_iterations {
                        NewtonState::Failed
                    } else {
                        self.calc_jacobian(state)?;
                        NewtonState::LinearSolving
                    }
                }
                NewtonState::LinearSolving => {
                    let lin_sys = &mut self.linear_system;
                    let rhs = -&lin_sys.rr;
                    lin_sys.solver.solve(&mut lin_sys.du, &lin_sys.kk, &rhs)?;
                    self.control.analyze_du(&lin_sys.du)?;
                    state.uu += &lin_sys.du;
                    iteration += 1;
                    NewtonState::CheckingConvergence
                }
                NewtonState::CheckingConvergence => {
                    self.calc_residual(state)?;
                    self.control.analyze_rr(iteration, &self.linear_system.rr)?;
                    if self.linear_problem {
                        self.control.set_converged_linear_problem();
                    }
                    self.control.print_iteration();
                    if self.control.converged() {
                        NewtonState::Converged
                    } else {
                        NewtonState::Assembling
                    }
                }
                NewtonState::Converged => return Ok(()),
                NewtonState::Failed => {
                    println!(
                        "ERROR: Newton-Raphson did not converge in {} iterations (‖R‖₂ = {:e})",
                        iteration,
                        self.control.norm_rr()
                    );
                    return Err("Newton-Raphson did not converge");
                }
            };
        }
    }

    /// Computes and assembles the global residual vector R = Fint - Fext
    ///
    /// The new history and the Cauchy stresses are written to the state.
    fn calc_residual(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let rr = &mut self.linear_system.rr;
        let flags = &self.bc_prescribed.flags;
        self.elements
            .calc_residuals(&state.uu, &mut state.history, &mut state.stress)?;
        self.elements.assemble_residuals(rr, flags);
        self.boundaries.calc_residuals(state.t);
        self.boundaries.assemble_residuals(rr, flags);
        Ok(())
    }

    /// Computes and assembles the global Jacobian matrix
    fn calc_jacobian(&mut self, state: &FemState) -> Result<(), StrError> {
        let kk = &mut self.linear_system.kk;
        self.elements
            .calc_jacobians(&state.uu, &state.history, self.config.perturbation)?;
        self.elements.assemble_jacobians(kk, &self.bc_prescribed.flags);
        // put ones on the diagonal of the prescribed equations
        for eq in &self.bc_prescribed.equations {
            kk.push(*eq, *eq, 1.0);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
