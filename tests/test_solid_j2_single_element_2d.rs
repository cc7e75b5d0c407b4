use approx::assert_abs_diff_eq;
use plastsim::prelude::*;
use plastsim::util::t2_deviator;

// J2 plasticity with a single element
//
// TEST GOAL
//
// Verifies the finite-strain J2 model within the global Newton-Raphson
// iterations, the commit of the history variables after each load step,
// and the consistency of the stress state with the yield surface.
//
// MESH
//
// Unit square
//
// displacement    displacement
//         ↓         ↓
//  roller 3---------2
//         |         |
//         |   [0]   |
//         |         |
//         0---------1
//      fixed       roller
//
// BOUNDARY CONDITIONS
//
// * Vertically restrain the bottom edge
// * Horizontally restrain the left edge
// * Apply a vertical displacement -δ·t on the top edge
//
// CONFIGURATION AND PARAMETERS
//
// * Static non-linear plane-strain simulation (finite strain)
// * Young: E = 1500, Poisson: ν = 0.25
// * Hardening: K = 800, Initial yield stress: Y = 9.0
// * Five load steps with Δt = 0.2 and δ = 0.02
//
// The deformation is homogeneous, thus F = diag(1 + ux(x=1), 1 - δ·t).

const YOUNG: f64 = 1500.0;
const POISSON: f64 = 0.25;
const HARDENING: f64 = 800.0;
const YIELD_STRESS: f64 = 9.0;
const DELTA: f64 = 0.02;

#[test]
fn test_solid_j2_single_element_2d() -> Result<(), StrError> {
    // mesh
    let mesh = SampleMeshes::one_qua4();

    // features
    let features = Features::new(&mesh);
    let left = features.search_points(At::X(0.0))?;
    let bottom = features.search_points(At::Y(0.0))?;
    let top = features.search_points(At::Y(1.0))?;

    // parameters
    let p1 = ParamSolid {
        stress_strain: StressStrain::J2Plasticity {
            young: YOUNG,
            poisson: POISSON,
            hardening: HARDENING,
            yield_stress: YIELD_STRESS,
        },
        ngauss: None,
    };
    let base = FemBase::new(&mesh, [(1, p1)])?;

    // essential boundary conditions
    let mut essential = Essential::new();
    essential
        .points(&left, Dof::Ux, 0.0)
        .points(&bottom, Dof::Uy, 0.0)
        .points_fn(&top, Dof::Uy, -DELTA, |t| t);

    // natural boundary conditions
    let natural = Natural::new();

    // configuration
    let mut config = Config::new(&mesh);
    config.set_dt(|_| 0.2).set_tol_rr(1e-8).set_verbose_iterations(true);

    // FEM state
    let mut state = FemState::new(&mesh, &base, &essential, &config)?;

    // solve
    let mut solver = SolverImplicit::new(&mesh, &base, &config, &essential, &natural)?;
    assert!(!solver.linear_problem());
    solver.solve(&mut state)?;
    assert_abs_diff_eq!(state.t, 1.0, epsilon = 1e-14);
    assert!(solver.control.converged());
    let norms = solver.control.residual_norms();
    assert!(norms.len() >= 2);
    assert!(norms[norms.len() - 1] < 1e-8);

    // deformation gradient
    let ux_right = state.uu[2];
    assert_abs_diff_eq!(state.uu[4], ux_right, epsilon = 1e-10);
    assert!(ux_right > 0.0);
    let jj = (1.0 + ux_right) * (1.0 - DELTA);

    // history and stresses
    let sqrt_2_by_3 = f64::sqrt(2.0 / 3.0);
    let eqps = state.history.old(0, 0)?.accumulated_plastic_strain;
    assert!(eqps > 0.0);
    for p in 0..4 {
        let history = state.history.old(0, p)?;
        assert_eq!(history, state.history.new_value(0, p)?);
        assert_abs_diff_eq!(history.accumulated_plastic_strain, eqps, epsilon = 1e-10);

        // plastic incompressibility
        assert_abs_diff_eq!(history.plastic_deformation.determinant(), 1.0, epsilon = 1e-10);

        // the stress point lies on the yield surface: J ‖dev(σ)‖ = √(2/3) (Y + K εp)
        let sigma = &state.stress[0][p];
        let radius = sqrt_2_by_3 * (YIELD_STRESS + HARDENING * eqps);
        assert_abs_diff_eq!(jj * t2_deviator(sigma).norm(), radius, epsilon = 1e-8);

        // free horizontal surface and compressive vertical stress
        assert_abs_diff_eq!(sigma[(0, 0)], 0.0, epsilon = 1e-6);
        assert!(sigma[(1, 1)] < 0.0);
    }
    Ok(())
}
