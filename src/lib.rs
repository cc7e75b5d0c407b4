//! Plastsim: finite-strain elastoplastic solid simulator
//!
//! The crate evaluates the mechanical response of a deforming solid at each integration point
//! (kinematics, constitutive update, stress transformation), reduces the stresses into nodal
//! forces by virtual work, and drives the global residual to zero with Newton-Raphson iterations.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

/// Defines a function of time
pub type FnTime = fn(f64) -> f64;

/// Defines a function of the reference coordinates and time
pub type FnSpaceTime = fn(&[f64], f64) -> f64;

pub mod base;
pub mod fem;
pub mod material;
pub mod prelude;
pub mod util;
