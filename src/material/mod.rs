//! Implements material models and the integration point kinematics

mod first_piola;
mod history;
mod j2_plasticity;
mod kinematics;
mod linear_elastic;
mod stress_strain;
pub use crate::material::first_piola::*;
pub use crate::material::history::*;
pub use crate::material::j2_plasticity::*;
pub use crate::material::kinematics::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::stress_strain::*;
