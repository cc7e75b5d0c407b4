//! Implements the finite element method

mod bc_prescribed;
mod boundary_element;
mod control_convergence;
mod element_solid;
mod elements;
mod fem_base;
mod fem_state;
mod input_file;
mod linear_system;
mod solver_implicit;
mod virtual_work;
pub use crate::fem::bc_prescribed::*;
pub use crate::fem::boundary_element::*;
pub use crate::fem::control_convergence::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::elements::*;
pub use crate::fem::fem_base::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::input_file::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::solver_implicit::*;
pub use crate::fem::virtual_work::*;
