//! Implements the base structures for a finite element simulation

mod assembly;
mod config;
mod constants;
mod enums;
mod equations;
mod essential;
mod features;
mod integ;
mod mesh;
mod natural;
mod parameters;
mod sample_meshes;
mod shapes;
pub use crate::base::assembly::*;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::equations::*;
pub use crate::base::essential::*;
pub use crate::base::features::*;
pub use crate::base::integ::*;
pub use crate::base::mesh::*;
pub use crate::base::natural::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_meshes::*;
pub use crate::base::shapes::*;
