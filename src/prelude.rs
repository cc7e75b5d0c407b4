//! Makes available common structures needed to run a simulation
//!
//! You may write `use plastsim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{At, Config, Dof, Essential, Features, Mesh, Natural, Nbc, ParamSolid, SampleMeshes, StressStrain};
pub use crate::base::{DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::fem::{FemBase, FemState, InputFile, LinearSolver, SolverImplicit};
pub use crate::material::{HistoryStore, PointHistory};
pub use crate::StrError;
