use crate::{FnSpaceTime, FnTime};
use serde::{Deserialize, Serialize};

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,
}

impl Dof {
    /// Returns the index of the spatial component
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Defines natural boundary conditions (NBC)
///
/// The distributed loads are measured per unit reference area (dead loads).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Nbc {
    /// Distributed load parallel to x
    Qx,

    /// Distributed load parallel to y
    Qy,

    /// Distributed load parallel to z
    Qz,
}

impl Nbc {
    /// Returns the index of the spatial component of the load
    pub fn direction(&self) -> usize {
        match self {
            Nbc::Qx => 0,
            Nbc::Qy => 1,
            Nbc::Qz => 2,
        }
    }
}

/// Defines how the value of a boundary condition varies
///
/// The given value is multiplied by the function, if any.
#[derive(Clone, Copy)]
pub enum BcFunction {
    /// Constant value
    Constant,

    /// Multiplier f(t)
    Time(FnTime),

    /// Multiplier f(x, t) where x holds the reference coordinates
    SpaceTime(FnSpaceTime),
}

impl BcFunction {
    /// Returns the value of the boundary condition at position x and time t
    pub fn eval(&self, value: f64, x: &[f64], t: f64) -> f64 {
        match self {
            BcFunction::Constant => value,
            BcFunction::Time(f) => value * f(t),
            BcFunction::SpaceTime(f) => value * f(x, t),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
