use super::{Dof, Mesh, PointId};
use crate::StrError;

/// Holds the equation numbers of all degrees of freedom
///
/// Each point carries `ndim` displacement DOFs; the equation number is `point_id · ndim + dof`.
#[derive(Clone, Debug)]
pub struct Equations {
    /// Space dimension (number of DOFs per point)
    pub ndim: usize,

    /// Number of points
    pub npoint: usize,

    /// Total number of equations
    pub n_equation: usize,
}

impl Equations {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh) -> Self {
        let npoint = mesh.points.len();
        Equations {
            ndim: mesh.ndim,
            npoint,
            n_equation: npoint * mesh.ndim,
        }
    }

    /// Returns the equation number corresponding to a (PointId, DOF) pair
    pub fn eq(&self, point_id: PointId, dof: Dof) -> Result<usize, StrError> {
        if point_id >= self.npoint {
            return Err("cannot find equation number because point_id is out of bounds");
        }
        if dof.index() >= self.ndim {
            return Err("cannot find equation number because the DOF is not available in this space dimension");
        }
        Ok(point_id * self.ndim + dof.index())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
