use super::FemBase;
use crate::base::{BcFunction, Dof, Essential, Mesh, PointId};
use crate::StrError;
use nalgebra::DVector;

/// Assists in calculating a prescribed value boundary condition
///
/// This data structure corresponds to a single Essential (Dirichlet) boundary condition
pub struct BcPrescribed {
    /// Point corresponding to the prescribed value
    pub point_id: PointId,

    /// Degree of freedom
    pub dof: Dof,

    /// Prescribed value (or multiplier of f)
    pub value: f64,

    /// Variation with time or with position and time
    pub f: BcFunction,

    /// Reference coordinates of the point
    pub coords: Vec<f64>,

    /// Equation corresponding to the prescribed value
    pub eq: usize,
}

/// Implements an array of BcPrescribed
pub struct BcPrescribedArray {
    /// All values
    pub all: Vec<BcPrescribed>,

    /// An array indicating which DOFs (equations) are prescribed
    ///
    /// The length of `flags` is equal to `n_equation`, the total number of DOFs (total number of equations).
    pub flags: Vec<bool>,

    /// Array with only the DOFs numbers of the prescribed equations
    ///
    /// Compared to the array `flags`, this is a "smaller" array with only the prescribed DOFs numbers.
    pub equations: Vec<usize>,
}

impl BcPrescribed {
    /// Returns the prescribed value at time t
    pub fn value(&self, t: f64) -> f64 {
        self.f.eval(self.value, &self.coords, t)
    }
}

impl BcPrescribedArray {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, essential: &Essential) -> Result<Self, StrError> {
        let mut all = Vec::new();
        let mut flags = vec![false; base.equations.n_equation];
        let mut equations = Vec::new();
        let mut keys: Vec<_> = essential.all.keys().collect();
        keys.sort();
        for key in keys {
            let (point_id, dof) = *key;
            let (value, f) = essential.all[key];
            let eq = base.equations.eq(point_id, dof)?;
            let point = mesh.points.get(point_id).ok_or("the mesh does not contain a prescribed point")?;
            all.push(BcPrescribed {
                point_id,
                dof,
                value,
                f,
                coords: point.coords.clone(),
                eq,
            });
            flags[eq] = true;
            equations.push(eq);
        }
        Ok(BcPrescribedArray { all, flags, equations })
    }

    /// Sets all prescribed values in the solution vector
    pub fn apply(&self, uu: &mut DVector<f64>, t: f64) {
        self.all.iter().for_each(|bc| uu[bc.eq] = bc.value(t));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
