use super::{BcFunction, Feature, Nbc};
use crate::{FnSpaceTime, FnTime};
use std::fmt;

/// Holds natural boundary conditions (distributed loads on the reference boundary)
///
/// The load is `value` if no function is given; otherwise it is `value · f(t)` or
/// `value · f(x, t)` where x holds the reference coordinates of the integration point.
pub struct Natural {
    pub(crate) distributed: Vec<(Feature, Nbc, f64, BcFunction)>,
}

impl Natural {
    /// Allocates a new instance
    pub fn new() -> Self {
        Natural { distributed: Vec::new() }
    }

    /// Sets a constant distributed load on edges (2D)
    pub fn edges(&mut self, edges: &[&Feature], nbc: Nbc, value: f64) -> &mut Self {
        self.features(edges, nbc, value, BcFunction::Constant)
    }

    /// Sets a time-dependent distributed load on edges (2D)
    pub fn edges_fn(&mut self, edges: &[&Feature], nbc: Nbc, multiplier: f64, f: FnTime) -> &mut Self {
        self.features(edges, nbc, multiplier, BcFunction::Time(f))
    }

    /// Sets a distributed load depending on the position and time on edges (2D)
    pub fn edges_fn_xt(&mut self, edges: &[&Feature], nbc: Nbc, multiplier: f64, f: FnSpaceTime) -> &mut Self {
        self.features(edges, nbc, multiplier, BcFunction::SpaceTime(f))
    }

    /// Sets a constant distributed load on faces (3D)
    pub fn faces(&mut self, faces: &[&Feature], nbc: Nbc, value: f64) -> &mut Self {
        self.features(faces, nbc, value, BcFunction::Constant)
    }

    /// Sets a time-dependent distributed load on faces (3D)
    pub fn faces_fn(&mut self, faces: &[&Feature], nbc: Nbc, multiplier: f64, f: FnTime) -> &mut Self {
        self.features(faces, nbc, multiplier, BcFunction::Time(f))
    }

    /// Sets a distributed load depending on the position and time on faces (3D)
    pub fn faces_fn_xt(&mut self, faces: &[&Feature], nbc: Nbc, multiplier: f64, f: FnSpaceTime) -> &mut Self {
        self.features(faces, nbc, multiplier, BcFunction::SpaceTime(f))
    }

    fn features(&mut self, features: &[&Feature], nbc: Nbc, value: f64, f: BcFunction) -> &mut Self {
        for feature in features {
            self.distributed.push(((*feature).clone(), nbc, value, f));
        }
        self
    }
}

impl fmt::Display for Natural {
    /// Prints a formatted summary of Boundary Conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural boundary conditions\n")?;
        write!(f, "===========================\n")?;
        for (feature, nbc, value, func) in &self.distributed {
            match func {
                BcFunction::Constant => write!(f, "{:?} : {:?} = {:?}\n", feature.points, nbc, value)?,
                BcFunction::Time(func) => write!(
                    f,
                    "{:?} : {:?}(t=0) = {:?}, {:?}(t=1) = {:?}\n",
                    feature.points,
                    nbc,
                    value * func(0.0),
                    nbc,
                    value * func(1.0)
                )?,
                BcFunction::SpaceTime(_) => {
                    write!(f, "{:?} : {:?} = {:?} · f(x,t)\n", feature.points, nbc, value)?
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
