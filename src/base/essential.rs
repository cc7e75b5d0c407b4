use super::{BcFunction, Dof, Feature, PointId};
use crate::{FnSpaceTime, FnTime};
use std::collections::HashMap;
use std::fmt;

/// Holds essential boundary conditions (prescribed displacements)
///
/// The prescribed value is `value` if no function is given; otherwise it is `value · f(t)`
/// or `value · f(x, t)` where x holds the reference coordinates of the point.
pub struct Essential {
    pub(crate) all: HashMap<(PointId, Dof), (f64, BcFunction)>,
}

impl Essential {
    /// Allocates a new instance
    pub fn new() -> Self {
        Essential { all: HashMap::new() }
    }

    /// Sets a constant value at points
    pub fn points(&mut self, points: &[PointId], dof: Dof, value: f64) -> &mut Self {
        self.set(points, dof, value, BcFunction::Constant)
    }

    /// Sets a time-dependent value at points
    pub fn points_fn(&mut self, points: &[PointId], dof: Dof, multiplier: f64, f: FnTime) -> &mut Self {
        self.set(points, dof, multiplier, BcFunction::Time(f))
    }

    /// Sets a value depending on the position and time at points
    pub fn points_fn_xt(&mut self, points: &[PointId], dof: Dof, multiplier: f64, f: FnSpaceTime) -> &mut Self {
        self.set(points, dof, multiplier, BcFunction::SpaceTime(f))
    }

    /// Sets a constant value on edges (2D)
    pub fn edges(&mut self, edges: &[&Feature], dof: Dof, value: f64) -> &mut Self {
        self.features(edges, dof, value, BcFunction::Constant)
    }

    /// Sets a time-dependent value on edges (2D)
    pub fn edges_fn(&mut self, edges: &[&Feature], dof: Dof, multiplier: f64, f: FnTime) -> &mut Self {
        self.features(edges, dof, multiplier, BcFunction::Time(f))
    }

    /// Sets a value depending on the position and time on edges (2D)
    pub fn edges_fn_xt(&mut self, edges: &[&Feature], dof: Dof, multiplier: f64, f: FnSpaceTime) -> &mut Self {
        self.features(edges, dof, multiplier, BcFunction::SpaceTime(f))
    }

    /// Sets a constant value on faces (3D)
    pub fn faces(&mut self, faces: &[&Feature], dof: Dof, value: f64) -> &mut Self {
        self.features(faces, dof, value, BcFunction::Constant)
    }

    /// Sets a time-dependent value on faces (3D)
    pub fn faces_fn(&mut self, faces: &[&Feature], dof: Dof, multiplier: f64, f: FnTime) -> &mut Self {
        self.features(faces, dof, multiplier, BcFunction::Time(f))
    }

    /// Sets a value depending on the position and time on faces (3D)
    pub fn faces_fn_xt(&mut self, faces: &[&Feature], dof: Dof, multiplier: f64, f: FnSpaceTime) -> &mut Self {
        self.features(faces, dof, multiplier, BcFunction::SpaceTime(f))
    }

    /// Returns the prescribed value at (point, dof), reference coordinates x, and time t, if any
    pub fn value(&self, point_id: PointId, dof: Dof, x: &[f64], t: f64) -> Option<f64> {
        self.all.get(&(point_id, dof)).map(|(value, f)| f.eval(*value, x, t))
    }

    fn set(&mut self, points: &[PointId], dof: Dof, value: f64, f: BcFunction) -> &mut Self {
        for point_id in points {
            self.all.insert((*point_id, dof), (value, f));
        }
        self
    }

    fn features(&mut self, features: &[&Feature], dof: Dof, value: f64, f: BcFunction) -> &mut Self {
        for feature in features {
            self.set(&feature.points, dof, value, f);
        }
        self
    }
}

impl fmt::Display for Essential {
    /// Prints a formatted summary of Boundary Conditions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essential boundary conditions\n")?;
        write!(f, "=============================\n")?;
        let mut keys: Vec<_> = self.all.keys().collect();
        keys.sort();
        for key in keys {
            let (value, func) = &self.all[key];
            match func {
                BcFunction::Constant => write!(f, "{:?} : {:?} = {:?}\n", key.0, key.1, value)?,
                BcFunction::Time(func) => write!(
                    f,
                    "{:?} : {:?}(t=0) = {:?}, {:?}(t=1) = {:?}\n",
                    key.0,
                    key.1,
                    value * func(0.0),
                    key.1,
                    value * func(1.0)
                )?,
                BcFunction::SpaceTime(_) => write!(f, "{:?} : {:?} = {:?} · f(x,t)\n", key.0, key.1, value)?,
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Essential;
    use crate::base::{Dof, Feature, GeoKind};

    #[test]
    fn essential_works() {
        let mut essential = Essential::new();
        let edges = &[&Feature {
            kind: GeoKind::Lin2,
            points: vec![1, 2],
        }];
        let faces = &[&Feature {
            kind: GeoKind::Tri3,
            points: vec![3, 4, 5],
        }];
        essential
            .points(&[0], Dof::Ux, 0.0)
            .points_fn(&[0], Dof::Uy, 2.0, |t| t)
            .edges(edges, Dof::Ux, 1.0)
            .faces_fn(faces, Dof::Uz, -1.0, |t| t / 2.0)
            .points_fn_xt(&[6], Dof::Ux, 2.0, |x, t| x[0] * t);
        print!("{}", essential);
        assert_eq!(
            format!("{}", essential),
            "Essential boundary conditions\n\
             =============================\n\
             0 : Ux = 0.0\n\
             0 : Uy(t=0) = 0.0, Uy(t=1) = 2.0\n\
             1 : Ux = 1.0\n\
             2 : Ux = 1.0\n\
             3 : Uz(t=0) = -0.0, Uz(t=1) = -0.5\n\
             4 : Uz(t=0) = -0.0, Uz(t=1) = -0.5\n\
             5 : Uz(t=0) = -0.0, Uz(t=1) = -0.5\n\
             6 : Ux = 2.0 · f(x,t)\n"
        );
        let x = [3.0, 0.0];
        assert_eq!(essential.value(0, Dof::Uy, &x, 0.25), Some(0.5));
        assert_eq!(essential.value(2, Dof::Ux, &x, 0.25), Some(1.0));
        assert_eq!(essential.value(2, Dof::Uy, &x, 0.25), None);
        assert_eq!(essential.value(6, Dof::Ux, &x, 0.25), Some(1.5));
    }

    #[test]
    fn edges_fn_and_faces_work() {
        let edge = Feature {
            kind: GeoKind::Lin2,
            points: vec![7, 8],
        };
        let mut essential = Essential::new();
        essential.edges_fn(&[&edge], Dof::Uy, 1.0, |t| -0.1 * t).faces(&[&edge], Dof::Ux, 0.0);
        assert_eq!(essential.value(8, Dof::Uy, &[0.0, 0.0], 2.0), Some(-0.2));
        assert_eq!(essential.value(7, Dof::Ux, &[0.0, 0.0], 2.0), Some(0.0));
        assert_eq!(essential.all.len(), 4);
        essential
            .edges_fn_xt(&[&edge], Dof::Uy, 0.5, |x, _| x[1])
            .faces_fn_xt(&[&edge], Dof::Uz, 1.0, |x, t| x[0] + t);
        assert_eq!(essential.value(7, Dof::Uy, &[1.0, 4.0], 2.0), Some(2.0));
        assert_eq!(essential.value(8, Dof::Uz, &[1.0, 4.0], 2.0), Some(3.0));
        assert_eq!(essential.all.len(), 6);
    }
}
