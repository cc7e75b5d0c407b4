use super::{GeoKind, Mesh, PointId};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Defines the tolerance to compare coordinates
const TOL_COORD: f64 = 1e-10;

/// Holds a boundary feature: an edge in 2D or a face in 3D
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    /// Geometry kind of the feature
    pub kind: GeoKind,

    /// List of points defining the feature
    pub points: Vec<PointId>,
}

/// Specifies a constant coordinate used to search points and features
#[derive(Clone, Copy, Debug)]
pub enum At {
    /// Constant x coordinate
    X(f64),

    /// Constant y coordinate
    Y(f64),

    /// Constant z coordinate
    Z(f64),
}

impl At {
    /// Tells whether the coordinates of a point satisfy the constraint or not
    fn contains(&self, coords: &[f64]) -> bool {
        let (index, value) = match self {
            At::X(x) => (0, *x),
            At::Y(y) => (1, *y),
            At::Z(z) => (2, *z),
        };
        index < coords.len() && f64::abs(coords[index] - value) < TOL_COORD
    }
}

/// Holds the boundary features of a mesh
///
/// The boundary features are the edges (2D) or faces (3D) shared by one cell only.
pub struct Features<'a> {
    /// Holds the mesh
    mesh: &'a Mesh,

    /// All boundary edges (2D) or faces (3D)
    pub all: Vec<Feature>,
}

impl<'a> Features<'a> {
    /// Extracts the boundary features of a mesh
    pub fn new(mesh: &'a Mesh) -> Self {
        let mut map: BTreeMap<Vec<PointId>, (usize, Feature)> = BTreeMap::new();
        for cell in &mesh.cells {
            if let Some((kind, locals)) = cell.kind.boundary() {
                for local in locals {
                    let points: Vec<_> = local.iter().map(|l| cell.points[*l]).collect();
                    let mut key = points.clone();
                    key.sort();
                    map.entry(key)
                        .and_modify(|(count, _)| *count += 1)
                        .or_insert((1, Feature { kind, points }));
                }
            }
        }
        let all = map
            .into_values()
            .filter_map(|(count, feature)| if count == 1 { Some(feature) } else { None })
            .collect();
        Features { mesh, all }
    }

    /// Searches all points of the mesh satisfying the constraint
    pub fn search_points(&self, at: At) -> Result<Vec<PointId>, StrError> {
        let res: Vec<_> = self
            .mesh
            .points
            .iter()
            .filter(|p| at.contains(&p.coords))
            .map(|p| p.id)
            .collect();
        if res.is_empty() {
            return Err("cannot find any point with the given constraint");
        }
        Ok(res)
    }

    /// Searches the boundary edges of a 2D mesh satisfying the constraint
    pub fn search_edges(&self, at: At) -> Result<Vec<&Feature>, StrError> {
        if self.mesh.ndim != 2 {
            return Err("search_edges requires a 2D mesh");
        }
        let res = self.search(at);
        if res.is_empty() {
            return Err("cannot find any edge with the given constraint");
        }
        Ok(res)
    }

    /// Searches the boundary faces of a 3D mesh satisfying the constraint
    pub fn search_faces(&self, at: At) -> Result<Vec<&Feature>, StrError> {
        if self.mesh.ndim != 3 {
            return Err("search_faces requires a 3D mesh");
        }
        let res = self.search(at);
        if res.is_empty() {
            return Err("cannot find any face with the given constraint");
        }
        Ok(res)
    }

    fn search(&self, at: At) -> Vec<&Feature> {
        self.all
            .iter()
            .filter(|f| f.points.iter().all(|p| at.contains(&self.mesh.points[*p].coords)))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
