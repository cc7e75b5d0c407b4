use super::GeoKind;
use crate::StrError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Defines the index of a point
pub type PointId = usize;

/// Defines the index of a cell
pub type CellId = usize;

/// Defines the attribute (region) of a cell
pub type CellAttribute = usize;

/// Holds a point of the mesh
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Point {
    /// Identification number which equals the index of the point in the mesh
    pub id: PointId,

    /// Coordinates (ndim)
    pub coords: Vec<f64>,
}

/// Holds a cell (element) of the mesh
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Cell {
    /// Identification number which equals the index of the cell in the mesh
    pub id: CellId,

    /// Attribute identifying the region and, thus, the material parameters
    pub attribute: CellAttribute,

    /// Geometry kind
    pub kind: GeoKind,

    /// List of points defining the cell (nnode)
    pub points: Vec<PointId>,
}

/// Holds the mesh data in the reference configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Mesh {
    /// Space dimension (2 or 3)
    pub ndim: usize,

    /// All points
    pub points: Vec<Point>,

    /// All cells
    pub cells: Vec<Cell>,
}

impl Mesh {
    /// Checks whether the mesh data is consistent or not
    pub fn check(&self) -> Result<(), StrError> {
        if self.ndim < 2 || self.ndim > 3 {
            return Err("ndim must be 2 or 3");
        }
        if self.points.is_empty() {
            return Err("there are no points in the mesh");
        }
        if self.cells.is_empty() {
            return Err("there are no cells in the mesh");
        }
        for (index, point) in self.points.iter().enumerate() {
            if point.id != index {
                return Err("point.id must equal the index of the point in the points array");
            }
            if point.coords.len() != self.ndim {
                return Err("the number of coordinates of a point must equal ndim");
            }
        }
        let npoint = self.points.len();
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.id != index {
                return Err("cell.id must equal the index of the cell in the cells array");
            }
            if cell.kind.ndim() != self.ndim {
                return Err("the geometry kind of a cell is not compatible with ndim");
            }
            if cell.points.len() != cell.kind.nnode() {
                return Err("the number of points of a cell does not match its geometry kind");
            }
            if cell.points.iter().any(|p| *p >= npoint) {
                return Err("a cell refers to a point that does not exist");
            }
        }
        Ok(())
    }

    /// Returns the coordinates of a list of points as a matrix (npoint, ndim)
    ///
    /// # Panics
    ///
    /// This function will panic if a point id is out of bounds
    pub fn coords_matrix(&self, points: &[PointId]) -> DMatrix<f64> {
        DMatrix::from_fn(points.len(), self.ndim, |m, j| self.points[points[m]].coords[j])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::base::{GeoKind, SampleMeshes};

    #[test]
    fn check_works() {
        let mesh = SampleMeshes::one_qua4();
        assert_eq!(mesh.check(), Ok(()));
        let mesh = SampleMeshes::one_hex8();
        assert_eq!(mesh.check(), Ok(()));
    }

    #[test]
    fn check_captures_errors() {
        let mut mesh = SampleMeshes::one_qua4();
        mesh.ndim = 1;
        assert_eq!(mesh.check().err(), Some("ndim must be 2 or 3"));

        let mut mesh = SampleMeshes::one_qua4();
        mesh.points[1].id = 7;
        assert_eq!(
            mesh.check().err(),
            Some("point.id must equal the index of the point in the points array")
        );

        let mut mesh = SampleMeshes::one_qua4();
        mesh.points[2].coords.push(0.0);
        assert_eq!(mesh.check().err(), Some("the number of coordinates of a point must equal ndim"));

        let mut mesh = SampleMeshes::one_qua4();
        mesh.cells[0].kind = GeoKind::Hex8;
        assert_eq!(
            mesh.check().err(),
            Some("the geometry kind of a cell is not compatible with ndim")
        );

        let mut mesh = SampleMeshes::one_qua4();
        mesh.cells[0].kind = GeoKind::Tri3;
        assert_eq!(
            mesh.check().err(),
            Some("the number of points of a cell does not match its geometry kind")
        );

        let mut mesh = SampleMeshes::one_qua4();
        mesh.cells[0].points[3] = 100;
        assert_eq!(mesh.check().err(), Some("a cell refers to a point that does not exist"));

        let mut mesh = SampleMeshes::one_qua4();
        mesh.cells.clear();
        assert_eq!(mesh.check().err(), Some("there are no cells in the mesh"));
    }

    #[test]
    fn coords_matrix_works() {
        let mesh = SampleMeshes::one_qua4();
        let xx = mesh.coords_matrix(&[2, 3]);
        assert_eq!(xx.shape(), (2, 2));
        assert_eq!(xx.as_slice(), &[1.0, 0.0, 1.0, 1.0]); // column-major
    }
}
