use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Defines the geometry kind of cells and boundary features
///
/// Local node numbering (reference coordinates):
///
/// ```text
/// Lin2:  0 ----- 1           ξ ∈ [-1, 1]
///
/// Tri3:  2                   Qua4:  3 ----- 2
///        | `.                       |       |
///        |   `.                     |       |
///        0 ----- 1                  0 ----- 1
///        (ξ,η) ∈ [0,1]              (ξ,η) ∈ [-1,1]
///
/// Tet4:  0:(0,0,0)  1:(1,0,0)  2:(0,1,0)  3:(0,0,1)
///
/// Hex8:  0:(-1,-1,-1)  1:(1,-1,-1)  2:(1,1,-1)  3:(-1,1,-1)
///        4:(-1,-1, 1)  5:(1,-1, 1)  6:(1,1, 1)  7:(-1,1, 1)
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum GeoKind {
    /// Linear segment with 2 nodes
    Lin2,

    /// Linear triangle with 3 nodes
    Tri3,

    /// Bilinear quadrilateral with 4 nodes
    Qua4,

    /// Linear tetrahedron with 4 nodes
    Tet4,

    /// Trilinear hexahedron with 8 nodes
    Hex8,
}

/// Holds the local edges of the Tri3
const TRI3_EDGES: [&[usize]; 3] = [&[0, 1], &[1, 2], &[2, 0]];

/// Holds the local edges of the Qua4
const QUA4_EDGES: [&[usize]; 4] = [&[0, 1], &[1, 2], &[2, 3], &[3, 0]];

/// Holds the local faces of the Tet4
const TET4_FACES: [&[usize]; 4] = [&[0, 2, 1], &[0, 1, 3], &[0, 3, 2], &[1, 2, 3]];

/// Holds the local faces of the Hex8
#[rustfmt::skip]
const HEX8_FACES: [&[usize]; 6] = [
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[2, 3, 7, 6],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

/// Holds the reference coordinates of the Qua4 nodes
const QUA4_NODES: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Holds the reference coordinates of the Hex8 nodes
#[rustfmt::skip]
const HEX8_NODES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
];

impl GeoKind {
    /// Returns the number of nodes
    pub fn nnode(&self) -> usize {
        match self {
            GeoKind::Lin2 => 2,
            GeoKind::Tri3 => 3,
            GeoKind::Qua4 => 4,
            GeoKind::Tet4 => 4,
            GeoKind::Hex8 => 8,
        }
    }

    /// Returns the dimension of the reference space
    pub fn ndim(&self) -> usize {
        match self {
            GeoKind::Lin2 => 1,
            GeoKind::Tri3 | GeoKind::Qua4 => 2,
            GeoKind::Tet4 | GeoKind::Hex8 => 3,
        }
    }

    /// Returns the kind and local connectivity of the boundary features
    ///
    /// The boundary features are edges for 2D cells and faces for 3D cells.
    pub fn boundary(&self) -> Option<(GeoKind, &'static [&'static [usize]])> {
        match self {
            GeoKind::Lin2 => None,
            GeoKind::Tri3 => Some((GeoKind::Lin2, &TRI3_EDGES)),
            GeoKind::Qua4 => Some((GeoKind::Lin2, &QUA4_EDGES)),
            GeoKind::Tet4 => Some((GeoKind::Tri3, &TET4_FACES)),
            GeoKind::Hex8 => Some((GeoKind::Qua4, &HEX8_FACES)),
        }
    }

    /// Calculates the interpolation (shape) functions N(ξ)
    ///
    /// # Panics
    ///
    /// This function will panic if `ksi.len()` is smaller than the reference space dimension
    pub fn interp(&self, ksi: &[f64]) -> DVector<f64> {
        match self {
            GeoKind::Lin2 => DVector::from_vec(vec![(1.0 - ksi[0]) / 2.0, (1.0 + ksi[0]) / 2.0]),
            GeoKind::Tri3 => DVector::from_vec(vec![1.0 - ksi[0] - ksi[1], ksi[0], ksi[1]]),
            GeoKind::Qua4 => DVector::from_fn(4, |m, _| {
                let [a, b] = QUA4_NODES[m];
                (1.0 + a * ksi[0]) * (1.0 + b * ksi[1]) / 4.0
            }),
            GeoKind::Tet4 => DVector::from_vec(vec![1.0 - ksi[0] - ksi[1] - ksi[2], ksi[0], ksi[1], ksi[2]]),
            GeoKind::Hex8 => DVector::from_fn(8, |m, _| {
                let [a, b, c] = HEX8_NODES[m];
                (1.0 + a * ksi[0]) * (1.0 + b * ksi[1]) * (1.0 + c * ksi[2]) / 8.0
            }),
        }
    }

    /// Calculates the derivatives of the interpolation functions dN/dξ
    ///
    /// Returns a matrix with shape (nnode, ndim) where ndim is the reference space dimension.
    pub fn deriv(&self, ksi: &[f64]) -> DMatrix<f64> {
        match self {
            GeoKind::Lin2 => DMatrix::from_row_slice(2, 1, &[-0.5, 0.5]),
            GeoKind::Tri3 => DMatrix::from_row_slice(3, 2, &[-1.0, -1.0, 1.0, 0.0, 0.0, 1.0]),
            GeoKind::Qua4 => {
                let mut dd = DMatrix::zeros(4, 2);
                for m in 0..4 {
                    let [a, b] = QUA4_NODES[m];
                    dd[(m, 0)] = a * (1.0 + b * ksi[1]) / 4.0;
                    dd[(m, 1)] = b * (1.0 + a * ksi[0]) / 4.0;
                }
                dd
            }
            GeoKind::Tet4 => DMatrix::from_row_slice(
                4,
                3,
                &[-1.0, -1.0, -1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            ),
            GeoKind::Hex8 => {
                let mut dd = DMatrix::zeros(8, 3);
                for m in 0..8 {
                    let [a, b, c] = HEX8_NODES[m];
                    dd[(m, 0)] = a * (1.0 + b * ksi[1]) * (1.0 + c * ksi[2]) / 8.0;
                    dd[(m, 1)] = b * (1.0 + a * ksi[0]) * (1.0 + c * ksi[2]) / 8.0;
                    dd[(m, 2)] = c * (1.0 + a * ksi[0]) * (1.0 + b * ksi[1]) / 8.0;
                }
                dd
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
