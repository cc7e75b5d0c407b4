use super::GeoKind;
use crate::StrError;
use nalgebra::{DMatrix, DVector};

/// Holds the reference coordinates and the weight of an integration point: [ξ, η, ζ, w]
pub type IntegPointData = [f64; 4];

/// Holds 1/√3
const A: f64 = 0.5773502691896257;

/// Integration points for Lin2 (1 point)
pub const IP_LIN_1: [IntegPointData; 1] = [[0.0, 0.0, 0.0, 2.0]];

/// Integration points for Lin2 (2 points)
pub const IP_LIN_2: [IntegPointData; 2] = [[-A, 0.0, 0.0, 1.0], [A, 0.0, 0.0, 1.0]];

/// Integration points for Tri3 (1 point)
pub const IP_TRI_1: [IntegPointData; 1] = [[1.0 / 3.0, 1.0 / 3.0, 0.0, 0.5]];

/// Integration points for Tri3 (3 points)
#[rustfmt::skip]
pub const IP_TRI_3: [IntegPointData; 3] = [
    [1.0 / 6.0, 1.0 / 6.0, 0.0, 1.0 / 6.0],
    [2.0 / 3.0, 1.0 / 6.0, 0.0, 1.0 / 6.0],
    [1.0 / 6.0, 2.0 / 3.0, 0.0, 1.0 / 6.0],
];

/// Integration points for Qua4 (1 point)
pub const IP_QUA_1: [IntegPointData; 1] = [[0.0, 0.0, 0.0, 4.0]];

/// Integration points for Qua4 (4 points)
#[rustfmt::skip]
pub const IP_QUA_4: [IntegPointData; 4] = [
    [-A, -A, 0.0, 1.0],
    [ A, -A, 0.0, 1.0],
    [-A,  A, 0.0, 1.0],
    [ A,  A, 0.0, 1.0],
];

/// Integration points for Tet4 (1 point)
pub const IP_TET_1: [IntegPointData; 1] = [[0.25, 0.25, 0.25, 1.0 / 6.0]];

/// Integration points for Tet4 (4 points)
#[rustfmt::skip]
pub const IP_TET_4: [IntegPointData; 4] = [
    [0.1381966011250105, 0.1381966011250105, 0.1381966011250105, 1.0 / 24.0],
    [0.5854101966249685, 0.1381966011250105, 0.1381966011250105, 1.0 / 24.0],
    [0.1381966011250105, 0.5854101966249685, 0.1381966011250105, 1.0 / 24.0],
    [0.1381966011250105, 0.1381966011250105, 0.5854101966249685, 1.0 / 24.0],
];

/// Integration points for Hex8 (1 point)
pub const IP_HEX_1: [IntegPointData; 1] = [[0.0, 0.0, 0.0, 8.0]];

/// Integration points for Hex8 (8 points)
#[rustfmt::skip]
pub const IP_HEX_8: [IntegPointData; 8] = [
    [-A, -A, -A, 1.0],
    [ A, -A, -A, 1.0],
    [-A,  A, -A, 1.0],
    [ A,  A, -A, 1.0],
    [-A, -A,  A, 1.0],
    [ A, -A,  A, 1.0],
    [-A,  A,  A, 1.0],
    [ A,  A,  A, 1.0],
];

/// Returns the integration points for a given geometry kind
///
/// `ngauss = None` selects the default (full) rule.
pub fn integ_points(kind: GeoKind, ngauss: Option<usize>) -> Result<&'static [IntegPointData], StrError> {
    let ips: &'static [IntegPointData] = match (kind, ngauss) {
        (GeoKind::Lin2, Some(1)) => &IP_LIN_1,
        (GeoKind::Lin2, Some(2) | None) => &IP_LIN_2,
        (GeoKind::Tri3, Some(1)) => &IP_TRI_1,
        (GeoKind::Tri3, Some(3) | None) => &IP_TRI_3,
        (GeoKind::Qua4, Some(1)) => &IP_QUA_1,
        (GeoKind::Qua4, Some(4) | None) => &IP_QUA_4,
        (GeoKind::Tet4, Some(1)) => &IP_TET_1,
        (GeoKind::Tet4, Some(4) | None) => &IP_TET_4,
        (GeoKind::Hex8, Some(1)) => &IP_HEX_1,
        (GeoKind::Hex8, Some(8) | None) => &IP_HEX_8,
        _ => return Err("the requested number of integration points is not available"),
    };
    Ok(ips)
}

/// Holds the interpolation data at an integration point of a solid cell
#[derive(Clone, Debug)]
pub struct IntegPoint {
    /// Gradients of the interpolation functions with respect to the reference coordinates G = dN/dX
    ///
    /// (nnode, ndim)
    pub gradient: DMatrix<f64>,

    /// Weighted volume: w · det(dX/dξ)
    pub wdv: f64,
}

/// Holds the interpolation data at an integration point of a boundary feature
#[derive(Clone, Debug)]
pub struct BoundaryIntegPoint {
    /// Interpolation functions N
    ///
    /// (nnode)
    pub nn: DVector<f64>,

    /// Weighted length (2D) or area (3D)
    pub wdv: f64,
}

/// Calculates the gradients and weighted volumes at all integration points of a cell
///
/// # Input
///
/// * `kind` -- the geometry kind; its reference dimension must equal the space dimension
/// * `coords` -- the nodal coordinates (nnode, ndim)
/// * `ngauss` -- the number of integration points (None means default)
pub fn calc_integ_points(
    kind: GeoKind,
    coords: &DMatrix<f64>,
    ngauss: Option<usize>,
) -> Result<Vec<IntegPoint>, StrError> {
    let (nnode, ndim) = coords.shape();
    if nnode != kind.nnode() {
        return Err("the number of rows of coords must equal the number of nodes");
    }
    if ndim != kind.ndim() {
        return Err("the geometry kind is not compatible with the space dimension");
    }
    let mut res = Vec::new();
    for iota in integ_points(kind, ngauss)? {
        // Jacobian of the mapping: J = dX/dξ = Xᵀ · dN/dξ
        let dn_dksi = kind.deriv(iota);
        let jac = coords.transpose() * &dn_dksi;
        let det_jac = jac.determinant();
        if det_jac <= 0.0 {
            return Err("the determinant of the Jacobian of the mapping must be positive");
        }
        let inv_jac = jac.try_inverse().ok_or("cannot invert the Jacobian of the mapping")?;
        res.push(IntegPoint {
            gradient: dn_dksi * inv_jac,
            wdv: iota[3] * det_jac,
        });
    }
    Ok(res)
}

/// Calculates the interpolation functions and weighted measures at all integration points of a boundary feature
///
/// The feature is an edge (Lin2) in 2D or a face (Tri3, Qua4) in 3D.
pub fn calc_boundary_integ_points(
    kind: GeoKind,
    coords: &DMatrix<f64>,
    ngauss: Option<usize>,
) -> Result<Vec<BoundaryIntegPoint>, StrError> {
    let (nnode, ndim) = coords.shape();
    if nnode != kind.nnode() {
        return Err("the number of rows of coords must equal the number of nodes");
    }
    if kind.ndim() + 1 != ndim {
        return Err("the boundary feature is not compatible with the space dimension");
    }
    let mut res = Vec::new();
    for iota in integ_points(kind, ngauss)? {
        let tangents = coords.transpose() * kind.deriv(iota);
        let measure = if ndim == 2 {
            tangents.column(0).norm()
        } else {
            let (a, b) = (tangents.column(0), tangents.column(1));
            let nx = a[1] * b[2] - a[2] * b[1];
            let ny = a[2] * b[0] - a[0] * b[2];
            let nz = a[0] * b[1] - a[1] * b[0];
            f64::sqrt(nx * nx + ny * ny + nz * nz)
        };
        if measure <= 0.0 {
            return Err("boundary feature has zero length or area");
        }
        res.push(BoundaryIntegPoint {
            nn: kind.interp(iota),
            wdv: iota[3] * measure,
        });
    }
    Ok(res)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
