use super::FemBase;
use crate::base::{assemble_vector, calc_boundary_integ_points, compute_local_to_global};
use crate::base::{BcFunction, BoundaryIntegPoint, Feature, Mesh, Natural, Nbc};
use crate::StrError;
use nalgebra::DVector;

/// Defines an element to calculate distributed loads on the boundary
pub struct BoundaryElement {
    /// Load direction
    pub nbc: Nbc,

    /// Load value (or multiplier of f)
    value: f64,

    /// Variation with time or with position and time
    f: BcFunction,

    /// Space dimension
    ndim: usize,

    /// Integration point data
    ips: Vec<BoundaryIntegPoint>,

    /// Reference coordinates of the integration points x = Σ Nᵐ Xᵐ
    ip_coords: Vec<DVector<f64>>,

    /// Local-to-global equation map
    pub local_to_global: Vec<usize>,

    /// Local residual vector
    pub residual: DVector<f64>,
}

/// Holds a collection of boundary elements
pub struct Boundaries {
    /// All boundary elements
    pub all: Vec<BoundaryElement>,
}

impl BoundaryElement {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        base: &FemBase,
        feature: &Feature,
        nbc: Nbc,
        value: f64,
        f: BcFunction,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        if nbc.direction() >= ndim {
            return Err("the load direction is not available in this space dimension");
        }
        if feature.points.iter().any(|p| *p >= mesh.points.len()) {
            return Err("a boundary feature refers to a point that does not exist");
        }
        let coords = mesh.coords_matrix(&feature.points);
        let ips = calc_boundary_integ_points(feature.kind, &coords, None)?;
        let ip_coords = ips.iter().map(|ip| coords.tr_mul(&ip.nn)).collect();
        let local_to_global = compute_local_to_global(&base.equations, &feature.points)?;
        let residual = DVector::zeros(local_to_global.len());
        Ok(BoundaryElement {
            nbc,
            value,
            f,
            ndim,
            ips,
            ip_coords,
            local_to_global,
            residual,
        })
    }

    /// Returns the load intensity at the reference coordinates x and time t
    pub fn intensity(&self, x: &[f64], t: f64) -> f64 {
        self.f.eval(self.value, x, t)
    }

    /// Calculates the residual vector at time t
    ///
    /// ```text
    ///         ⌠
    /// rᵐᵢ = - │ Nᵐ qᵢ(x, t) dΓ
    ///         ⌡
    ///         Γₑ
    /// ```
    pub fn calc_residual(&mut self, t: f64) {
        let dir = self.nbc.direction();
        self.residual.fill(0.0);
        for (ip, x) in self.ips.iter().zip(&self.ip_coords) {
            let q = self.f.eval(self.value, x.as_slice(), t);
            for m in 0..ip.nn.len() {
                self.residual[m * self.ndim + dir] -= ip.nn[m] * q * ip.wdv;
            }
        }
    }
}

impl Boundaries {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, natural: &Natural) -> Result<Self, StrError> {
        let all = natural
            .distributed
            .iter()
            .map(|(feature, nbc, value, f)| BoundaryElement::new(mesh, base, feature, *nbc, *value, *f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Boundaries { all })
    }

    /// Computes all residual vectors
    pub fn calc_residuals(&mut self, t: f64) {
        self.all.iter_mut().for_each(|e| e.calc_residual(t));
    }

    /// Assembles the residual vectors
    ///
    /// **Important:** The global vector is **not** cleared; call this after the Elements assembly.
    pub fn assemble_residuals(&self, rr: &mut DVector<f64>, prescribed: &[bool]) {
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, &e.local_to_global, prescribed));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
