use super::{calc_virtual_work, FemBase};
use crate::base::{calc_integ_points, compute_local_to_global, Cell, CellId, Config, IntegPoint, Mesh};
use crate::material::{calc_displacement_gradient, calc_first_piola_kirchhoff, DeformationState};
use crate::material::{PointHistory, StressStrainModel};
use crate::StrError;
use nalgebra::{DMatrix, DVector};

/// Implements the local equations of a solid element
///
/// The residual at each integration point follows the pipeline:
///
/// ```text
/// u → ∇u → (F, J) → σ, history → P → r
/// ```
pub struct ElementSolid {
    /// Index of the cell
    pub cell_id: CellId,

    /// Space dimension
    ndim: usize,

    /// Small strain analysis
    small_strain: bool,

    /// Stress-strain model
    pub model: StressStrainModel,

    /// Local-to-global equation map (nnode · ndim)
    pub local_to_global: Vec<usize>,

    /// Integration point data (ngauss)
    ips: Vec<IntegPoint>,
}

impl ElementSolid {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &Config, cell: &Cell) -> Result<Self, StrError> {
        let param = base.param(cell)?;
        let coords = mesh.coords_matrix(&cell.points);
        let mut model = StressStrainModel::new(&param.stress_strain);
        model.set_max_local_iterations(config.n_max_iterations_local);
        Ok(ElementSolid {
            cell_id: cell.id,
            ndim: mesh.ndim,
            small_strain: config.small_strain,
            model,
            local_to_global: compute_local_to_global(&base.equations, &cell.points)?,
            ips: calc_integ_points(cell.kind, &coords, param.ngauss)?,
        })
    }

    /// Returns the number of local equations
    pub fn n_local_eq(&self) -> usize {
        self.local_to_global.len()
    }

    /// Returns the number of integration points
    pub fn ngauss(&self) -> usize {
        self.ips.len()
    }

    /// Extracts the local displacements from the global vector
    pub fn gather(&self, uu: &DVector<f64>) -> DVector<f64> {
        DVector::from_fn(self.local_to_global.len(), |l, _| uu[self.local_to_global[l]])
    }

    /// Calculates the local residual vector given the local displacements
    ///
    /// The old history is only read. The new history and the Cauchy stress of every
    /// integration point are written into `new` and `stress`.
    pub fn local_residual(
        &self,
        residual: &mut DVector<f64>,
        u_local: &DVector<f64>,
        old: &[PointHistory],
        new: &mut [PointHistory],
        stress: &mut [DMatrix<f64>],
    ) -> Result<(), StrError> {
        let ngauss = self.ips.len();
        if old.len() != ngauss || new.len() != ngauss || stress.len() != ngauss {
            return Err("the history or stress arrays are inconsistent with the number of integration points");
        }
        let mut first_piola = Vec::with_capacity(ngauss);
        for p in 0..ngauss {
            let grad_u = calc_displacement_gradient(&self.ips[p].gradient, u_local);
            let deformation = DeformationState::new(grad_u, self.ndim);
            let (sigma, history) = self.model.evaluate(&deformation, &old[p])?;
            first_piola.push(calc_first_piola_kirchhoff(
                &sigma,
                &deformation,
                None,
                self.small_strain,
            )?);
            new[p] = history;
            stress[p] = sigma;
        }
        calc_virtual_work(residual, &first_piola, &self.ips);
        Ok(())
    }

    /// Calculates the residual vector at the current global displacements
    pub fn calc_residual(
        &self,
        residual: &mut DVector<f64>,
        uu: &DVector<f64>,
        old: &[PointHistory],
        new: &mut [PointHistory],
        stress: &mut [DMatrix<f64>],
    ) -> Result<(), StrError> {
        let u_local = self.gather(uu);
        self.local_residual(residual, &u_local, old, new, stress)
    }

    /// Calculates the Jacobian matrix using central finite differences
    ///
    /// ```text
    /// Kₐᵦ ≈ (rₐ(u + h eᵦ) - rₐ(u - h eᵦ)) / 2h    with    h = δ max(1, |uᵦ|)
    /// ```
    ///
    /// The perturbed evaluations start from the old history and write into scratch arrays;
    /// thus the history store is not touched.
    pub fn calc_jacobian(
        &self,
        jacobian: &mut DMatrix<f64>,
        uu: &DVector<f64>,
        old: &[PointHistory],
        perturbation: f64,
    ) -> Result<(), StrError> {
        let neq = self.local_to_global.len();
        let ngauss = self.ips.len();
        let mut u_local = self.gather(uu);
        let mut r_plus = DVector::zeros(neq);
        let mut r_minus = DVector::zeros(neq);
        let mut new = old.to_vec();
        let mut stress = vec![DMatrix::zeros(self.ndim, self.ndim); ngauss];
        for b in 0..neq {
            let original = u_local[b];
            let h = perturbation * f64::max(1.0, f64::abs(original));
            u_local[b] = original + h;
            self.local_residual(&mut r_plus, &u_local, old, &mut new, &mut stress)?;
            u_local[b] = original - h;
            self.local_residual(&mut r_minus, &u_local, old, &mut new, &mut stress)?;
            u_local[b] = original;
            for a in 0..neq {
                jacobian[(a, b)] = (r_plus[a] - r_minus[a]) / (2.0 * h);
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
