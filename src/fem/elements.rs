use super::{ElementSolid, FemBase};
use crate::base::{assemble_matrix, assemble_vector, Config, Mesh};
use crate::material::HistoryStore;
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CooMatrix;
use rayon::prelude::*;

/// Defines a generic finite element, wrapping an "actual" implementation
pub struct GenericElement {
    /// Connects to the "actual" implementation of local equations
    pub actual: ElementSolid,

    /// Implements the residual vector
    pub residual: DVector<f64>,

    /// Implements the Jacobian matrix
    pub jacobian: DMatrix<f64>,
}

/// Holds a collection of (generic) finite elements
///
/// The elements are stored in the same order as the cells of the mesh.
pub struct Elements {
    /// All elements
    pub all: Vec<GenericElement>,
}

impl GenericElement {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &Config, cell_index: usize) -> Result<Self, StrError> {
        let actual = ElementSolid::new(mesh, base, config, &mesh.cells[cell_index])?;
        let neq = actual.n_local_eq();
        Ok(GenericElement {
            actual,
            residual: DVector::zeros(neq),
            jacobian: DMatrix::zeros(neq, neq),
        })
    }
}

impl Elements {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &Config) -> Result<Self, StrError> {
        let all = (0..mesh.cells.len())
            .map(|index| GenericElement::new(mesh, base, config, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Elements { all })
    }

    /// Returns the number of integration points of each element
    pub fn ngauss(&self) -> Vec<usize> {
        self.all.iter().map(|e| e.actual.ngauss()).collect()
    }

    /// Tells whether all elements employ a linear elastic model or not
    pub fn all_elastic(&self) -> bool {
        self.all.iter().all(|e| e.actual.model.is_elastic())
    }

    /// Computes the residual vectors (in parallel)
    ///
    /// Each element reads the old history of its cell and writes the new history and the
    /// Cauchy stress of its cell only.
    pub fn calc_residuals(
        &mut self,
        uu: &DVector<f64>,
        history: &mut HistoryStore,
        stress: &mut [Vec<DMatrix<f64>>],
    ) -> Result<(), StrError> {
        if history.ncell() != self.all.len() || stress.len() != self.all.len() {
            return Err("the history store or the stress array is inconsistent with the elements");
        }
        let (old, new) = history.split_mut();
        self.all
            .par_iter_mut()
            .zip(new.par_iter_mut())
            .zip(stress.par_iter_mut())
            .map(|((e, new), stress)| {
                let old = &old[e.actual.cell_id];
                e.actual.calc_residual(&mut e.residual, uu, old, new, stress)
            })
            .collect()
    }

    /// Computes the Jacobian matrices (in parallel)
    ///
    /// Only the old history is read.
    pub fn calc_jacobians(
        &mut self,
        uu: &DVector<f64>,
        history: &HistoryStore,
        perturbation: f64,
    ) -> Result<(), StrError> {
        if history.ncell() != self.all.len() {
            return Err("the history store is inconsistent with the elements");
        }
        self.all
            .par_iter_mut()
            .map(|e| {
                let old = history.old_cell(e.actual.cell_id);
                e.actual.calc_jacobian(&mut e.jacobian, uu, old, perturbation)
            })
            .collect()
    }

    /// Assembles residual vectors
    ///
    /// **Notes:**
    ///
    /// 1. You must call calc residuals first
    /// 2. The global vector R will be cleared (with zeros) at the beginning
    ///
    /// **Important:** You must call the Boundaries assemble_residuals after Elements
    pub fn assemble_residuals(&self, rr: &mut DVector<f64>, prescribed: &[bool]) {
        rr.fill(0.0); // << important
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, &e.actual.local_to_global, prescribed));
    }

    /// Assembles Jacobian matrices
    ///
    /// **Notes:**
    ///
    /// 1. You must call calc jacobians first
    /// 2. All triplets in the global matrix K are discarded at the beginning
    pub fn assemble_jacobians(&self, kk: &mut CooMatrix<f64>, prescribed: &[bool]) {
        kk.clear_triplets(); // << important (keeps the allocated capacity)
        for e in &self.all {
            assemble_matrix(kk, &e.jacobian, &e.actual.local_to_global, prescribed);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Elements;
    use crate::base::{Config, ParamSolid, SampleMeshes};
    use crate::fem::FemBase;
    use crate::material::HistoryStore;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};
    use nalgebra_sparse::CooMatrix;

    #[test]
    fn new_captures_errors() {
        let mut mesh = SampleMeshes::two_qua4();
        let base = FemBase::new(&mesh, [(1, ParamSolid::sample_linear_elastic())]).unwrap();
        let config = Config::new(&mesh);
        mesh.cells[1].points = vec![1, 4, 5, 2]; // clockwise
        assert_eq!(
            Elements::new(&mesh, &base, &config).err(),
            Some("the determinant of the Jacobian of the mapping must be positive")
        );
    }

    #[test]
    fn calc_residuals_captures_errors() {
        let mesh = SampleMeshes::two_qua4();
        let base = FemBase::new(&mesh, [(1, ParamSolid::sample_linear_elastic())]).unwrap();
        let config = Config::new(&mesh);
        let mut elements = Elements::new(&mesh, &base, &config).unwrap();
        let uu = DVector::zeros(12);
        let mut history = HistoryStore::new(&[4], 2);
        let mut stress = vec![vec![DMatrix::zeros(2, 2); 4]; 2];
        assert_eq!(
            elements.calc_residuals(&uu, &mut history, &mut stress).err(),
            Some("the history store or the stress array is inconsistent with the elements")
        );
        assert_eq!(
            elements.calc_jacobians(&uu, &history, 1e-7).err(),
            Some("the history store is inconsistent with the elements")
        );
    }

    #[test]
    fn residuals_and_jacobians_work() {
        //      3-----------4-----------5
        //      |    [0]    |    [1]    |
        //      0-----------1-----------2
        let mesh = SampleMeshes::two_qua4();
        let base = FemBase::new(&mesh, [(1, ParamSolid::sample_j2_plasticity())]).unwrap();
        let config = Config::new(&mesh);
        let mut elements = Elements::new(&mesh, &base, &config).unwrap();
        assert_eq!(elements.ngauss(), &[4, 4]);
        assert!(!elements.all_elastic());

        // stretch along x: u = 0.02 x
        let mut uu = DVector::zeros(12);
        for p in 0..6 {
            uu[p * 2] = 0.02 * mesh.points[p].coords[0];
        }
        let mut history = HistoryStore::new(&elements.ngauss(), 2);
        let mut stress = vec![vec![DMatrix::zeros(2, 2); 4]; 2];
        elements.calc_residuals(&uu, &mut history, &mut stress).unwrap();

        // both elements yield; old values are kept
        for cell in 0..2 {
            for p in 0..4 {
                assert!(history.new_value(cell, p).unwrap().accumulated_plastic_strain > 0.0);
                assert_eq!(history.old(cell, p).unwrap().accumulated_plastic_strain, 0.0);
                assert_abs_diff_eq!(stress[cell][p][(0, 0)], stress[0][0][(0, 0)], epsilon = 1e-10);
            }
        }

        // the residual at the middle nodes vanishes (homogeneous state)
        let mut prescribed = vec![false; 12];
        let mut rr = DVector::from_element(12, 1.0);
        elements.assemble_residuals(&mut rr, &prescribed);
        assert_abs_diff_eq!(rr[2], 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(rr[8], 0.0, epsilon = 1e-10);
        assert!(rr[4] > 0.0);
        assert!(rr[0] < 0.0);

        // Jacobian
        elements.calc_jacobians(&uu, &history, 1e-7).unwrap();
        prescribed[0] = true;
        let mut kk = CooMatrix::new(12, 12);
        kk.push(0, 0, 123.0);
        elements.assemble_jacobians(&mut kk, &prescribed);
        let dense = DMatrix::from(&kk);
        assert_eq!(dense[(0, 0)], 0.0);
        assert_eq!(dense[(0, 5)], 0.0);
        assert_eq!(dense[(5, 0)], 0.0);
        // the middle node receives contributions from both elements
        let k22 = elements.all[0].jacobian[(2, 2)] + elements.all[1].jacobian[(0, 0)];
        assert_abs_diff_eq!(dense[(2, 2)], k22, epsilon = 1e-12);
        assert!(dense[(2, 2)] > 0.0);
        // assembling again does not accumulate triplets
        let nnz = kk.nnz();
        elements.assemble_jacobians(&mut kk, &prescribed);
        assert_eq!(kk.nnz(), nnz);
    }
}
