use super::{BcPrescribedArray, Elements, FemBase};
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CooMatrix;

/// Defines the interface of solvers for the global linear system
pub trait LinearSolver: Send {
    /// Solves K x = rhs
    fn solve(&mut self, x: &mut DVector<f64>, kk: &CooMatrix<f64>, rhs: &DVector<f64>) -> Result<(), StrError>;
}

/// Implements a direct solver using the dense LU decomposition
///
/// The COO matrix is converted to a dense matrix (duplicate triplets are summed) before the
/// factorization. Thus, the memory grows with O(n²) and the time with O(n³), where n is the
/// number of equations. This solver is meant for small problems; larger meshes should plug a
/// sparse solver via the [LinearSolver] trait.
pub struct DenseLuSolver {}

impl DenseLuSolver {
    /// Allocates a new instance
    pub fn new() -> Self {
        DenseLuSolver {}
    }
}

impl Default for DenseLuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSolver for DenseLuSolver {
    fn solve(&mut self, x: &mut DVector<f64>, kk: &CooMatrix<f64>, rhs: &DVector<f64>) -> Result<(), StrError> {
        if kk.nrows() != kk.ncols() || kk.nrows() != rhs.len() || x.len() != rhs.len() {
            return Err("the dimensions of the linear system are inconsistent");
        }
        let lu = DMatrix::from(kk).lu();
        if !lu.is_invertible() {
            return Err("the global Jacobian matrix is singular");
        }
        let solution = lu.solve(rhs).ok_or("the global Jacobian matrix is singular")?;
        if solution.iter().any(|v| !v.is_finite()) {
            return Err("the global Jacobian matrix is singular");
        }
        x.copy_from(&solution);
        Ok(())
    }
}

/// Holds variables to solve the global linear system
pub struct LinearSystem {
    /// Total number of global equations (total number of DOFs)
    pub n_equation: usize,

    /// Holds the supremum of the number of nonzero values (nnz) in the global matrix
    ///
    /// This is the sum of the number of entries of all local matrices plus the number of
    /// prescribed equations (ones are put on the diagonal of the global matrix). It sizes the
    /// triplet arrays of the global Jacobian matrix.
    pub nnz_sup: usize,

    /// Global residual vector
    pub rr: DVector<f64>,

    /// Global Jacobian matrix (triplet format)
    pub kk: CooMatrix<f64>,

    /// Delta U vector (the solution of the linear system)
    pub du: DVector<f64>,

    /// Linear solver
    pub solver: Box<dyn LinearSolver>,
}

impl LinearSystem {
    /// Allocates a new instance
    pub fn new(base: &FemBase, prescribed: &BcPrescribedArray, elements: &Elements) -> Self {
        let n_equation = base.equations.n_equation;
        let mut nnz_sup = prescribed.equations.len();
        nnz_sup += elements.all.iter().fold(0, |acc, e| {
            let n = e.actual.local_to_global.len();
            acc + n * n
        });
        let mut kk = CooMatrix::new(n_equation, n_equation);
        kk.reserve(nnz_sup);
        LinearSystem {
            n_equation,
            nnz_sup,
            rr: DVector::zeros(n_equation),
            kk,
            du: DVector::zeros(n_equation),
            solver: Box::new(DenseLuSolver::new()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
