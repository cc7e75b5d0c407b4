use crate::StrError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Holds the history (internal) variables at an integration point
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PointHistory {
    /// Plastic part of the deformation gradient Fp (multiplicative decomposition F = Fe · Fp)
    ///
    /// (ndim, ndim)
    pub plastic_deformation: DMatrix<f64>,

    /// Accumulated (equivalent) plastic strain εp ≥ 0
    pub accumulated_plastic_strain: f64,
}

impl PointHistory {
    /// Allocates a new instance in the virgin state (Fp = I, εp = 0)
    pub fn new(ndim: usize) -> Self {
        PointHistory {
            plastic_deformation: DMatrix::identity(ndim, ndim),
            accumulated_plastic_strain: 0.0,
        }
    }
}

/// Holds the history variables of all integration points of all cells
///
/// Two generations are stored: `old` holds the values of the last converged load step and
/// `new` holds the candidate values written during the current evaluation. The old generation
/// is never modified during the iterations; [HistoryStore::commit] promotes the new values after
/// the load step is accepted and [HistoryStore::rollback] discards them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryStore {
    /// Values at the last converged state (ncell × ngauss)
    old: Vec<Vec<PointHistory>>,

    /// Values at the current (candidate) state (ncell × ngauss)
    new: Vec<Vec<PointHistory>>,
}

impl HistoryStore {
    /// Allocates a new instance with virgin values
    ///
    /// # Input
    ///
    /// * `ngauss` -- the number of integration points of each cell (ncell)
    /// * `ndim` -- the space dimension
    pub fn new(ngauss: &[usize], ndim: usize) -> Self {
        let old: Vec<Vec<_>> = ngauss.iter().map(|n| vec![PointHistory::new(ndim); *n]).collect();
        let new = old.clone();
        HistoryStore { old, new }
    }

    /// Returns the number of cells
    pub fn ncell(&self) -> usize {
        self.old.len()
    }

    /// Returns the old (converged) values at an integration point
    pub fn old(&self, cell_id: usize, ip: usize) -> Result<&PointHistory, StrError> {
        self.old
            .get(cell_id)
            .and_then(|c| c.get(ip))
            .ok_or("cannot find history because (cell_id, ip) is out of bounds")
    }

    /// Returns the new (candidate) values at an integration point
    pub fn new_value(&self, cell_id: usize, ip: usize) -> Result<&PointHistory, StrError> {
        self.new
            .get(cell_id)
            .and_then(|c| c.get(ip))
            .ok_or("cannot find history because (cell_id, ip) is out of bounds")
    }

    /// Returns the old values of all integration points of a cell
    ///
    /// # Panics
    ///
    /// This function will panic if `cell_id` is out of bounds
    pub fn old_cell(&self, cell_id: usize) -> &[PointHistory] {
        &self.old[cell_id]
    }

    /// Splits the store into the read-only old generation and the writable new generation
    pub fn split_mut(&mut self) -> (&[Vec<PointHistory>], &mut [Vec<PointHistory>]) {
        (self.old.as_slice(), self.new.as_mut_slice())
    }

    /// Promotes the new values to old values (accepts the load step)
    pub fn commit(&mut self) {
        for (old, new) in self.old.iter_mut().zip(&self.new) {
            old.clone_from(new);
        }
    }

    /// Resets the new values to the old values (rejects the load step)
    pub fn rollback(&mut self) {
        for (new, old) in self.new.iter_mut().zip(&self.old) {
            new.clone_from(old);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
