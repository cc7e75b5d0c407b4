use super::{DeformationState, J2Plasticity, LinearElastic, PointHistory};
use crate::base::StressStrain;
use crate::StrError;
use nalgebra::DMatrix;

/// Holds the actual stress-strain model implementation
///
/// All models share the same contract: given the deformation state and the old (converged)
/// history at an integration point, return the Cauchy stress and the new history.
#[derive(Clone, Debug)]
pub enum StressStrainModel {
    /// Linear elastic model using the small strain tensor
    LinearElastic(LinearElastic),

    /// J2 plasticity model with multiplicative decomposition
    J2Plasticity(J2Plasticity),
}

impl StressStrainModel {
    /// Allocates a new instance
    pub fn new(param: &StressStrain) -> Self {
        match *param {
            StressStrain::LinearElastic { young, poisson } => {
                StressStrainModel::LinearElastic(LinearElastic::new(young, poisson))
            }
            StressStrain::J2Plasticity {
                young,
                poisson,
                hardening,
                yield_stress,
            } => StressStrainModel::J2Plasticity(J2Plasticity::new(young, poisson, hardening, yield_stress)),
        }
    }

    /// Sets the maximum number of iterations of local (integration point) solvers
    ///
    /// Models without local iterations ignore this value.
    pub fn set_max_local_iterations(&mut self, value: usize) -> &mut Self {
        if let StressStrainModel::J2Plasticity(model) = self {
            model.set_max_iterations(value);
        }
        self
    }

    /// Returns true if the model has no history variables and is linear
    pub fn is_elastic(&self) -> bool {
        matches!(self, StressStrainModel::LinearElastic(..))
    }

    /// Evaluates the Cauchy stress and the new history
    ///
    /// The old history is never modified. The elastic model returns a copy of it.
    pub fn evaluate(
        &self,
        deformation: &DeformationState,
        old: &PointHistory,
    ) -> Result<(DMatrix<f64>, PointHistory), StrError> {
        match self {
            StressStrainModel::LinearElastic(model) => Ok((model.update(deformation), old.clone())),
            StressStrainModel::J2Plasticity(model) => {
                let (sigma, new, _) = model.update(deformation, old)?;
                Ok((sigma, new))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
