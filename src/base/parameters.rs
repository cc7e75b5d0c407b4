use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Holds parameters for stress-strain relations
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum StressStrain {
    /// Linear elastic model (small strain)
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// J2 (von Mises) plasticity model with multiplicative decomposition (finite strain)
    J2Plasticity {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Linear isotropic hardening modulus
        hardening: f64,

        /// Initial yield stress
        ///
        /// The yield function reads:
        ///
        /// ```text
        /// f = ‖s‖ - √(2/3) (Y + K εp)
        /// ```
        yield_stress: f64,
    },
}

impl StressStrain {
    /// Allocates a new instance from the model name and a flat key-value map
    ///
    /// Recognized models and keys (missing keys default to 0.0):
    ///
    /// * `"elastic"` -- `E`, `nu`
    /// * `"J2"` -- `E`, `nu`, `K`, `Y`
    pub fn from_key_values(model: &str, params: &HashMap<String, f64>) -> Result<Self, StrError> {
        let allowed: &[&str] = match model {
            "elastic" => &["E", "nu"],
            "J2" => &["E", "nu", "K", "Y"],
            _ => {
                println!("ERROR: material model '{}' is not available", model);
                return Err("unknown material model name");
            }
        };
        let mut keys: Vec<_> = params.keys().collect();
        keys.sort();
        for key in keys {
            if !allowed.contains(&key.as_str()) {
                println!("ERROR: key '{}' is not recognized by the '{}' model", key, model);
                return Err("unknown material parameter key");
            }
        }
        let get = |key: &str| params.get(key).copied().unwrap_or(0.0);
        Ok(match model {
            "elastic" => StressStrain::LinearElastic {
                young: get("E"),
                poisson: get("nu"),
            },
            _ => StressStrain::J2Plasticity {
                young: get("E"),
                poisson: get("nu"),
                hardening: get("K"),
                yield_stress: get("Y"),
            },
        })
    }

    /// Returns true if the model is linear elastic
    pub fn is_elastic(&self) -> bool {
        matches!(self, StressStrain::LinearElastic { .. })
    }

    /// Returns an error message if the parameters are invalid
    pub fn validate(&self) -> Option<String> {
        let (young, poisson) = match self {
            StressStrain::LinearElastic { young, poisson } => (*young, *poisson),
            StressStrain::J2Plasticity { young, poisson, .. } => (*young, *poisson),
        };
        if young <= 0.0 {
            return Some(format!("young = {:?} is incorrect; it must be > 0.0", young));
        }
        if poisson <= -1.0 || poisson >= 0.5 {
            return Some(format!("poisson = {:?} is incorrect; it must satisfy -1 < ν < 0.5", poisson));
        }
        if let StressStrain::J2Plasticity {
            hardening,
            yield_stress,
            ..
        } = self
        {
            if *hardening < 0.0 {
                return Some(format!("hardening = {:?} is incorrect; it must be ≥ 0.0", hardening));
            }
            if *yield_stress < 0.0 {
                return Some(format!("yield_stress = {:?} is incorrect; it must be ≥ 0.0", yield_stress));
            }
        }
        None
    }
}

/// Holds parameters for solid elements
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamSolid {
    /// Parameters for the stress-strain model
    pub stress_strain: StressStrain,

    /// Number of integration points (None means the default for the geometry kind)
    pub ngauss: Option<usize>,
}

impl ParamSolid {
    /// Returns a sample of parameters for the linear elastic model
    pub fn sample_linear_elastic() -> Self {
        ParamSolid {
            stress_strain: StressStrain::LinearElastic {
                young: 1500.0,
                poisson: 0.25,
            },
            ngauss: None,
        }
    }

    /// Returns a sample of parameters for the J2 plasticity model
    pub fn sample_j2_plasticity() -> Self {
        ParamSolid {
            stress_strain: StressStrain::J2Plasticity {
                young: 1500.0,
                poisson: 0.25,
                hardening: 800.0,
                yield_stress: 9.0,
            },
            ngauss: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
