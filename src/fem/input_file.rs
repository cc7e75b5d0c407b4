use super::FemBase;
use crate::base::{Config, Dof, Essential, Feature, GeoKind, Mesh, Natural, Nbc, ParamSolid, StressStrain};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds the material parameters of a region (cell attribute)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputMaterial {
    /// Cell attribute
    pub attribute: usize,

    /// Model name: "elastic" or "J2"
    pub model: String,

    /// Parameters: E, nu, K, Y
    pub params: HashMap<String, f64>,

    /// Number of integration points
    #[serde(default)]
    pub ngauss: Option<usize>,
}

/// Holds prescribed displacements
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputEssential {
    pub points: Vec<usize>,
    pub dof: Dof,
    pub value: f64,

    /// Scales the value by the pseudo-time
    #[serde(default)]
    pub ramp: bool,
}

/// Holds a distributed load on a boundary edge (2D) or face (3D)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputNatural {
    pub kind: GeoKind,
    pub points: Vec<usize>,
    pub nbc: Nbc,
    pub value: f64,

    /// Scales the value by the pseudo-time
    #[serde(default)]
    pub ramp: bool,
}

/// Holds the solver parameters
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputSolver {
    /// Solver type (only "static" is available)
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub small_strain: bool,

    #[serde(default = "default_t_fin")]
    pub t_fin: f64,

    #[serde(default = "default_dt")]
    pub dt: f64,

    #[serde(default = "default_nonlinear_max_iters")]
    pub nonlinear_max_iters: usize,

    #[serde(default = "default_nonlinear_tolerance")]
    pub nonlinear_tolerance: f64,

    #[serde(default)]
    pub verbose: bool,
}

fn default_t_fin() -> f64 {
    1.0
}

fn default_dt() -> f64 {
    1.0
}

fn default_nonlinear_max_iters() -> usize {
    10
}

fn default_nonlinear_tolerance() -> f64 {
    1e-10
}

/// Holds all input data of a simulation (JSON file)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    pub mesh: Mesh,
    pub materials: Vec<InputMaterial>,

    #[serde(default)]
    pub essential: Vec<InputEssential>,

    #[serde(default)]
    pub natural: Vec<InputNatural>,

    pub solver: InputSolver,
}

impl InputFile {
    /// Reads a JSON file containing the input data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let data: InputFile = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        data.check()?;
        Ok(data)
    }

    /// Parses a JSON string containing the input data
    pub fn parse_json(json: &str) -> Result<Self, StrError> {
        let data: InputFile = serde_json::from_str(json).map_err(|_| "cannot parse JSON string")?;
        data.check()?;
        Ok(data)
    }

    /// Checks the consistency of the data not covered by the other constructors
    fn check(&self) -> Result<(), StrError> {
        if self.solver.kind != "static" {
            println!("ERROR: solver type '{}' is not available", self.solver.kind);
            return Err("only the static solver type is available");
        }
        Ok(())
    }

    /// Allocates the FemBase (equation numbers and material parameters)
    pub fn fem_base(&self) -> Result<FemBase, StrError> {
        let params = self
            .materials
            .iter()
            .map(|m| {
                let stress_strain = StressStrain::from_key_values(&m.model, &m.params)?;
                let param = ParamSolid {
                    stress_strain,
                    ngauss: m.ngauss,
                };
                Ok((m.attribute, param))
            })
            .collect::<Result<Vec<_>, StrError>>()?;
        FemBase::new(&self.mesh, params)
    }

    /// Returns the essential boundary conditions
    pub fn essential(&self) -> Essential {
        let mut essential = Essential::new();
        for bc in &self.essential {
            if bc.ramp {
                essential.points_fn(&bc.points, bc.dof, bc.value, |t| t);
            } else {
                essential.points(&bc.points, bc.dof, bc.value);
            }
        }
        essential
    }

    /// Returns the natural boundary conditions
    pub fn natural(&self) -> Natural {
        let mut natural = Natural::new();
        for bc in &self.natural {
            let feature = Feature {
                kind: bc.kind,
                points: bc.points.clone(),
            };
            match (self.mesh.ndim, bc.ramp) {
                (2, false) => natural.edges(&[&feature], bc.nbc, bc.value),
                (2, true) => natural.edges_fn(&[&feature], bc.nbc, bc.value, |t| t),
                (_, false) => natural.faces(&[&feature], bc.nbc, bc.value),
                (_, true) => natural.faces_fn(&[&feature], bc.nbc, bc.value, |t| t),
            };
        }
        natural
    }

    /// Returns the configuration
    ///
    /// The verbose flag enables the messages of load steps and iterations.
    pub fn config(&self) -> Config {
        let mut config = Config::new(&self.mesh);
        config
            .set_small_strain(self.solver.small_strain)
            .set_t_fin(self.solver.t_fin)
            .set_dt_constant(self.solver.dt)
            .set_n_max_iterations(self.solver.nonlinear_max_iters)
            .set_tol_rr(self.solver.nonlinear_tolerance)
            .set_verbose_timesteps(self.solver.verbose)
            .set_verbose_iterations(self.solver.verbose);
        config
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
