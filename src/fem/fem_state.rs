use super::{BcPrescribedArray, FemBase};
use crate::base::{Config, Essential, Mesh};
use crate::material::HistoryStore;
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Pseudo-time
    pub t: f64,

    /// Pseudo-time increment
    pub dt: f64,

    /// Displacements {U}
    ///
    /// (n_equation)
    pub uu: DVector<f64>,

    /// History variables at all integration points of all cells
    pub history: HistoryStore,

    /// Cauchy stress at all integration points of all cells
    ///
    /// (ncell × ngauss) each (ndim, ndim)
    pub stress: Vec<Vec<DMatrix<f64>>>,
}

impl FemState {
    /// Allocates a new instance
    ///
    /// The prescribed displacements are set at the initial time.
    pub fn new(mesh: &Mesh, base: &FemBase, essential: &Essential, config: &Config) -> Result<FemState, StrError> {
        if mesh.cells.is_empty() {
            return Err("there are no cells in the mesh");
        }
        let ngauss = base.ngauss(mesh)?;
        let ndim = mesh.ndim;
        let t = config.t_ini;
        let dt = config.time_increment(t);
        let mut uu = DVector::zeros(base.equations.n_equation);
        BcPrescribedArray::new(mesh, base, essential)?.apply(&mut uu, t);
        let history = HistoryStore::new(&ngauss, ndim);
        let stress = ngauss.iter().map(|n| vec![DMatrix::zeros(ndim, ndim); *n]).collect();
        Ok(FemState {
            t,
            dt,
            uu,
            history,
            stress,
        })
    }

    /// Reads a JSON file containing the state data
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
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FemState;
    use crate::base::{Config, Dof, Essential, ParamSolid, SampleMeshes, DEFAULT_TEST_DIR};
    use crate::fem::FemBase;

    #[test]
    fn new_works() {
        let mesh = SampleMeshes::two_qua4();
        let mut p1 = ParamSolid::sample_j2_plasticity();
        p1.ngauss = Some(1);
        let base = FemBase::new(&mesh, [(1, p1)]).unwrap();
        let mut essential = Essential::new();
        essential
            .points(&[0], Dof::Ux, 0.5)
            .points_fn(&[5], Dof::Uy, 2.0, |t| t + 1.0);
        let mut config = Config::new(&mesh);
        config.set_t_ini(1.0).set_t_fin(2.0);
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        assert_eq!(state.t, 1.0);
        assert_eq!(state.dt, 1.0);
        assert_eq!(state.uu.len(), 12);
        assert_eq!(state.uu[0], 0.5);
        assert_eq!(state.uu[11], 4.0);
        assert_eq!(state.history.ncell(), 2);
        assert_eq!(state.history.old_cell(1).len(), 1);
        assert_eq!(state.stress.len(), 2);
        assert_eq!(state.stress[0][0].shape(), (2, 2));
    }

    #[test]
    fn new_captures_errors() {
        let mesh = SampleMeshes::one_qua4();
        let base = FemBase::new(&mesh, [(1, ParamSolid::sample_linear_elastic())]).unwrap();
        let config = Config::new(&mesh);
        let mut essential = Essential::new();
        essential.points(&[4], Dof::Ux, 0.0);
        assert_eq!(
            FemState::new(&mesh, &base, &essential, &config).err(),
            Some("cannot find equation number because point_id is out of bounds")
        );
    }

    #[test]
    fn read_and_write_json_work() {
        let mesh = SampleMeshes::one_hex8();
        let base = FemBase::new(&mesh, [(1, ParamSolid::sample_j2_plasticity())]).unwrap();
        let config = Config::new(&mesh);
        let mut state = FemState::new(&mesh, &base, &Essential::new(), &config).unwrap();
        state.uu[3] = 0.125;
        state.stress[0][7][(2, 1)] = -4.5;
        let path = format!("{}/test_fem_state_json.json", DEFAULT_TEST_DIR);
        state.write_json(&path).unwrap();
        let read = FemState::read_json(&path).unwrap();
        assert_eq!(read.t, state.t);
        assert_eq!(read.uu, state.uu);
        assert_eq!(read.stress, state.stress);
        assert_eq!(read.history.old_cell(0), state.history.old_cell(0));
        assert_eq!(
            FemState::read_json("/tmp/plastsim/__does_not_exist__.json").err(),
            Some("cannot open file")
        );
    }
}
