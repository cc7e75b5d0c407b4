use crate::base::{integ_points, Cell, CellAttribute, Equations, Mesh, ParamSolid};
use crate::StrError;
use std::collections::HashMap;

/// Holds the material parameters, cell attributes, and equation numbers
#[derive(Clone, Debug)]
pub struct FemBase {
    /// Maps each cell attribute to its parameters
    pub amap: HashMap<CellAttribute, ParamSolid>,

    /// Holds the equation numbers
    pub equations: Equations,
}

impl FemBase {
    /// Allocates a new instance
    ///
    /// The mesh is checked, the parameters are validated, and all cells must have an attribute
    /// listed in `params`.
    pub fn new<I>(mesh: &Mesh, params: I) -> Result<Self, StrError>
    where
        I: IntoIterator<Item = (CellAttribute, ParamSolid)>,
    {
        mesh.check()?;
        let amap: HashMap<_, _> = params.into_iter().collect();
        for (attribute, param) in &amap {
            if let Some(msg) = param.stress_strain.validate() {
                println!("ERROR: parameters of attribute {}: {}", attribute, msg);
                return Err("cannot allocate FemBase because the material parameters are invalid");
            }
        }
        for cell in &mesh.cells {
            let param = amap.get(&cell.attribute).ok_or("cannot find CellAttribute in the parameters map")?;
            integ_points(cell.kind, param.ngauss)?;
        }
        let equations = Equations::new(mesh);
        Ok(FemBase { amap, equations })
    }

    /// Returns the parameters of a cell
    pub fn param(&self, cell: &Cell) -> Result<&ParamSolid, StrError> {
        self.amap
            .get(&cell.attribute)
            .ok_or("cannot find CellAttribute in the parameters map")
    }

    /// Returns the number of integration points of each cell
    pub fn ngauss(&self, mesh: &Mesh) -> Result<Vec<usize>, StrError> {
        mesh.cells
            .iter()
            .map(|cell| -> Result<usize, StrError> {
                let param = self.param(cell)?;
                Ok(integ_points(cell.kind, param.ngauss)?.len())
            })
            .collect()
    }

    /// Tells whether all material models are linear elastic or not
    pub fn all_elastic(&self) -> bool {
        self.amap.values().all(|p| p.stress_strain.is_elastic())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FemBase;
    use crate::base::{Mesh, ParamSolid, SampleMeshes, StressStrain};

    #[test]
    fn new_captures_errors() {
        let mesh = SampleMeshes::one_qua4();
        let p2 = ParamSolid::sample_linear_elastic();
        assert_eq!(
            FemBase::new(&mesh, [(2, p2)]).err(),
            Some("cannot find CellAttribute in the parameters map")
        );

        let mut p1 = ParamSolid::sample_linear_elastic();
        p1.ngauss = Some(3);
        assert_eq!(
            FemBase::new(&mesh, [(1, p1)]).err(),
            Some("the requested number of integration points is not available")
        );

        let p1 = ParamSolid {
            stress_strain: StressStrain::J2Plasticity {
                young: 1500.0,
                poisson: 0.25,
                hardening: -800.0,
                yield_stress: 9.0,
            },
            ngauss: None,
        };
        assert_eq!(
            FemBase::new(&mesh, [(1, p1)]).err(),
            Some("cannot allocate FemBase because the material parameters are invalid")
        );

        let empty = Mesh {
            ndim: 2,
            points: Vec::new(),
            cells: Vec::new(),
        };
        assert_eq!(
            FemBase::new(&empty, [(1, ParamSolid::sample_linear_elastic())]).err(),
            Some("there are no points in the mesh")
        );
    }

    #[test]
    fn new_works() {
        let mesh = SampleMeshes::two_qua4();
        let p1 = ParamSolid::sample_j2_plasticity();
        let base = FemBase::new(&mesh, [(1, p1)]).unwrap();
        assert_eq!(base.equations.n_equation, 12);
        assert_eq!(base.param(&mesh.cells[1]).unwrap(), &p1);
        assert_eq!(base.ngauss(&mesh).unwrap(), &[4, 4]);
        assert!(!base.all_elastic());

        let mut p1 = ParamSolid::sample_linear_elastic();
        p1.ngauss = Some(1);
        let base = FemBase::new(&mesh, vec![(1, p1)]).unwrap();
        assert_eq!(base.ngauss(&mesh).unwrap(), &[1, 1]);
        assert!(base.all_elastic());
    }
}
