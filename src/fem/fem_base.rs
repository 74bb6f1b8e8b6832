use crate::base::{Equations, ParamSolid};
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the material parameters and equation numbers
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemBase {
    /// Holds the parameters of the solid elements
    pub param: ParamSolid,

    /// Holds all DOF numbers
    pub equations: Equations,
}

impl FemBase {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, param: ParamSolid) -> Result<Self, StrError> {
        // checks the parameters early
        param.stress_strain.lame_parameters()?;
        let equations = Equations::new(mesh)?;
        Ok(FemBase { param, equations })
    }

    /// Returns the number of local equations
    pub fn n_local_eq(&self, cell: &Cell) -> usize {
        cell.points.len() * self.equations.ndim
    }

    /// Reads a JSON file containing the base data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let data = File::open(path).map_err(|_| "cannot open base file")?;
        let buffered = BufReader::new(data);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse base file")?;
        Ok(state)
    }

    /// Writes a JSON file with the base data
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
        let mut file = File::create(&path).map_err(|_| "cannot create base file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write base file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FemBase;
    use crate::base::{ParamSolid, ParamStressStrain};
    use gemlab::mesh::Samples;

    #[test]
    fn new_handles_errors() {
        let mesh = Samples::one_tri3();
        let p1 = ParamSolid::sample_neo_hookean();
        assert_eq!(FemBase::new(&mesh, p1).err(), Some("only 3D meshes are supported"));

        let mesh = Samples::one_hex8();
        let bad = ParamSolid {
            density: 1.0,
            stress_strain: ParamStressStrain::NeoHookean {
                young: 0.0,
                poisson: 0.4,
            },
            ngauss: None,
        };
        assert_eq!(FemBase::new(&mesh, bad).err(), Some("Young's modulus must be positive"));
    }

    #[test]
    fn new_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        assert_eq!(base.equations.n_equation, 24);
        assert_eq!(base.n_local_eq(&mesh.cells[0]), 24);
    }

    #[test]
    fn derive_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let clone = base.clone();
        let json = serde_json::to_string(&clone).unwrap();
        let read: FemBase = serde_json::from_str(&json).unwrap();
        assert_eq!(read.equations.n_equation, base.equations.n_equation);
        assert_eq!(format!("{:?}", read.param), format!("{:?}", base.param));
    }
}
