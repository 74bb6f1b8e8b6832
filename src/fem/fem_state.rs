use super::FemBase;
use crate::base::{Config, Essential};
use crate::StrError;
use gemlab::mesh::Mesh;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a simulation
///
/// The pseudo-time t is the load fraction in [t_ini, t_fin].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Pseudo-time (load fraction)
    pub t: f64,

    /// Pseudo-time increment of the current load step
    pub ddt: f64,

    /// Cumulated (for one load step) change of primary unknowns {ΔU}
    ///
    /// (n_equation)
    pub duu: Vector,

    /// Primary unknowns {U} (displacements)
    ///
    /// (n_equation)
    pub uu: Vector,
}

impl FemState {
    /// Allocates a new instance
    ///
    /// The prescribed (essential) values are written into U right away;
    /// they are held fixed by the solver afterwards.
    pub fn new(mesh: &Mesh, base: &FemBase, essential: &Essential, config: &Config) -> Result<FemState, StrError> {
        if mesh.cells.len() == 0 {
            return Err("there are no cells in the mesh");
        }
        let n_equation = base.equations.n_equation;
        let mut uu = Vector::new(n_equation);
        for ((point_id, dof), value) in &essential.all {
            let eq = base.equations.eq(*point_id, *dof)?;
            uu[eq] = *value;
        }
        Ok(FemState {
            t: config.t_ini,
            ddt: config.ddt_base(),
            duu: Vector::new(n_equation),
            uu,
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
    use crate::base::{Config, Dof, Essential, ParamSolid};
    use crate::fem::FemBase;
    use gemlab::mesh::Samples;

    #[test]
    fn new_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let mut essential = Essential::new();
        essential.points(&[0, 1, 2, 3], Dof::Uz, 0.0).points(&[4], Dof::Uz, -0.25);
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        assert_eq!(state.t, 0.0);
        assert_eq!(state.ddt, 0.1);
        assert_eq!(state.uu.dim(), 24);
        assert_eq!(state.duu.dim(), 24);
        assert_eq!(state.uu[3 * 4 + 2], -0.25);
        assert_eq!(state.uu[0], 0.0);
    }

    #[test]
    fn derive_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        let clone = state.clone();
        assert_eq!(clone.uu.dim(), state.uu.dim());
        let json = serde_json::to_string(&state).unwrap();
        let read: FemState = serde_json::from_str(&json).unwrap();
        assert_eq!(read.t, state.t);
        assert_eq!(read.uu.dim(), state.uu.dim());
    }

    #[test]
    fn read_write_json_work() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        let path = format!("{}/state_read_write.json", crate::base::DEFAULT_TEST_DIR);
        state.write_json(&path).unwrap();
        let read = FemState::read_json(&path).unwrap();
        assert_eq!(read.uu.dim(), state.uu.dim());
        assert_eq!(read.t, state.t);
    }
}
