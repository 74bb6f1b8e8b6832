use super::{FemBase, FemState};
use crate::base::{Equations, DEFAULT_OUT_DIR};
use crate::StrError;
use gemlab::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Assists in generating output files
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileIo {
    /// Holds a flag to enable/disable the file generation
    enabled: bool,

    /// Defines the output directory
    output_dir: String,

    /// Defines the filename stem
    filename_stem: String,

    /// Holds the count of files written
    output_count: usize,

    /// Holds the indices of the output files
    pub indices: Vec<usize>,

    /// Holds the load factors corresponding to each output file
    pub times: Vec<f64>,

    /// Holds equation numbers (DOF numbers)
    pub equations: Equations,
}

impl FileIo {
    /// Allocates a new instance with deactivated generation of files
    pub fn new() -> Self {
        FileIo {
            enabled: false,
            output_dir: String::new(),
            filename_stem: String::new(),
            output_count: 0,
            indices: Vec::new(),
            times: Vec::new(),
            equations: Equations {
                npoint: 0,
                ndim: 0,
                local_to_global: Vec::new(),
                n_equation: 0,
                nnz_sup: 0,
            },
        }
    }

    /// Activates the generation of files
    ///
    /// The mesh is saved right away as `{output_dir}/{filename_stem}-mesh.json`.
    ///
    /// # Input
    ///
    /// * `mesh` -- the mesh
    /// * `base` -- the material parameters and DOF numbers
    /// * `filename_stem` -- the last part of the filename without extension, e.g., "my_simulation"
    /// * `output_directory` -- the directory to save the output files.
    ///   None means that the default directory will be used; see [DEFAULT_OUT_DIR]
    pub fn activate(
        &mut self,
        mesh: &Mesh,
        base: &FemBase,
        filename_stem: &str,
        output_directory: Option<&str>,
    ) -> Result<(), StrError> {
        let out_dir = match output_directory {
            Some(d) => d,
            None => DEFAULT_OUT_DIR,
        };
        fs::create_dir_all(out_dir).map_err(|_| "cannot create output directory")?;

        self.enabled = true;
        self.output_dir = out_dir.to_string();
        self.filename_stem = filename_stem.to_string();
        self.output_count = 0;
        self.indices = Vec::new();
        self.times = Vec::new();
        self.equations = base.equations.clone();

        // save the mesh right away
        let path = self.path_mesh();
        mesh.write_json(&path)
    }

    /// Generates the filename path for the mesh file
    pub fn path_mesh(&self) -> String {
        if self.enabled {
            format!("{}/{}-mesh.json", self.output_dir, self.filename_stem)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the summary file
    pub fn path_summary(&self) -> String {
        if self.enabled {
            format!("{}/{}-summary.json", self.output_dir, self.filename_stem)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the state files
    pub fn path_state(&self, index: usize) -> String {
        if self.enabled {
            format!("{}/{}-{:0>20}.json", self.output_dir, self.filename_stem, index)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the VTU (ParaView) files
    pub fn path_vtu(&self, index: usize) -> String {
        if self.enabled {
            format!("{}/{}-{:0>20}.vtu", self.output_dir, self.filename_stem, index)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the PVD (ParaView) file
    pub fn path_pvd(&self) -> String {
        if self.enabled {
            format!("{}/{}.pvd", self.output_dir, self.filename_stem)
        } else {
            "".to_string()
        }
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(summary)
    }

    /// Writes a JSON file with this struct
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

    /// Writes the current FEM state to a file
    pub(crate) fn write_state(&mut self, state: &FemState) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_state(self.output_count);
            state.write_json(&path)?;
            self.indices.push(self.output_count);
            self.times.push(state.t);
            self.output_count += 1;
        }
        Ok(())
    }

    /// Writes this struct to the summary file
    pub(crate) fn write_self(&self) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_summary();
            self.write_json(&path)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FileIo;
    use crate::base::{Config, Essential, ParamSolid, DEFAULT_TEST_DIR};
    use crate::fem::{FemBase, FemState};
    use gemlab::mesh::Samples;

    #[test]
    fn new_disabled_yields_empty_paths() {
        let file_io = FileIo::new();
        assert_eq!(file_io.path_mesh(), "");
        assert_eq!(file_io.path_summary(), "");
        assert_eq!(file_io.path_state(0), "");
        assert_eq!(file_io.path_vtu(0), "");
        assert_eq!(file_io.path_pvd(), "");
    }

    #[test]
    fn activate_write_and_read_work() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();

        let mut file_io = FileIo::new();
        file_io
            .activate(&mesh, &base, "test_file_io", Some(DEFAULT_TEST_DIR))
            .unwrap();
        assert_eq!(
            file_io.path_state(123),
            format!("{}/test_file_io-00000000000000000123.json", DEFAULT_TEST_DIR)
        );

        file_io.write_state(&state).unwrap();
        file_io.write_self().unwrap();

        let summary = FileIo::read_json(&file_io.path_summary()).unwrap();
        assert_eq!(summary.indices, &[0]);
        assert_eq!(summary.times, &[0.0]);
        assert_eq!(summary.equations.n_equation, 24);
    }
}
