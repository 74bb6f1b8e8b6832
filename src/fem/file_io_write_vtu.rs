use super::{FemState, FileIo};
use crate::base::Dof;
use crate::StrError;
use gemlab::mesh::Mesh;
use std::fmt::Write;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::Path;

impl FileIo {
    /// Writes a VTU file for visualization with ParaView
    ///
    /// The file is saved as `{output_dir}/{filename_stem}-{index}.vtu`
    pub fn write_vtu(&self, mesh: &Mesh, state: &FemState, index: usize) -> Result<(), StrError> {
        let npoint = mesh.points.len();
        let ncell = mesh.cells.len();
        if ncell < 1 {
            return Err("there are no cells to write");
        }

        // output buffer
        let mut buffer = String::new();

        // header
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <UnstructuredGrid>\n\
             <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
            npoint, ncell
        )
        .unwrap();

        // nodes: coordinates
        write!(
            &mut buffer,
            "<Points>\n\
             <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n",
        )
        .unwrap();
        for index in 0..npoint {
            for dim in 0..3 {
                write!(&mut buffer, "{:?} ", mesh.points[index].coords[dim]).unwrap();
            }
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             </Points>\n"
        )
        .unwrap();

        // elements: connectivity
        write!(
            &mut buffer,
            "<Cells>\n\
             <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
        )
        .unwrap();
        for cell in &mesh.cells {
            if cell.kind.vtk_type().is_none() {
                return Err("cannot generate VTU file because VTK cell type is not available");
            }
            for p in &cell.points {
                write!(&mut buffer, "{} ", p).unwrap();
            }
        }

        // elements: offsets
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
        )
        .unwrap();
        let mut offset = 0;
        for cell in &mesh.cells {
            offset += cell.points.len();
            write!(&mut buffer, "{} ", offset).unwrap();
        }

        // elements: types
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
        )
        .unwrap();
        for cell in &mesh.cells {
            if let Some(vtk) = cell.kind.vtk_type() {
                write!(&mut buffer, "{} ", vtk).unwrap();
            }
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             </Cells>\n"
        )
        .unwrap();

        // data: displacements
        write!(&mut buffer, "<PointData Scalars=\"TheScalars\">\n").unwrap();
        write!(
            &mut buffer,
            "<DataArray type=\"Float64\" Name=\"displacement\" NumberOfComponents=\"3\" format=\"ascii\">\n"
        )
        .unwrap();
        for point in &mesh.points {
            let ux = state.uu[self.equations.eq(point.id, Dof::Ux)?];
            let uy = state.uu[self.equations.eq(point.id, Dof::Uy)?];
            let uz = state.uu[self.equations.eq(point.id, Dof::Uz)?];
            write!(&mut buffer, "{:?} {:?} {:?} ", ux, uy, uz).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n").unwrap();
        write!(&mut buffer, "</PointData>\n").unwrap();

        // footer
        write!(
            &mut buffer,
            "</Piece>\n\
             </UnstructuredGrid>\n\
             </VTKFile>\n"
        )
        .unwrap();

        // create directory
        let full_path = self.path_vtu(index);
        let path = Path::new(&full_path);
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }

        // write file
        let mut file = File::create(path).map_err(|_| "cannot create file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write file")?;
        file.sync_all().map_err(|_| "cannot sync file")
    }

    /// Writes the PVD file that glues the VTU snapshots for ParaView
    pub fn write_pvd(&self) -> Result<(), StrError> {
        let mut buffer = String::new();
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"Collection\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <Collection>\n"
        )
        .unwrap();
        for (i, index) in self.indices.iter().enumerate() {
            write!(
                &mut buffer,
                "<DataSet timestep=\"{:?}\" file=\"{}\" />\n",
                self.times[i],
                self.path_vtu(*index)
            )
            .unwrap();
        }
        write!(
            &mut buffer,
            "</Collection>\n\
             </VTKFile>\n"
        )
        .unwrap();

        // create directory
        let full_path = self.path_pvd();
        let path = Path::new(&full_path);
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }

        // write file
        let mut file = File::create(path).map_err(|_| "cannot create file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write file")?;
        file.sync_all().map_err(|_| "cannot sync file")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::base::{Config, Essential, ParamSolid, DEFAULT_TEST_DIR};
    use crate::fem::{FemBase, FemState, FileIo};
    use gemlab::mesh::Samples;
    use std::fs;

    #[test]
    fn write_vtu_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let mut state = FemState::new(&mesh, &base, &essential, &config).unwrap();

        // uniform vertical displacement
        for p in 0..mesh.points.len() {
            state.uu[2 + 3 * p] = 1.5;
        }

        let mut file_io = FileIo::new();
        file_io
            .activate(&mesh, &base, "test_write_vtu", Some(DEFAULT_TEST_DIR))
            .unwrap();
        file_io.write_vtu(&mesh, &state, 0).unwrap();

        let contents = fs::read_to_string(file_io.path_vtu(0))
            .map_err(|_| "cannot open file")
            .unwrap();
        assert!(contents.starts_with("<?xml version=\"1.0\"?>"));
        assert!(contents.contains("<Piece NumberOfPoints=\"8\" NumberOfCells=\"1\">"));
        assert!(contents.contains("<DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n0 1 2 3 4 5 6 7 \n"));
        assert!(contents.contains("<DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n8 \n"));
        assert!(contents.contains("<DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n12 \n"));
        let disp: String = "0.0 0.0 1.5 ".repeat(8);
        assert!(contents.contains(&disp));
    }

    #[test]
    fn write_pvd_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let state = FemState::new(&mesh, &base, &essential, &config).unwrap();

        let mut file_io = FileIo::new();
        file_io
            .activate(&mesh, &base, "test_write_pvd", Some(DEFAULT_TEST_DIR))
            .unwrap();
        file_io.write_state(&state).unwrap();
        file_io.write_pvd().unwrap();

        let contents = fs::read_to_string(file_io.path_pvd())
            .map_err(|_| "cannot open file")
            .unwrap();
        assert!(contents.contains("<VTKFile type=\"Collection\""));
        assert!(contents.contains(&format!(
            "<DataSet timestep=\"0.0\" file=\"{}\" />",
            file_io.path_vtu(0)
        )));
    }
}
