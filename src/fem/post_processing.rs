use super::{FemBase, FemState, FileIo};
use crate::base::Dof;
use crate::material::{new_stress_tensor, NeoHookean};
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::{Mesh, PointId};
use gemlab::shapes::Scratchpad;
use russell_lab::Matrix;
use russell_tensor::Tensor2;

/// Assists in post-processing the results of a simulation
pub struct PostProc {
    /// Holds the summary with the output indices, load factors, and DOF numbers
    pub file_io: FileIo,

    /// Holds the mesh read from the results directory
    pub mesh: Mesh,
}

impl PostProc {
    /// Reads the summary and the mesh from the results directory
    pub fn new(output_dir: &str, filename_stem: &str) -> Result<Self, StrError> {
        let path_summary = format!("{}/{}-summary.json", output_dir, filename_stem);
        let file_io = FileIo::read_json(&path_summary)?;
        let mesh = Mesh::read_json(&file_io.path_mesh())?;
        Ok(PostProc { file_io, mesh })
    }

    /// Reads the FEM state at the given output index
    pub fn read_state(&self, index: usize) -> Result<FemState, StrError> {
        FemState::read_json(&self.file_io.path_state(index))
    }

    /// Returns the displacement of a point along a DOF
    pub fn displacement(&self, state: &FemState, point: PointId, dof: Dof) -> Result<f64, StrError> {
        let eq = self.file_io.equations.eq(point, dof)?;
        Ok(state.uu[eq])
    }

    /// Recovers the Cauchy stress tensors at the Gauss points of a cell
    pub fn gauss_stresses(&self, base: &FemBase, state: &FemState, cell_id: usize) -> Result<Vec<Tensor2>, StrError> {
        if cell_id >= self.mesh.cells.len() {
            return Err("cell id is out of bounds");
        }
        let cell = &self.mesh.cells[cell_id];
        let model = NeoHookean::new(&base.param)?;
        let mut pad = Scratchpad::new(self.mesh.ndim, cell.kind)?;
        self.mesh.set_pad(&mut pad, &cell.points);
        let gauss = Gauss::new_or_sized(cell.kind, base.param.ngauss)?;
        let nnode = cell.points.len();

        let dofs = [Dof::Ux, Dof::Uy, Dof::Uz];
        let mut ff = Matrix::new(3, 3);
        let mut ffi = Matrix::new(3, 3);
        let mut all = Vec::with_capacity(gauss.npoint());
        for p in 0..gauss.npoint() {
            let iota = gauss.coords(p);
            let ksi = [iota[0], iota[1], iota[2]];
            pad.calc_gradient(&ksi)?;

            // deformation gradient F = I + Σ u ⊗ G
            let gg = &pad.gradient;
            for i in 0..3 {
                for j in 0..3 {
                    let mut sum = if i == j { 1.0 } else { 0.0 };
                    for m in 0..nnode {
                        let eq = base.equations.eq(cell.points[m], dofs[i])?;
                        sum += state.uu[eq] * gg.get(m, j);
                    }
                    ff.set(i, j, sum);
                }
            }
            let mut sigma = new_stress_tensor();
            model.cauchy_stress(&mut sigma, &mut ffi, &ff)?;
            all.push(sigma);
        }
        Ok(all)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::PostProc;
    use crate::base::{Config, Dof, Essential, ParamSolid, DEFAULT_TEST_DIR};
    use crate::fem::{FemBase, FemState, FileIo};
    use gemlab::mesh::Samples;
    use russell_lab::approx_eq;

    #[test]
    fn read_back_and_stress_recovery_work() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let mut state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        state.t = 0.25;
        for m in 0..8 {
            let z = mesh.points[m].coords[2];
            state.uu[2 + 3 * m] = 0.01 * z;
        }

        let fn_stem = "test_post_processing";
        let mut file_io = FileIo::new();
        file_io.activate(&mesh, &base, fn_stem, Some(DEFAULT_TEST_DIR)).unwrap();
        file_io.write_state(&state).unwrap();
        file_io.write_self().unwrap();

        let post = PostProc::new(DEFAULT_TEST_DIR, fn_stem).unwrap();
        assert_eq!(post.mesh.points.len(), 8);
        assert_eq!(post.file_io.times, &[0.25]);

        let read_back = post.read_state(0).unwrap();
        assert_eq!(read_back.t, 0.25);
        assert_eq!(post.displacement(&read_back, 7, Dof::Uz).unwrap(), 0.01);

        // under a uniaxial stretch the recovered stress must be uniform,
        // symmetric, and with σzz dominating
        let stresses = post.gauss_stresses(&base, &read_back, 0).unwrap();
        assert_eq!(stresses.len(), 8);
        let szz = stresses[0].get(2, 2);
        assert!(szz > 0.0);
        for sigma in &stresses {
            approx_eq(sigma.get(2, 2), szz, 1e-12);
            approx_eq(sigma.get(0, 1), 0.0, 1e-12);
        }
    }
}
