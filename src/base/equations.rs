use super::Dof;
use crate::StrError;
use gemlab::mesh::{Mesh, PointId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds equation numbers (DOF numbers)
///
/// Every point carries the three displacement DOFs (Ux, Uy, Uz); hence the
/// global equation number of (point, dof) is simply `3 · point + dof`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Equations {
    /// Holds the total number of points
    pub npoint: usize,

    /// Holds the space dimension (always 3)
    pub ndim: usize,

    /// Holds all DOF numbers, organized in a per Cell fashion
    ///
    /// **Notes:**
    ///
    /// 1. The outer array has length equal to ncell
    /// 2. The inner arrays have length equal to nnode × ndim
    pub local_to_global: Vec<Vec<usize>>,

    /// Holds the total number of global equations
    ///
    /// **Note:** This is equal to the total number of DOFs
    pub n_equation: usize,

    /// Holds the supremum of the number of nonzero values (nnz) in the global matrix
    ///
    /// This equals the sum of all entries of the local element matrices,
    /// i.e., Σ (ndof_local × ndof_local). The elements share DOFs, thus the
    /// exact nnz is less than this bound, which is fine for the COO format.
    pub nnz_sup: usize,
}

impl Equations {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh) -> Result<Self, StrError> {
        if mesh.ndim != 3 {
            return Err("only 3D meshes are supported");
        }
        let npoint = mesh.points.len();
        if npoint < 1 {
            return Err("the mesh must have at least one point");
        }
        let mut local_to_global = Vec::with_capacity(mesh.cells.len());
        let mut nnz_sup = 0;
        for cell in &mesh.cells {
            let ndof_local = cell.points.len() * mesh.ndim;
            let mut l2g = Vec::with_capacity(ndof_local);
            for p in &cell.points {
                for d in 0..mesh.ndim {
                    l2g.push(mesh.ndim * (*p) + d);
                }
            }
            nnz_sup += ndof_local * ndof_local;
            local_to_global.push(l2g);
        }
        Ok(Equations {
            npoint,
            ndim: mesh.ndim,
            local_to_global,
            n_equation: npoint * mesh.ndim,
            nnz_sup,
        })
    }

    /// Returns the global equation number of (point, dof)
    pub fn eq(&self, point: PointId, dof: Dof) -> Result<usize, StrError> {
        if point >= self.npoint {
            return Err("point id is out of bounds");
        }
        Ok(self.ndim * point + dof.index())
    }
}

impl fmt::Display for Equations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cells: Local-to-Global\n").unwrap();
        write!(f, "======================\n").unwrap();
        for (i, l2g) in self.local_to_global.iter().enumerate() {
            write!(f, "{}: {:?}\n", i, l2g).unwrap();
        }
        write!(f, "\nInformation\n").unwrap();
        write!(f, "===========\n").unwrap();
        write!(f, "number of equations = {}\n", self.n_equation).unwrap();
        write!(f, "number of non-zeros = {}\n", self.nnz_sup).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
