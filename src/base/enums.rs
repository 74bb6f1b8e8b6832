use serde::{Deserialize, Serialize};

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,
}

impl Dof {
    /// Returns the DOF index within a point (0, 1, or 2)
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Defines natural boundary conditions (NBC)
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Nbc {
    /// Normal distributed load
    Qn,

    /// Distributed load parallel to x
    Qx,

    /// Distributed load parallel to y
    Qy,

    /// Distributed load parallel to z
    Qz,
}

impl Nbc {
    /// Returns the boundary cell DOF keys and local equation numbers
    ///
    /// **Notes:** The outer array has length = nnode.
    /// The inner arrays have lengths = ndof at the node.
    pub fn dof_equation_pairs(&self, ndim: usize, nnode: usize) -> Vec<Vec<(Dof, usize)>> {
        let mut dofs = vec![Vec::new(); nnode];
        let mut count = 0;
        for m in 0..nnode {
            dofs[m].push((Dof::Ux, count));
            count += 1;
            dofs[m].push((Dof::Uy, count));
            count += 1;
            if ndim == 3 {
                dofs[m].push((Dof::Uz, count));
                count += 1;
            }
        }
        dofs
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
