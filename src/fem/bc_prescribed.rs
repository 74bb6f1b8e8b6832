use super::FemBase;
use crate::base::Essential;
use crate::StrError;
use russell_lab::Vector;

/// Implements an array of prescribed (primary) values
pub struct BcPrescribed {
    /// Prescribed values, one per prescribed equation
    values: Vec<f64>,

    /// An array indicating which DOFs (equations) are prescribed
    ///
    /// The length of `flags` is equal to the total number of DOFs (total number of equations).
    pub flags: Vec<bool>,

    /// Array with only the numbers of the prescribed equations
    pub equations: Vec<usize>,
}

impl BcPrescribed {
    /// Allocates new instance
    pub fn new(base: &FemBase, essential: &Essential) -> Result<Self, StrError> {
        let mut values = Vec::with_capacity(essential.size());
        let mut flags = vec![false; base.equations.n_equation];
        let mut equations = Vec::with_capacity(essential.size());
        for ((point_id, dof), value) in &essential.all {
            let eq = base.equations.eq(*point_id, *dof)?;
            values.push(*value);
            flags[eq] = true;
            equations.push(eq);
        }
        Ok(BcPrescribed { values, flags, equations })
    }

    /// Returns the number of prescribed equations
    pub fn size(&self) -> usize {
        self.equations.len()
    }

    /// Sets all prescribed values in the solution vector
    pub fn apply(&self, uu: &mut Vector) {
        for (i, eq) in self.equations.iter().enumerate() {
            uu[*eq] = self.values[i];
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
