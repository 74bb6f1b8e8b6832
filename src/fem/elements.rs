use super::{ElementSolid, ElementTrait, FemBase, FemState};
use crate::base::{assemble_matrix, assemble_vector, Config};
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use russell_lab::{deriv1_central5, Matrix, Vector};
use russell_sparse::CooMatrix;

/// Defines a generic finite element, wrapping an "actual" implementation
pub struct GenericElement<'a> {
    /// Connects to the "actual" implementation of local equations
    pub actual: Box<dyn ElementTrait + 'a>,

    /// Implements the residual vector
    pub residual: Vector,

    /// Implements the Jacobian matrix
    pub jacobian: Matrix,
}

/// Holds a collection of (generic) finite elements
pub struct Elements<'a> {
    /// All elements
    pub all: Vec<GenericElement<'a>>,
}

impl<'a> GenericElement<'a> {
    /// Allocates new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &'a Config, cell: &Cell) -> Result<Self, StrError> {
        let actual: Box<dyn ElementTrait> = Box::new(ElementSolid::new(mesh, base, config, cell)?);
        let neq = base.n_local_eq(cell);
        Ok(GenericElement {
            actual,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
        })
    }

    /// Calculates the residual vector
    pub fn calc_residual(&mut self, state: &FemState) -> Result<(), StrError> {
        self.actual.calc_residual(&mut self.residual, state)
    }

    /// Calculates the Jacobian matrix
    pub fn calc_jacobian(&mut self, state: &FemState) -> Result<(), StrError> {
        self.actual.calc_jacobian(&mut self.jacobian, state)
    }

    /// Calculates the Jacobian matrix using finite differences
    ///
    /// **Note:** The state is changed temporarily, but restored at the end of the function
    pub fn numerical_jacobian(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let GenericElement {
            actual,
            residual,
            jacobian,
        } = self;
        let neq = residual.dim();
        for i in 0..neq {
            for j in 0..neq {
                let at_u = state.uu[actual.local_to_global()[j]];
                let res = deriv1_central5(at_u, state, |u, s| {
                    let eq = actual.local_to_global()[j];
                    let original = s.uu[eq];
                    s.uu[eq] = u;
                    actual.calc_residual(residual, s)?;
                    s.uu[eq] = original;
                    Ok(residual[i])
                })?;
                jacobian.set(i, j, res);
            }
        }
        Ok(())
    }
}

impl<'a> Elements<'a> {
    /// Allocates new instance
    pub fn new(mesh: &Mesh, base: &FemBase, config: &'a Config) -> Result<Self, StrError> {
        let res: Result<Vec<_>, _> = mesh
            .cells
            .iter()
            .map(|cell| GenericElement::new(mesh, base, config, cell))
            .collect();
        match res {
            Ok(all) => Ok(Elements { all }),
            Err(e) => Err(e),
        }
    }

    /// Returns whether all local Jacobian matrices are symmetric or not
    pub fn all_symmetric_jacobians(&self) -> bool {
        for e in &self.all {
            if !e.actual.symmetric_jacobian() {
                return false;
            }
        }
        true
    }

    /// Computes the residual vectors
    pub fn calc_residuals(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.calc_residual(state)).collect()
    }

    /// Computes the Jacobian matrices
    pub fn calc_jacobians(&mut self, state: &FemState) -> Result<(), StrError> {
        self.all.iter_mut().map(|e| e.calc_jacobian(state)).collect()
    }

    /// Assembles residual vectors into the global residual
    ///
    /// **Note:** You must call calc_residuals first
    pub fn assemble_residuals(&self, rr: &mut Vector, ignore: &[bool]) {
        self.all
            .iter()
            .for_each(|e| assemble_vector(rr, &e.residual, e.actual.local_to_global(), ignore));
    }

    /// Assembles Jacobian matrices into the global matrix
    ///
    /// **Note:** You must call calc_jacobians first
    pub fn assemble_jacobians(&self, kk: &mut CooMatrix, ignore: &[bool]) -> Result<(), StrError> {
        for e in &self.all {
            assemble_matrix(kk, &e.jacobian, e.actual.local_to_global(), ignore)?;
        }
        Ok(())
    }

    /// Sums the stored strain energy of all elements
    pub fn strain_energy(&mut self, state: &FemState) -> Result<f64, StrError> {
        let mut total = 0.0;
        for e in &mut self.all {
            total += e.actual.strain_energy(state)?;
        }
        Ok(total)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Elements, GenericElement};
    use crate::base::{Config, Essential, ParamSolid};
    use crate::fem::{FemBase, FemState};
    use gemlab::mesh::Samples;
    use russell_lab::mat_approx_eq;

    #[test]
    fn new_works() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let elements = Elements::new(&mesh, &base, &config).unwrap();
        assert_eq!(elements.all.len(), 1);
        assert!(elements.all_symmetric_jacobians());
    }

    #[test]
    fn numerical_jacobian_matches_analytical() {
        let mesh = Samples::one_hex8();
        let p1 = ParamSolid::sample_neo_hookean();
        let base = FemBase::new(&mesh, p1).unwrap();
        let config = Config::new(&mesh);
        let essential = Essential::new();
        let mut state = FemState::new(&mesh, &base, &essential, &config).unwrap();
        for m in 0..8 {
            let x = &mesh.points[mesh.cells[0].points[m]].coords;
            state.uu[0 + 3 * m] = 0.01 * x[0];
            state.uu[1 + 3 * m] = -0.02 * x[1];
            state.uu[2 + 3 * m] = 0.05 * x[2] + 0.01 * x[0];
        }
        let mut element = GenericElement::new(&mesh, &base, &config, &mesh.cells[0]).unwrap();
        element.calc_jacobian(&state).unwrap();
        let analytical = element.jacobian.clone();
        element.numerical_jacobian(&mut state).unwrap();
        mat_approx_eq(&analytical, &element.jacobian, 1e-8);
    }
}
