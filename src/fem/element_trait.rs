use super::FemState;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the trait for local (element) equations
pub trait ElementTrait: Send + Sync {
    /// Returns whether the local Jacobian matrix is symmetric or not
    fn symmetric_jacobian(&self) -> bool;

    /// Returns the local-to-global mapping
    fn local_to_global(&self) -> &Vec<usize>;

    /// Calculates the residual vector (f_int - f_ext contribution)
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError>;

    /// Calculates the Jacobian matrix (consistent tangent)
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError>;

    /// Calculates the stored strain energy of the element
    fn strain_energy(&mut self, state: &FemState) -> Result<f64, StrError>;
}
