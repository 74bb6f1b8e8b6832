//! Hypsim: hyperelastic finite element simulator with incremental loading
//!
//! This crate solves quasi-static finite-strain (total-Lagrangian) problems
//! with a compressible Neo-Hookean material. The external load is applied in
//! pseudo-time steps (the load fraction goes from 0 to 1) and each step is
//! solved by Newton-Raphson iterations with a consistent tangent. A failed
//! step is retried with a halved load increment.
//!
//! The main modules are:
//!
//! * [base] -- mesh generation, boundary condition containers, parameters,
//!   configuration, and assembly functions
//! * [material] -- the compressible Neo-Hookean model
//! * [fem] -- elements, boundary condition integrals, the implicit solver,
//!   state persistence, and post-processing

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod material;
pub mod prelude;
