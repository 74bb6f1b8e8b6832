//! Makes available common structures needed to run a simulation
//!
//! You may write `use hypsim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{generate_box_mesh, BoxFaces, Config, Dof, Essential, Natural, Nbc, SurfacePenalty};
pub use crate::base::{ParamSolid, ParamStressStrain, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::fem::{FemBase, FemState, FileIo, PostProc, SolverImplicit};
