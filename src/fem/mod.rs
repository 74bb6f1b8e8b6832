//! Implements the finite element solver and the load stepping loop

mod bc_distributed;
mod bc_prescribed;
mod bc_surface_penalty;
mod control_convergence;
mod element_solid;
mod element_trait;
mod elements;
mod fem_base;
mod fem_state;
mod file_io;
mod file_io_write_vtu;
mod linear_system;
mod post_processing;
mod solver_implicit;
pub use crate::fem::bc_distributed::*;
pub use crate::fem::bc_prescribed::*;
pub use crate::fem::bc_surface_penalty::*;
pub use crate::fem::control_convergence::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::element_trait::*;
pub use crate::fem::elements::*;
pub use crate::fem::fem_base::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::file_io::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::post_processing::*;
pub use crate::fem::solver_implicit::*;
