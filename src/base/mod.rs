//! Implements the base structures for a finite element simulation

mod assembly;
mod config;
mod constants;
mod enums;
mod equations;
mod essential;
mod geometry;
mod natural;
mod parameters;
mod penalty;
pub use crate::base::assembly::*;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::equations::*;
pub use crate::base::essential::*;
pub use crate::base::geometry::*;
pub use crate::base::natural::*;
pub use crate::base::parameters::*;
pub use crate::base::penalty::*;
