//! Implements material models

mod neo_hookean;
pub use crate::material::neo_hookean::*;
