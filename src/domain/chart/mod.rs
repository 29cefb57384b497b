//! Chart aggregate: line chart configuration and the single-instance binding.

pub mod binding;
pub mod value_objects;

pub use binding::*;
pub use value_objects::*;
