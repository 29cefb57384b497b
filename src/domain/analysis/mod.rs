//! Analysis aggregate: what the query service returns and how to ask for it.

pub mod repositories;
pub mod value_objects;

pub use repositories::*;
pub use value_objects::*;
