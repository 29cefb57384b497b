//! Conversation aggregate: entries and the append-only store holding them.

pub mod entities;
pub mod store;

pub use entities::*;
pub use store::*;
