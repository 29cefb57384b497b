//! Application layer: the orchestrator and the port it reports through.

pub mod notifications;
pub mod orchestrator;

pub use notifications::*;
pub use orchestrator::*;
