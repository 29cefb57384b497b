//! Domain layer: browser-free types, rules, and the chart binding lifecycle.

pub mod analysis;
pub mod chart;
pub mod conversation;
pub mod errors;
pub mod logging;
