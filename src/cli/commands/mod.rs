//! CLI command implementations.

pub mod assess;
pub mod catalog;
pub mod results;
pub mod simulate;
