//! Domain layer for the type convergence engine
//!
//! This module contains core models, errors, and the port traits that
//! connect the engine to answer sources and result storage.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AssessmentError, AssessmentResult};
