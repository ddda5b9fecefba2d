//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation

/// figment-based loader and validation
pub mod loader;

pub use loader::{ConfigError, ConfigLoader, MAX_ROUNDS_LIMIT};
