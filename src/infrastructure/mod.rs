//! Infrastructure layer module
//!
//! This module contains adapters and ambient services:
//! - Configuration management
//! - Logging infrastructure
//! - Assessment storage
//!
//! Storage implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod storage;
