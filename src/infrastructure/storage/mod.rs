//! Assessment storage adapters
//!
//! - In-memory repository for tests and single-process use
//! - JSON-file repository, one file per assessment

/// Process-local repository
pub mod in_memory;
/// One JSON file per assessment
pub mod json_file;

pub use in_memory::InMemoryAssessmentRepository;
pub use json_file::JsonFileAssessmentRepository;
