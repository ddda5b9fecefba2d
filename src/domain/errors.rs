//! Domain errors for the type convergence engine.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while running or storing an assessment.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// Caller-supplied input violates an engine contract: wrong answer count,
    /// a pick outside the candidate set, a malformed question or candidate set.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The question catalog represents fewer categories than the candidate
    /// set needs. Indicates a catalog defect, not bad user data.
    #[error("Insufficient categories: catalog represents {found}, need at least {required}")]
    InsufficientCategories {
        /// Distinct categories in the catalog
        found: usize,
        /// Candidate set size
        required: usize,
    },

    /// No stored assessment with this id
    #[error("Assessment not found: {0}")]
    NotFound(Uuid),

    /// Repository I/O failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias used throughout the domain and service layers.
pub type AssessmentResult<T> = Result<T, AssessmentError>;

impl From<serde_json::Error> for AssessmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AssessmentError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
