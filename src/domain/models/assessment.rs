//! Persisted assessment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::ConvergenceResult;

/// A completed assessment, stored against a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Record identifier
    pub id: Uuid,
    /// Free-form identifier of the person assessed (user id, email, name).
    pub subject: String,
    /// Engine output
    pub result: ConvergenceResult,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// New record with a fresh id, stamped now
    pub fn new(subject: impl Into<String>, result: ConvergenceResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            result,
            completed_at: Utc::now(),
        }
    }
}
