//! Assessment repository port for result persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::AssessmentResult;
use crate::domain::models::AssessmentRecord;

/// Repository interface for completed assessments.
///
/// Handles are passed explicitly to whoever needs them; there is no
/// process-wide instance.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Persist a record. A record with the same ID is replaced.
    async fn save(&self, record: &AssessmentRecord) -> AssessmentResult<()>;

    /// Load a record by ID.
    async fn get(&self, id: Uuid) -> AssessmentResult<Option<AssessmentRecord>>;

    /// All records, most recent first.
    async fn list(&self) -> AssessmentResult<Vec<AssessmentRecord>>;

    /// Records for one subject, most recent first.
    async fn list_by_subject(&self, subject: &str) -> AssessmentResult<Vec<AssessmentRecord>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.subject == subject)
            .collect())
    }
}
