use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::AssessmentResult;
use crate::domain::models::AssessmentRecord;
use crate::domain::ports::AssessmentRepository;

/// Process-local repository, used in tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct InMemoryAssessmentRepository {
    records: RwLock<HashMap<Uuid, AssessmentRecord>>,
}

impl InMemoryAssessmentRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn save(&self, record: &AssessmentRecord) -> AssessmentResult<()> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> AssessmentResult<Option<AssessmentRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> AssessmentResult<Vec<AssessmentRecord>> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }
}
