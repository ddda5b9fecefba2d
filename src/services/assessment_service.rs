use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::AssessmentRecord;
use crate::domain::ports::{AnswerSupplier, AssessmentRepository, PickSupplier};
use crate::services::convergence_orchestrator::ConvergenceOrchestrator;

/// Runs assessments and stores their results.
///
/// The repository handle is injected per service instance rather than
/// looked up globally.
pub struct AssessmentService<R: AssessmentRepository> {
    orchestrator: Arc<ConvergenceOrchestrator>,
    repository: Arc<R>,
}

impl<R: AssessmentRepository> AssessmentService<R> {
    /// Service over a shared orchestrator and repository
    pub const fn new(orchestrator: Arc<ConvergenceOrchestrator>, repository: Arc<R>) -> Self {
        Self {
            orchestrator,
            repository,
        }
    }

    /// Underlying engine
    pub fn orchestrator(&self) -> &ConvergenceOrchestrator {
        &self.orchestrator
    }

    /// Run a full assessment for `subject` and persist the record.
    ///
    /// Nothing is stored when the run fails.
    #[instrument(skip(self, answers, picks))]
    pub async fn assess<A, P>(
        &self,
        subject: &str,
        answers: &mut A,
        picks: &mut P,
    ) -> AssessmentResult<AssessmentRecord>
    where
        A: AnswerSupplier + ?Sized,
        P: PickSupplier + ?Sized,
    {
        let result = self.orchestrator.run(answers, picks).await?;
        let record = AssessmentRecord::new(subject, result);
        self.repository.save(&record).await?;

        info!(id = %record.id, winner = %record.result.winner(), "assessment saved");
        Ok(record)
    }

    /// Fetch one record, `NotFound` when absent
    pub async fn get(&self, id: Uuid) -> AssessmentResult<AssessmentRecord> {
        self.repository
            .get(id)
            .await?
            .ok_or(AssessmentError::NotFound(id))
    }

    /// All records, or only those for `subject`
    pub async fn list(&self, subject: Option<&str>) -> AssessmentResult<Vec<AssessmentRecord>> {
        match subject {
            Some(subject) => self.repository.list_by_subject(subject).await,
            None => self.repository.list().await,
        }
    }
}
