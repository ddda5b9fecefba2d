//! Supplier ports for the two assessment stages.
//!
//! Each call is a suspension point: in production the engine waits here for a
//! respondent to act. Simulations implement the same traits with seeded
//! random draws, so randomness never reaches the tally or the selector.

use async_trait::async_trait;

use crate::domain::errors::AssessmentResult;
use crate::domain::models::{AnswerEvent, CandidateSet, Question, ScenarioPick};

/// Source of stage-1 forced-choice answers.
#[async_trait]
pub trait AnswerSupplier: Send {
    /// Produce the answer for the question at `index` (zero-based).
    async fn next_answer(&mut self, index: usize, question: &Question)
        -> AssessmentResult<AnswerEvent>;
}

/// Source of stage-2 scenario picks.
#[async_trait]
pub trait PickSupplier: Send {
    /// Produce the pick for `round` (one-based). The engine rejects picks
    /// outside `candidates`.
    async fn next_pick(
        &mut self,
        candidates: &CandidateSet,
        round: u32,
    ) -> AssessmentResult<ScenarioPick>;
}
