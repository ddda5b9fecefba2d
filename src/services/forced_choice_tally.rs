use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{AnswerEvent, CategoryScore, QuestionCatalog};

/// Stage 1: converts forced-choice answers into per-category votes.
///
/// Deterministic: the same catalog and answers always yield the same score.
#[derive(Debug, Clone)]
pub struct ForcedChoiceTally {
    catalog: Arc<QuestionCatalog>,
}

impl ForcedChoiceTally {
    /// Tally against `catalog`; answers must match its length.
    pub const fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Credit the chosen side of each question.
    ///
    /// Exactly one answer per question is required; unanswered or extra
    /// answers fail with `InvalidInput`.
    pub fn tally(&self, answers: &[AnswerEvent]) -> AssessmentResult<CategoryScore> {
        if answers.len() != self.catalog.len() {
            return Err(AssessmentError::InvalidInput(format!(
                "Expected {} answers, got {}",
                self.catalog.len(),
                answers.len()
            )));
        }

        let mut score = CategoryScore::new();
        for (question, answer) in self.catalog.questions().iter().zip(answers) {
            score.increment(question.chosen(answer.choice));
        }

        debug!(total = score.total(), "forced-choice tally complete");
        Ok(score)
    }
}
