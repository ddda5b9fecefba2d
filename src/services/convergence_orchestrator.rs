//! Sequences the two assessment stages into a single convergence result.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{
    AnswerEvent, CandidateSet, CategoryScore, ConvergenceResult, EliminationConfig,
    QuestionCatalog,
};
use crate::domain::ports::{AnswerSupplier, PickSupplier};
use crate::services::forced_choice_tally::ForcedChoiceTally;
use crate::services::scenario_elimination::ScenarioElimination;
use crate::services::top_k_selector::TopKSelector;

/// Runs tally, selection, and elimination for one assessment.
///
/// Holds only immutable configuration. Every call works on its own data,
/// so one orchestrator can serve any number of concurrent runs.
#[derive(Debug, Clone)]
pub struct ConvergenceOrchestrator {
    catalog: Arc<QuestionCatalog>,
    tally: ForcedChoiceTally,
    selector: TopKSelector,
    elimination: ScenarioElimination,
}

impl ConvergenceOrchestrator {
    /// Orchestrator over `catalog` with the given stopping policy.
    pub fn new(catalog: Arc<QuestionCatalog>, config: EliminationConfig) -> Self {
        Self {
            tally: ForcedChoiceTally::new(Arc::clone(&catalog)),
            selector: TopKSelector::new(Arc::clone(&catalog)),
            elimination: ScenarioElimination::new(config),
            catalog,
        }
    }

    /// Orchestrator over the standard 36-question catalog.
    pub fn standard(config: EliminationConfig) -> Self {
        Self::new(Arc::new(QuestionCatalog::standard()), config)
    }

    /// Stage-1 catalog.
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Stopping policy in effect.
    pub const fn config(&self) -> &EliminationConfig {
        self.elimination.config()
    }

    /// Ask every catalog question in order.
    pub async fn gather_answers<A>(&self, supplier: &mut A) -> AssessmentResult<Vec<AnswerEvent>>
    where
        A: AnswerSupplier + ?Sized,
    {
        let mut answers = Vec::with_capacity(self.catalog.len());
        for (index, question) in self.catalog.questions().iter().enumerate() {
            answers.push(supplier.next_answer(index, question).await?);
        }
        Ok(answers)
    }

    /// Stage 1 only: tally the answers and select the candidates.
    pub fn shortlist(&self, answers: &[AnswerEvent]) -> AssessmentResult<(CategoryScore, CandidateSet)> {
        let score = self.tally.tally(answers)?;
        let candidates = self.selector.select(&score)?;
        Ok((score, candidates))
    }

    /// Both stages over an answer sequence the caller already holds.
    #[instrument(skip_all, fields(answers = answers.len()))]
    pub async fn converge<P>(
        &self,
        answers: &[AnswerEvent],
        picks: &mut P,
    ) -> AssessmentResult<ConvergenceResult>
    where
        P: PickSupplier + ?Sized,
    {
        let (score, candidates) = self.shortlist(answers)?;
        let elimination = self.elimination.run(&candidates, picks).await?;

        let result = ConvergenceResult::new(
            score,
            candidates,
            elimination.stop_reason,
            elimination.rounds,
        )
        .ok_or_else(|| AssessmentError::InvalidInput("Elimination produced no rounds".to_string()))?;

        info!(
            winner = %result.winner(),
            confidence = result.confidence(),
            rounds_used = result.rounds_used(),
            stop_reason = %result.stop_reason(),
            "assessment converged"
        );
        Ok(result)
    }

    /// Both stages, pulling answers and picks from suppliers.
    pub async fn run<A, P>(&self, answers: &mut A, picks: &mut P) -> AssessmentResult<ConvergenceResult>
    where
        A: AnswerSupplier + ?Sized,
        P: PickSupplier + ?Sized,
    {
        let answers = self.gather_answers(answers).await?;
        self.converge(&answers, picks).await
    }
}
