//! Common test utilities for integration tests
//!
//! Provides shared fixtures and suppliers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;

use inner_dna::domain::models::{
    AnswerEvent, CandidateSet, Category, Choice, EliminationConfig, ScenarioPick,
};
use inner_dna::domain::ports::PickSupplier;
use inner_dna::domain::{AssessmentError, AssessmentResult};
use inner_dna::services::ConvergenceOrchestrator;

/// Picks by candidate slot rather than by category, so a script works for
/// whatever candidate set stage 1 produces.
pub struct SlotPicks {
    slots: VecDeque<usize>,
}

impl SlotPicks {
    pub fn new(slots: impl IntoIterator<Item = usize>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PickSupplier for SlotPicks {
    async fn next_pick(
        &mut self,
        candidates: &CandidateSet,
        _round: u32,
    ) -> AssessmentResult<ScenarioPick> {
        let slot = self
            .slots
            .pop_front()
            .ok_or_else(|| AssessmentError::InvalidInput("slot script exhausted".to_string()))?;
        Ok(ScenarioPick::new(candidates.members()[slot % 3]))
    }
}

pub fn orchestrator() -> Arc<ConvergenceOrchestrator> {
    Arc::new(ConvergenceOrchestrator::standard(EliminationConfig::default()))
}

pub fn all_answers(choice: Choice) -> Vec<AnswerEvent> {
    vec![AnswerEvent::new(choice); 36]
}

pub fn candidates(members: [Category; 3]) -> CandidateSet {
    CandidateSet::new(members).expect("distinct candidates")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
