//! Scripted and weighted-random implementations of the supplier ports.
//!
//! Scripted suppliers replay fixed sequences (API callers that already hold
//! every answer, tests). Weighted suppliers simulate a respondent from a
//! [`PreferencePattern`] and own their RNG, so each simulated run is
//! reproducible from its seed.

use std::collections::VecDeque;

use async_trait::async_trait;
use rand::Rng;

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{
    AnswerEvent, CandidateSet, Category, Choice, PreferencePattern, Question, ScenarioPick,
};
use crate::domain::ports::{AnswerSupplier, PickSupplier};

// ---------------------------------------------------------------------------
// Scripted
// ---------------------------------------------------------------------------

/// Replays a fixed answer sequence.
#[derive(Debug, Clone)]
pub struct ScriptedAnswers {
    answers: VecDeque<AnswerEvent>,
}

impl ScriptedAnswers {
    /// Replay `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = AnswerEvent>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    /// Answers left unconsumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl AnswerSupplier for ScriptedAnswers {
    async fn next_answer(
        &mut self,
        index: usize,
        _question: &Question,
    ) -> AssessmentResult<AnswerEvent> {
        self.answers.pop_front().ok_or_else(|| {
            AssessmentError::InvalidInput(format!("No answer supplied for question {}", index + 1))
        })
    }
}

/// Replays a fixed pick sequence.
#[derive(Debug, Clone)]
pub struct ScriptedPicks {
    picks: VecDeque<ScenarioPick>,
}

impl ScriptedPicks {
    /// Replay `picks` in order.
    pub fn new(picks: impl IntoIterator<Item = Category>) -> Self {
        Self {
            picks: picks.into_iter().map(ScenarioPick::new).collect(),
        }
    }

    /// Picks left unconsumed.
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

#[async_trait]
impl PickSupplier for ScriptedPicks {
    async fn next_pick(
        &mut self,
        _candidates: &CandidateSet,
        round: u32,
    ) -> AssessmentResult<ScenarioPick> {
        self.picks.pop_front().ok_or_else(|| {
            AssessmentError::InvalidInput(format!("No scenario pick supplied for round {round}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Weighted random
// ---------------------------------------------------------------------------

/// Answers each question `(a, b)` with `A` at probability `w_a / (w_a + w_b)`.
#[derive(Debug, Clone)]
pub struct WeightedAnswerSupplier<R> {
    pattern: PreferencePattern,
    rng: R,
}

impl<R: Rng + Send> WeightedAnswerSupplier<R> {
    /// Respondent following `pattern`, drawing from `rng`.
    pub const fn new(pattern: PreferencePattern, rng: R) -> Self {
        Self { pattern, rng }
    }
}

#[async_trait]
impl<R: Rng + Send> AnswerSupplier for WeightedAnswerSupplier<R> {
    async fn next_answer(
        &mut self,
        _index: usize,
        question: &Question,
    ) -> AssessmentResult<AnswerEvent> {
        let wa = self.pattern.weight(question.category_a());
        let wb = self.pattern.weight(question.category_b());
        let p_a = if wa + wb > 0.0 { wa / (wa + wb) } else { 0.5 };

        let choice = if self.rng.random::<f64>() < p_a {
            Choice::A
        } else {
            Choice::B
        };
        Ok(AnswerEvent::new(choice))
    }
}

/// Picks a candidate in proportion to its pattern weight. Falls back to a
/// uniform draw when every candidate weighs zero.
#[derive(Debug, Clone)]
pub struct WeightedPickSupplier<R> {
    pattern: PreferencePattern,
    rng: R,
}

impl<R: Rng + Send> WeightedPickSupplier<R> {
    /// Respondent following `pattern`, drawing from `rng`.
    pub const fn new(pattern: PreferencePattern, rng: R) -> Self {
        Self { pattern, rng }
    }
}

#[async_trait]
impl<R: Rng + Send> PickSupplier for WeightedPickSupplier<R> {
    async fn next_pick(
        &mut self,
        candidates: &CandidateSet,
        _round: u32,
    ) -> AssessmentResult<ScenarioPick> {
        let members = candidates.members();
        let total: f64 = members.iter().map(|&c| self.pattern.weight(c)).sum();

        if total <= 0.0 {
            let slot = self.rng.random_range(0..members.len());
            return Ok(ScenarioPick::new(members[slot]));
        }

        let mut target = self.rng.random::<f64>() * total;
        for &member in members {
            let weight = self.pattern.weight(member);
            if target < weight {
                return Ok(ScenarioPick::new(member));
            }
            target -= weight;
        }
        // float rounding can leave target just above the last bucket
        let last = members
            .iter()
            .rev()
            .find(|&&c| self.pattern.weight(c) > 0.0)
            .copied()
            .unwrap_or(members[0]);
        Ok(ScenarioPick::new(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn candidates() -> CandidateSet {
        CandidateSet::new([Category::T8, Category::T3, Category::T7]).unwrap()
    }

    #[tokio::test]
    async fn test_scripted_answers_exhaust() {
        let question = Question::new(Category::T1, Category::T2).unwrap();
        let mut answers = ScriptedAnswers::new([AnswerEvent::from(true)]);

        assert_eq!(
            answers.next_answer(0, &question).await.unwrap().choice,
            Choice::A
        );
        assert_eq!(answers.remaining(), 0);
        assert!(answers.next_answer(1, &question).await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_picks_exhaust() {
        let mut picks = ScriptedPicks::new([Category::T3]);
        let pick = picks.next_pick(&candidates(), 1).await.unwrap();
        assert_eq!(pick.category, Category::T3);
        assert!(picks.next_pick(&candidates(), 2).await.is_err());
    }

    #[tokio::test]
    async fn test_weighted_picks_stay_in_candidates() {
        let pattern = PreferencePattern::uniform();
        let mut picks = WeightedPickSupplier::new(pattern, SmallRng::seed_from_u64(7));
        for round in 1..=200 {
            let pick = picks.next_pick(&candidates(), round).await.unwrap();
            assert!(candidates().contains(pick.category));
        }
    }

    #[tokio::test]
    async fn test_zero_weight_candidate_never_picked() {
        let mut weights = [1.0; 9];
        weights[Category::T7.index()] = 0.0;
        let pattern = PreferencePattern::from_weights(weights).unwrap();
        let mut picks = WeightedPickSupplier::new(pattern, SmallRng::seed_from_u64(11));

        for round in 1..=500 {
            let pick = picks.next_pick(&candidates(), round).await.unwrap();
            assert_ne!(pick.category, Category::T7);
        }
    }

    #[tokio::test]
    async fn test_all_zero_weights_fall_back_to_uniform() {
        let pattern = PreferencePattern::from_weights([0.0; 9]).unwrap();
        let mut picks = WeightedPickSupplier::new(pattern, SmallRng::seed_from_u64(3));
        let mut seen = std::collections::HashSet::new();
        for round in 1..=300 {
            seen.insert(picks.next_pick(&candidates(), round).await.unwrap().category);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_weighted_answers_follow_pattern() {
        let pattern = PreferencePattern::dominant(Category::T2, 9.0).unwrap();
        let mut answers = WeightedAnswerSupplier::new(pattern, SmallRng::seed_from_u64(5));
        let question = Question::new(Category::T1, Category::T2).unwrap();

        let mut chose_b = 0;
        for i in 0..1000 {
            if answers.next_answer(i, &question).await.unwrap().choice == Choice::B {
                chose_b += 1;
            }
        }
        // expected 900
        assert!(chose_b > 850 && chose_b < 950, "chose_b = {chose_b}");
    }

    #[tokio::test]
    async fn test_same_seed_same_draws() {
        let pattern = PreferencePattern::dominant(Category::T8, 2.0).unwrap();
        let mut a = WeightedPickSupplier::new(pattern, SmallRng::seed_from_u64(99));
        let mut b = WeightedPickSupplier::new(pattern, SmallRng::seed_from_u64(99));
        for round in 1..=50 {
            assert_eq!(
                a.next_pick(&candidates(), round).await.unwrap(),
                b.next_pick(&candidates(), round).await.unwrap()
            );
        }
    }
}
