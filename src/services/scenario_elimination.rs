//! Stage 2: scenario elimination among the three candidates.
//!
//! One pick per round, up to `max_rounds`. After every round the candidates
//! are re-ranked and the stopping policy is checked in priority order:
//!
//! 1. leader >= `early_win_tally` and gap >= `strong_gap` (strong early win)
//! 2. leader >= `early_win_tally` and gap >= `early_win_gap` (early win)
//! 3. rounds >= `fallback_min_rounds` and gap >= `fallback_gap` (fallback win)
//! 4. rounds == `max_rounds` (round cap, stops unconditionally)
//!
//! The winner is the rank-1 candidate when the loop stops. Ties in the
//! ranking go to the candidate earlier in canonical category order.

use tracing::{debug, instrument};

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{
    CandidateSet, CandidateTally, Category, EliminationConfig, RoundRecord, Standings, StopReason,
    CANDIDATE_COUNT,
};
use crate::domain::ports::PickSupplier;

/// Running per-candidate tally for one elimination run.
#[derive(Debug, Clone)]
struct RoundTally {
    candidates: CandidateSet,
    counts: [u32; CANDIDATE_COUNT],
}

impl RoundTally {
    const fn new(candidates: CandidateSet) -> Self {
        Self {
            candidates,
            counts: [0; CANDIDATE_COUNT],
        }
    }

    fn record(&mut self, category: Category) -> AssessmentResult<()> {
        let slot = self.candidates.position(category).ok_or_else(|| {
            AssessmentError::InvalidInput(format!(
                "Scenario pick {category} is not in candidate set {}",
                self.candidates
            ))
        })?;
        self.counts[slot] += 1;
        Ok(())
    }

    fn standings(&self) -> Standings {
        let members = self.candidates.members();
        let mut standings: Standings = std::array::from_fn(|i| CandidateTally {
            category: members[i],
            count: self.counts[i],
        });
        standings.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
        standings
    }
}

/// Outcome of one elimination run, before it is folded into a
/// `ConvergenceResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    /// Rule that fired.
    pub stop_reason: StopReason,
    /// Per-round trace, never empty.
    pub rounds: Vec<RoundRecord>,
}

impl Elimination {
    fn last(&self) -> &RoundRecord {
        // run() always records at least one round before stopping
        &self.rounds[self.rounds.len() - 1]
    }

    /// Leader after the last round.
    pub fn winner(&self) -> Category {
        self.last().leader().category
    }

    /// Rounds played.
    pub fn rounds_used(&self) -> u32 {
        self.last().round
    }

    /// Winner tally over rounds played.
    pub fn confidence(&self) -> f64 {
        f64::from(self.last().leader().count) / f64::from(self.rounds_used())
    }
}

/// Runs the bounded elimination round against a pick supplier.
#[derive(Debug, Clone, Default)]
pub struct ScenarioElimination {
    config: EliminationConfig,
}

impl ScenarioElimination {
    /// Engine with the given stopping policy.
    pub const fn new(config: EliminationConfig) -> Self {
        Self { config }
    }

    /// Stopping policy in effect.
    pub const fn config(&self) -> &EliminationConfig {
        &self.config
    }

    /// Apply the stopping policy to the standings after `round`.
    pub fn evaluate_stop(&self, round: u32, standings: &Standings) -> Option<StopReason> {
        let cfg = &self.config;
        let leader = standings[0].count;
        let gap = leader.saturating_sub(standings[1].count);

        if leader >= cfg.early_win_tally && gap >= cfg.strong_gap {
            Some(StopReason::StrongEarlyWin)
        } else if leader >= cfg.early_win_tally && gap >= cfg.early_win_gap {
            Some(StopReason::EarlyWin)
        } else if round >= cfg.fallback_min_rounds && gap >= cfg.fallback_gap {
            Some(StopReason::FallbackWin)
        } else if round >= cfg.max_rounds {
            Some(StopReason::RoundCap)
        } else {
            None
        }
    }

    /// Draw picks until the stopping policy fires.
    ///
    /// A pick outside `candidates` fails the whole run with `InvalidInput`.
    #[instrument(skip(self, candidates, supplier), fields(candidates = %candidates))]
    pub async fn run<P>(
        &self,
        candidates: &CandidateSet,
        supplier: &mut P,
    ) -> AssessmentResult<Elimination>
    where
        P: PickSupplier + ?Sized,
    {
        if self.config.max_rounds == 0 {
            return Err(AssessmentError::InvalidInput(
                "max_rounds must be at least 1".to_string(),
            ));
        }

        let mut tally = RoundTally::new(*candidates);
        let mut rounds = Vec::new();

        for round in 1..=self.config.max_rounds {
            let pick = supplier.next_pick(candidates, round).await?;
            tally.record(pick.category)?;

            let standings = tally.standings();
            let gap = standings[0].count - standings[1].count;
            debug!(
                round,
                pick = %pick.category,
                leader = %standings[0].category,
                leader_tally = standings[0].count,
                gap,
                "scenario round"
            );

            rounds.push(RoundRecord {
                round,
                pick: pick.category,
                standings,
                gap,
            });

            if let Some(stop_reason) = self.evaluate_stop(round, &standings) {
                debug!(round, %stop_reason, "elimination stopped");
                return Ok(Elimination {
                    stop_reason,
                    rounds,
                });
            }
        }

        // evaluate_stop returns RoundCap at max_rounds, so the loop always returns
        Err(AssessmentError::InvalidInput(format!(
            "Elimination exceeded {} rounds without stopping",
            self.config.max_rounds
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::suppliers::ScriptedPicks;

    fn candidates() -> CandidateSet {
        CandidateSet::new([Category::T8, Category::T3, Category::T7]).unwrap()
    }

    fn standings(counts: [(Category, u32); 3]) -> Standings {
        counts.map(|(category, count)| CandidateTally { category, count })
    }

    #[tokio::test]
    async fn test_strong_early_win_after_three_rounds() {
        let engine = ScenarioElimination::default();
        let mut picks = ScriptedPicks::new(vec![Category::T8; 3]);

        let elimination = engine.run(&candidates(), &mut picks).await.unwrap();

        assert_eq!(elimination.stop_reason, StopReason::StrongEarlyWin);
        assert_eq!(elimination.rounds_used(), 3);
        assert_eq!(elimination.winner(), Category::T8);
        assert!((elimination.confidence() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_early_win_with_single_lead() {
        let engine = ScenarioElimination::default();
        let mut picks = ScriptedPicks::new(vec![
            Category::T8,
            Category::T3,
            Category::T8,
            Category::T3,
            Category::T8,
        ]);

        let elimination = engine.run(&candidates(), &mut picks).await.unwrap();

        assert_eq!(elimination.stop_reason, StopReason::EarlyWin);
        assert_eq!(elimination.rounds_used(), 5);
        assert_eq!(elimination.winner(), Category::T8);
        assert!((elimination.confidence() - 0.6).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_close_race_continues_past_round_five() {
        let engine = ScenarioElimination::default();
        let mut picks = ScriptedPicks::new(vec![
            Category::T8,
            Category::T3,
            Category::T7,
            Category::T3,
            Category::T8,
            Category::T7,
            Category::T7,
        ]);

        let elimination = engine.run(&candidates(), &mut picks).await.unwrap();

        let fifth = &elimination.rounds[4];
        assert_eq!(fifth.gap, 0);
        assert_eq!(elimination.rounds_used(), 7);
        assert_eq!(elimination.winner(), Category::T7);
        assert_eq!(elimination.stop_reason, StopReason::EarlyWin);
    }

    #[tokio::test]
    async fn test_round_cap_with_raised_threshold() {
        let engine = ScenarioElimination::new(EliminationConfig {
            early_win_tally: 5,
            fallback_gap: 3,
            ..EliminationConfig::default()
        });
        let mut picks = ScriptedPicks::new(vec![
            Category::T3,
            Category::T7,
            Category::T8,
            Category::T3,
            Category::T7,
            Category::T8,
            Category::T3,
            Category::T7,
        ]);

        let elimination = engine.run(&candidates(), &mut picks).await.unwrap();

        assert_eq!(elimination.stop_reason, StopReason::RoundCap);
        assert_eq!(elimination.rounds_used(), 8);
        // T3 and T7 tie on 3; canonical order puts T3 first.
        assert_eq!(elimination.winner(), Category::T3);
        assert!((elimination.confidence() - 0.375).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_pick_outside_candidates() {
        let engine = ScenarioElimination::default();
        let mut picks = ScriptedPicks::new(vec![Category::T8, Category::T1]);

        let result = engine.run(&candidates(), &mut picks).await;
        assert!(matches!(result, Err(AssessmentError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_zero_max_rounds_rejected() {
        let engine = ScenarioElimination::new(EliminationConfig {
            max_rounds: 0,
            ..EliminationConfig::default()
        });
        let mut picks = ScriptedPicks::new(vec![Category::T8]);
        assert!(engine.run(&candidates(), &mut picks).await.is_err());
    }

    #[tokio::test]
    async fn test_huge_round_cap_does_not_preallocate() {
        let engine = ScenarioElimination::new(EliminationConfig {
            max_rounds: u32::MAX,
            ..EliminationConfig::default()
        });
        let mut picks = ScriptedPicks::new(vec![Category::T7; 3]);

        let elimination = engine.run(&candidates(), &mut picks).await.unwrap();
        assert_eq!(elimination.rounds_used(), 3);
        assert_eq!(elimination.winner(), Category::T7);
    }

    #[test]
    fn test_unsorted_standings_read_as_level() {
        let engine = ScenarioElimination::default();
        let s = standings([(Category::T8, 0), (Category::T3, 3), (Category::T7, 1)]);
        assert_eq!(engine.evaluate_stop(4, &s), None);
        assert_eq!(engine.evaluate_stop(8, &s), Some(StopReason::RoundCap));
    }

    #[test]
    fn test_stop_policy_priority() {
        let engine = ScenarioElimination::default();

        let s = standings([(Category::T8, 3), (Category::T3, 1), (Category::T7, 0)]);
        assert_eq!(engine.evaluate_stop(4, &s), Some(StopReason::StrongEarlyWin));

        let s = standings([(Category::T8, 3), (Category::T3, 2), (Category::T7, 0)]);
        assert_eq!(engine.evaluate_stop(5, &s), Some(StopReason::EarlyWin));

        let s = standings([(Category::T8, 2), (Category::T3, 2), (Category::T7, 1)]);
        assert_eq!(engine.evaluate_stop(5, &s), None);

        let s = standings([(Category::T3, 3), (Category::T7, 3), (Category::T8, 2)]);
        assert_eq!(engine.evaluate_stop(8, &s), Some(StopReason::RoundCap));
        assert_eq!(engine.evaluate_stop(7, &s), None);
    }

    #[test]
    fn test_fallback_rule() {
        let engine = ScenarioElimination::new(EliminationConfig {
            early_win_tally: 6,
            ..EliminationConfig::default()
        });

        let s = standings([(Category::T8, 3), (Category::T3, 1), (Category::T7, 0)]);
        assert_eq!(engine.evaluate_stop(4, &s), None);

        let s = standings([(Category::T8, 3), (Category::T3, 1), (Category::T7, 1)]);
        assert_eq!(engine.evaluate_stop(5, &s), Some(StopReason::FallbackWin));
    }

    #[test]
    fn test_standings_tie_break() {
        let mut tally = RoundTally::new(candidates());
        tally.record(Category::T7).unwrap();
        tally.record(Category::T8).unwrap();

        let s = tally.standings();
        assert_eq!(s[0].category, Category::T7);
        assert_eq!(s[1].category, Category::T8);
        assert_eq!(s[2].category, Category::T3);
        assert_eq!(s[2].count, 0);
    }
}
