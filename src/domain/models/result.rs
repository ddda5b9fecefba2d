//! Terminal artifacts of an assessment run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::{CandidateSet, CANDIDATE_COUNT};
use super::category::Category;
use super::score::CategoryScore;
use crate::domain::errors::AssessmentError;

/// A candidate and its elimination-round tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    /// Candidate category.
    pub category: Category,
    /// Picks received so far.
    pub count: u32,
}

/// Candidate tallies ordered by count descending, canonical order on ties.
pub type Standings = [CandidateTally; CANDIDATE_COUNT];

/// Why the elimination round stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Leader reached the early-win tally with at least the strong gap.
    StrongEarlyWin,
    /// Leader reached the early-win tally with any lead.
    EarlyWin,
    /// Minimum rounds elapsed and the leader holds the fallback gap.
    FallbackWin,
    /// Hard round cap reached.
    RoundCap,
}

impl StopReason {
    /// Every reason except the round cap.
    pub const fn is_early_stop(self) -> bool {
        !matches!(self, Self::RoundCap)
    }

    /// Snake-case name, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongEarlyWin => "strong_early_win",
            Self::EarlyWin => "early_win",
            Self::FallbackWin => "fallback_win",
            Self::RoundCap => "round_cap",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot after one elimination round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// One-based round number.
    pub round: u32,
    /// Candidate picked this round.
    pub pick: Category,
    /// Standings after the pick was counted.
    pub standings: Standings,
    /// `standings[0].count - standings[1].count`.
    pub gap: u32,
}

impl RoundRecord {
    /// Top of the standings.
    pub const fn leader(&self) -> CandidateTally {
        self.standings[0]
    }
}

/// How much a result can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceOutcome {
    /// Stopped before the round cap.
    Decisive,
    /// Stopped at the round cap; the leader wins but may hold a thin margin.
    Capped,
}

/// Final output of one assessment. Built once by the engine, never mutated.
///
/// Only the inputs are read back on deserialize; winner, confidence and the
/// other derived fields are recomputed from the round trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConvergenceResultRepr")]
pub struct ConvergenceResult {
    winner: Category,
    confidence: f64,
    rounds_used: u32,
    is_early_stop: bool,
    stop_reason: StopReason,
    standings: Standings,
    candidates: CandidateSet,
    stage_one: CategoryScore,
    rounds: Vec<RoundRecord>,
}

impl ConvergenceResult {
    /// Assemble a result from the final standings. Confidence is derived as
    /// `winner tally / rounds used`.
    pub(crate) fn new(
        stage_one: CategoryScore,
        candidates: CandidateSet,
        stop_reason: StopReason,
        rounds: Vec<RoundRecord>,
    ) -> Option<Self> {
        let last = rounds.last()?;
        let standings = last.standings;
        let rounds_used = last.round;
        let winner = standings[0];

        Some(Self {
            winner: winner.category,
            confidence: f64::from(winner.count) / f64::from(rounds_used),
            rounds_used,
            is_early_stop: stop_reason.is_early_stop(),
            stop_reason,
            standings,
            candidates,
            stage_one,
            rounds,
        })
    }

    /// Leader of the final standings.
    pub const fn winner(&self) -> Category {
        self.winner
    }

    /// Winner's share of rounds used, in `(0, 1]`.
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Elimination rounds played.
    pub const fn rounds_used(&self) -> u32 {
        self.rounds_used
    }

    /// Whether any rule other than the round cap stopped the run.
    pub const fn is_early_stop(&self) -> bool {
        self.is_early_stop
    }

    /// Rule that stopped the elimination.
    pub const fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Final candidate standings.
    pub const fn standings(&self) -> &Standings {
        &self.standings
    }

    /// Picks received by the winner.
    pub const fn winner_tally(&self) -> u32 {
        self.standings[0].count
    }

    /// The three stage-1 candidates.
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Stage-1 forced-choice score the candidates were drawn from.
    pub const fn stage_one(&self) -> &CategoryScore {
        &self.stage_one
    }

    /// Per-round trace of the elimination.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Decisive or capped, from the stop reason.
    pub const fn outcome(&self) -> ConvergenceOutcome {
        if self.is_early_stop {
            ConvergenceOutcome::Decisive
        } else {
            ConvergenceOutcome::Capped
        }
    }

    /// Capped results below `threshold` confidence should be treated as
    /// lower-trust output. Decisive results never are.
    pub fn is_low_trust(&self, threshold: f64) -> bool {
        self.outcome() == ConvergenceOutcome::Capped && self.confidence < threshold
    }
}

#[derive(Deserialize)]
struct ConvergenceResultRepr {
    stage_one: CategoryScore,
    candidates: CandidateSet,
    stop_reason: StopReason,
    rounds: Vec<RoundRecord>,
}

impl TryFrom<ConvergenceResultRepr> for ConvergenceResult {
    type Error = AssessmentError;

    fn try_from(repr: ConvergenceResultRepr) -> Result<Self, Self::Error> {
        for (expected, record) in (1..).zip(&repr.rounds) {
            if record.round != expected {
                return Err(AssessmentError::InvalidInput(format!(
                    "Round {} recorded where round {expected} was expected",
                    record.round
                )));
            }
            let foreign = std::iter::once(record.pick)
                .chain(record.standings.iter().map(|t| t.category))
                .find(|&c| !repr.candidates.contains(c));
            if let Some(category) = foreign {
                return Err(AssessmentError::InvalidInput(format!(
                    "Round {expected} mentions {category}, which is not in {}",
                    repr.candidates
                )));
            }
        }

        Self::new(repr.stage_one, repr.candidates, repr.stop_reason, repr.rounds).ok_or_else(
            || AssessmentError::InvalidInput("Result must record at least one round".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(category: Category, count: u32) -> CandidateTally {
        CandidateTally { category, count }
    }

    fn candidates() -> CandidateSet {
        CandidateSet::new([Category::T8, Category::T3, Category::T7]).unwrap()
    }

    #[test]
    fn test_new_requires_rounds() {
        let result = ConvergenceResult::new(
            CategoryScore::new(),
            candidates(),
            StopReason::RoundCap,
            vec![],
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_confidence_from_last_round() {
        let round = RoundRecord {
            round: 8,
            pick: Category::T3,
            standings: [
                tally(Category::T3, 3),
                tally(Category::T7, 3),
                tally(Category::T8, 2),
            ],
            gap: 0,
        };
        let result = ConvergenceResult::new(
            CategoryScore::new(),
            candidates(),
            StopReason::RoundCap,
            vec![round],
        )
        .unwrap();

        assert_eq!(result.winner(), Category::T3);
        assert_eq!(result.rounds_used(), 8);
        assert!((result.confidence() - 0.375).abs() < f64::EPSILON);
        assert!(!result.is_early_stop());
        assert_eq!(result.outcome(), ConvergenceOutcome::Capped);
        assert!(result.is_low_trust(0.5));
        assert!(!result.is_low_trust(0.3));
    }

    #[test]
    fn test_decisive_is_never_low_trust() {
        let round = RoundRecord {
            round: 3,
            pick: Category::T8,
            standings: [
                tally(Category::T8, 3),
                tally(Category::T3, 0),
                tally(Category::T7, 0),
            ],
            gap: 3,
        };
        let result = ConvergenceResult::new(
            CategoryScore::new(),
            candidates(),
            StopReason::StrongEarlyWin,
            vec![round],
        )
        .unwrap();

        assert_eq!(result.outcome(), ConvergenceOutcome::Decisive);
        assert!(!result.is_low_trust(1.1));
        assert_eq!(result.stop_reason().to_string(), "strong_early_win");
    }

    #[test]
    fn test_deserialize_recomputes_and_validates() {
        let round = RoundRecord {
            round: 1,
            pick: Category::T7,
            standings: [
                tally(Category::T7, 1),
                tally(Category::T3, 0),
                tally(Category::T8, 0),
            ],
            gap: 1,
        };
        let result = ConvergenceResult::new(
            CategoryScore::new(),
            candidates(),
            StopReason::FallbackWin,
            vec![round],
        )
        .unwrap();

        let mut json = serde_json::to_value(&result).unwrap();
        json["winner"] = serde_json::json!("T1");
        json["confidence"] = serde_json::json!(0.01);
        let restored: ConvergenceResult = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, result);

        let mut empty = json.clone();
        empty["rounds"] = serde_json::json!([]);
        let err = serde_json::from_value::<ConvergenceResult>(empty).unwrap_err();
        assert!(err.to_string().contains("at least one round"));

        let mut foreign = json.clone();
        foreign["rounds"][0]["pick"] = serde_json::json!("T1");
        assert!(serde_json::from_value::<ConvergenceResult>(foreign).is_err());

        let mut skipped = json;
        skipped["rounds"][0]["round"] = serde_json::json!(2);
        assert!(serde_json::from_value::<ConvergenceResult>(skipped).is_err());
    }
}
