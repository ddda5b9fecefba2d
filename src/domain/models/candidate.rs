//! Stage-2 inputs: the candidate set and scenario picks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::domain::errors::{AssessmentError, AssessmentResult};

/// Number of categories that advance from stage 1 to stage 2.
pub const CANDIDATE_COUNT: usize = 3;

/// The top categories from stage 1, in rank order. Members are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CandidateSet {
    members: [Category; CANDIDATE_COUNT],
}

impl CandidateSet {
    /// Reject duplicate members.
    pub fn new(members: [Category; CANDIDATE_COUNT]) -> AssessmentResult<Self> {
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(AssessmentError::InvalidInput(format!(
                    "Candidate set contains {member} more than once"
                )));
            }
        }
        Ok(Self { members })
    }

    /// Members in stage-1 rank order.
    pub const fn members(&self) -> &[Category; CANDIDATE_COUNT] {
        &self.members
    }

    /// Whether `category` is one of the three.
    pub fn contains(&self, category: Category) -> bool {
        self.members.contains(&category)
    }

    /// Slot of `category` within the set, if it is a member.
    pub fn position(&self, category: Category) -> Option<usize> {
        self.members.iter().position(|&m| m == category)
    }

    /// Stage-1 leader.
    pub const fn leader(&self) -> Category {
        self.members[0]
    }
}

impl TryFrom<Vec<Category>> for CandidateSet {
    type Error = AssessmentError;

    fn try_from(value: Vec<Category>) -> Result<Self, Self::Error> {
        let members: [Category; CANDIDATE_COUNT] = value.try_into().map_err(|v: Vec<_>| {
            AssessmentError::InvalidInput(format!(
                "Candidate set needs exactly {CANDIDATE_COUNT} members, got {}",
                v.len()
            ))
        })?;
        Self::new(members)
    }
}

impl From<CandidateSet> for Vec<Category> {
    fn from(value: CandidateSet) -> Self {
        value.members.to_vec()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.members;
        write!(f, "[{a}, {b}, {c}]")
    }
}

/// One elimination-round vote for a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioPick {
    /// Candidate picked.
    pub category: Category,
}

impl ScenarioPick {
    /// Pick for `category`.
    pub const fn new(category: Category) -> Self {
        Self { category }
    }
}

impl From<Category> for ScenarioPick {
    fn from(category: Category) -> Self {
        Self::new(category)
    }
}
