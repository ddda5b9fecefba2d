//! The nine personality type categories.
//!
//! Categories are fixed at compile time. Their declaration order `T1..T9` is
//! the canonical ordering used for every deterministic tie-break in the
//! engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::AssessmentError;

/// Number of categories in the model.
pub const CATEGORY_COUNT: usize = 9;

/// One of the nine fixed personality type identifiers.
///
/// `Ord` follows canonical order, so `T1 < T2 < ... < T9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Type 1.
    T1,
    /// Type 2.
    T2,
    /// Type 3.
    T3,
    /// Type 4.
    T4,
    /// Type 5.
    T5,
    /// Type 6.
    T6,
    /// Type 7.
    T7,
    /// Type 8.
    T8,
    /// Type 9.
    T9,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::T1,
        Self::T2,
        Self::T3,
        Self::T4,
        Self::T5,
        Self::T6,
        Self::T7,
        Self::T8,
        Self::T9,
    ];

    /// Zero-based position in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category at a zero-based canonical position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// One-based type number, as shown to respondents.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::T1 => "Reformer",
            Self::T2 => "Helper",
            Self::T3 => "Achiever",
            Self::T4 => "Individualist",
            Self::T5 => "Investigator",
            Self::T6 => "Loyalist",
            Self::T7 => "Enthusiast",
            Self::T8 => "Challenger",
            Self::T9 => "Peacemaker",
        }
    }

    /// First-person statement used when rendering a forced-choice question.
    pub const fn statement(self) -> &'static str {
        match self {
            Self::T1 => "I hold myself to high standards and want things done right.",
            Self::T2 => "I notice what others need and like being there for them.",
            Self::T3 => "I set goals and push hard to reach them.",
            Self::T4 => "I look for meaning and want to be true to who I am.",
            Self::T5 => "I need time alone to think things through before acting.",
            Self::T6 => "I prepare for what could go wrong and value people I can trust.",
            Self::T7 => "I keep my options open and chase new experiences.",
            Self::T8 => "I take charge and say what I think, even when it is uncomfortable.",
            Self::T9 => "I keep the peace and go along to avoid conflict.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.number())
    }
}

impl FromStr for Category {
    type Err = AssessmentError;

    /// Accepts `T4`, `t4`, `4` and `type4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered
            .strip_prefix("type")
            .or_else(|| lowered.strip_prefix('t'))
            .unwrap_or(&lowered)
            .trim();

        digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)
            .ok_or_else(|| AssessmentError::InvalidInput(format!("Unknown category: {s}")))
    }
}
