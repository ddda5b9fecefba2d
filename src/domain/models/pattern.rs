//! Preference patterns that drive simulated respondents.

use serde::{Deserialize, Deserializer, Serialize};

use super::category::{Category, CATEGORY_COUNT};
use crate::domain::errors::{AssessmentError, AssessmentResult};

/// Relative weight per category for a simulated respondent.
///
/// Weights are non-negative and need not sum to 1. A stage-1 question
/// `(a, b)` is answered `A` with probability `w_a / (w_a + w_b)`; a stage-2
/// pick lands on each candidate in proportion to its weight.
///
/// A pattern built with [`dominant`](Self::dominant) remembers the category
/// it was built around, whatever its strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreferencePattern {
    weights: [f64; CATEGORY_COUNT],
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Category>,
}

impl PreferencePattern {
    /// Weights in canonical order. Negative or non-finite weights are rejected.
    pub fn from_weights(weights: [f64; CATEGORY_COUNT]) -> AssessmentResult<Self> {
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(AssessmentError::InvalidInput(format!(
                "Weight for {} must be a finite non-negative number, got {w}",
                Category::ALL[i]
            )));
        }
        Ok(Self {
            weights,
            target: None,
        })
    }

    /// Every category equally likely.
    pub const fn uniform() -> Self {
        Self {
            weights: [1.0; CATEGORY_COUNT],
            target: None,
        }
    }

    /// `category` weighted `strength`, all others 1.0.
    ///
    /// `category` stays the pattern's target even when `strength <= 1.0`.
    pub fn dominant(category: Category, strength: f64) -> AssessmentResult<Self> {
        let mut weights = [1.0; CATEGORY_COUNT];
        weights[category.index()] = strength;
        Ok(Self {
            target: Some(category),
            ..Self::from_weights(weights)?
        })
    }

    /// Relative weight of `category`.
    pub const fn weight(&self, category: Category) -> f64 {
        self.weights[category.index()]
    }

    /// The category simulated respondents are meant to land on.
    ///
    /// For [`dominant`](Self::dominant) patterns this is the chosen category.
    /// Otherwise it is the strictly heaviest category, canonical order on
    /// ties among the heaviest, and `None` when every weight is equal.
    pub fn dominant_category(&self) -> Option<Category> {
        if self.target.is_some() {
            return self.target;
        }
        let max = self.weights.iter().copied().fold(f64::MIN, f64::max);
        let min = self.weights.iter().copied().fold(f64::MAX, f64::min);
        if (max - min).abs() < f64::EPSILON {
            return None;
        }
        Category::ALL
            .into_iter()
            .find(|c| (self.weight(*c) - max).abs() < f64::EPSILON)
    }
}

impl Default for PreferencePattern {
    fn default() -> Self {
        Self::uniform()
    }
}

impl<'de> Deserialize<'de> for PreferencePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            weights: [f64; CATEGORY_COUNT],
            #[serde(default)]
            target: Option<Category>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let pattern = Self::from_weights(raw.weights)
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            target: raw.target,
            ..pattern
        })
    }
}
