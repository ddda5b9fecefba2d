//! Per-category vote counts.

use serde::{Deserialize, Serialize};

use super::category::{Category, CATEGORY_COUNT};

/// Vote count for every category. Counts only grow within a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryScore {
    counts: [u32; CATEGORY_COUNT],
}

impl CategoryScore {
    /// All counts zero.
    pub const fn new() -> Self {
        Self {
            counts: [0; CATEGORY_COUNT],
        }
    }

    /// Build a score from explicit counts in canonical order.
    pub const fn from_counts(counts: [u32; CATEGORY_COUNT]) -> Self {
        Self { counts }
    }

    /// Add one vote for `category`.
    pub fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Votes for `category`.
    pub const fn get(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Zero every count.
    pub fn reset(&mut self) {
        self.counts = [0; CATEGORY_COUNT];
    }

    /// `(category, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}
