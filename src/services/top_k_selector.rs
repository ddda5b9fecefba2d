use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{CandidateSet, Category, CategoryScore, QuestionCatalog, CANDIDATE_COUNT};

/// Picks the categories that advance to the elimination round.
///
/// Ranking is by count descending; ties go to the category earlier in
/// canonical order, so identical scores always produce identical sets.
#[derive(Debug, Clone)]
pub struct TopKSelector {
    catalog: Arc<QuestionCatalog>,
}

impl TopKSelector {
    /// Selector over categories represented in `catalog`.
    pub const fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Full ranking of the categories the catalog represents.
    pub fn rank(&self, score: &CategoryScore) -> AssessmentResult<Vec<(Category, u32)>> {
        let represented = self.catalog.represented();
        if represented.len() < CANDIDATE_COUNT {
            return Err(AssessmentError::InsufficientCategories {
                found: represented.len(),
                required: CANDIDATE_COUNT,
            });
        }

        let mut ranked: Vec<(Category, u32)> =
            represented.into_iter().map(|c| (c, score.get(c))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(ranked)
    }

    /// The top three categories.
    pub fn select(&self, score: &CategoryScore) -> AssessmentResult<CandidateSet> {
        let ranked = self.rank(score)?;
        let candidates = CandidateSet::new([ranked[0].0, ranked[1].0, ranked[2].0])?;

        debug!(
            %candidates,
            first = ranked[0].1,
            second = ranked[1].1,
            third = ranked[2].1,
            "candidates selected"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Question;

    fn selector() -> TopKSelector {
        TopKSelector::new(Arc::new(QuestionCatalog::standard()))
    }

    #[test]
    fn test_selects_highest_counts() {
        let score = CategoryScore::from_counts([1, 2, 7, 3, 0, 4, 6, 8, 5]);
        let set = selector().select(&score).unwrap();
        assert_eq!(
            set.members(),
            &[Category::T8, Category::T3, Category::T7]
        );
    }

    #[test]
    fn test_ties_use_canonical_order() {
        let score = CategoryScore::from_counts([4, 4, 4, 4, 4, 4, 4, 4, 4]);
        let set = selector().select(&score).unwrap();
        assert_eq!(set.members(), &[Category::T1, Category::T2, Category::T3]);

        let score = CategoryScore::from_counts([0, 0, 0, 0, 5, 3, 0, 3, 3]);
        let set = selector().select(&score).unwrap();
        assert_eq!(set.members(), &[Category::T5, Category::T6, Category::T8]);
    }

    #[test]
    fn test_all_zero_scores_still_select() {
        let set = selector().select(&CategoryScore::new()).unwrap();
        assert_eq!(set.members(), &[Category::T1, Category::T2, Category::T3]);
    }

    #[test]
    fn test_rank_is_descending() {
        let score = CategoryScore::from_counts([3, 1, 4, 1, 5, 9, 2, 6, 5]);
        let ranked = selector().rank(&score).unwrap();
        assert_eq!(ranked.len(), 9);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(ranked[0], (Category::T6, 9));
        // T5 and T9 tie on 5; T5 comes first.
        assert_eq!(ranked[2], (Category::T5, 5));
        assert_eq!(ranked[3], (Category::T9, 5));
    }

    #[test]
    fn test_insufficient_categories() {
        let catalog = QuestionCatalog::new(vec![
            Question::new(Category::T1, Category::T2).unwrap(),
            Question::new(Category::T2, Category::T1).unwrap(),
        ]);
        let selector = TopKSelector::new(Arc::new(catalog));
        let result = selector.select(&CategoryScore::new());
        assert!(matches!(
            result,
            Err(AssessmentError::InsufficientCategories {
                found: 2,
                required: 3
            })
        ));
    }

    #[test]
    fn test_unrepresented_categories_never_selected() {
        let catalog = QuestionCatalog::new(vec![
            Question::new(Category::T4, Category::T6).unwrap(),
            Question::new(Category::T6, Category::T9).unwrap(),
        ]);
        let selector = TopKSelector::new(Arc::new(catalog));
        let set = selector.select(&CategoryScore::new()).unwrap();
        assert_eq!(set.members(), &[Category::T4, Category::T6, Category::T9]);
    }
}
