//! Forced-choice questions, the stage-1 catalog, and answer events.

use serde::{Deserialize, Serialize};

use super::category::{Category, CATEGORY_COUNT};
use crate::domain::errors::{AssessmentError, AssessmentResult};

/// A forced choice between two categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRepr")]
pub struct Question {
    category_a: Category,
    category_b: Category,
}

impl Question {
    /// Create a question. Both sides must differ.
    pub fn new(category_a: Category, category_b: Category) -> AssessmentResult<Self> {
        if category_a == category_b {
            return Err(AssessmentError::InvalidInput(format!(
                "Question sides must differ, got {category_a} twice"
            )));
        }
        Ok(Self {
            category_a,
            category_b,
        })
    }

    /// Category behind statement `A`.
    pub const fn category_a(&self) -> Category {
        self.category_a
    }

    /// Category behind statement `B`.
    pub const fn category_b(&self) -> Category {
        self.category_b
    }

    /// The category credited when `choice` is picked.
    pub const fn chosen(&self, choice: Choice) -> Category {
        match choice {
            Choice::A => self.category_a,
            Choice::B => self.category_b,
        }
    }

    /// Whether `category` appears on either side.
    pub fn involves(&self, category: Category) -> bool {
        self.category_a == category || self.category_b == category
    }
}

#[derive(Deserialize)]
struct QuestionRepr {
    category_a: Category,
    category_b: Category,
}

impl TryFrom<QuestionRepr> for Question {
    type Error = AssessmentError;

    fn try_from(repr: QuestionRepr) -> Result<Self, Self::Error> {
        Self::new(repr.category_a, repr.category_b)
    }
}

/// Which side of a question the respondent picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// The first statement (`category_a`).
    A,
    /// The second statement (`category_b`).
    B,
}

/// One answer to one question, consumed exactly once by the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    /// Side picked.
    pub choice: Choice,
}

impl AnswerEvent {
    /// Answer with `choice`.
    pub const fn new(choice: Choice) -> Self {
        Self { choice }
    }

    /// Parse a compact answer string such as `"ABBA"`. Whitespace is ignored.
    pub fn parse_sequence(input: &str) -> AssessmentResult<Vec<Self>> {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'A' => Ok(Self::new(Choice::A)),
                'B' => Ok(Self::new(Choice::B)),
                other => Err(AssessmentError::InvalidInput(format!(
                    "Answer must be A or B, got '{other}'"
                ))),
            })
            .collect()
    }
}

impl From<bool> for AnswerEvent {
    /// `true` means the respondent chose `category_a`.
    fn from(chose_a: bool) -> Self {
        Self::new(if chose_a { Choice::A } else { Choice::B })
    }
}

/// Fixed, ordered catalog of stage-1 questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Catalog over `questions` in the given order.
    pub const fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The standard 36-question catalog: every unordered pair `(Ti, Tj)` with
    /// `i < j`, in lexicographic order. Each category appears exactly 8 times.
    pub fn standard() -> Self {
        let mut questions = Vec::with_capacity(CATEGORY_COUNT * (CATEGORY_COUNT - 1) / 2);
        for (i, &a) in Category::ALL.iter().enumerate() {
            for &b in &Category::ALL[i + 1..] {
                questions.push(Question {
                    category_a: a,
                    category_b: b,
                });
            }
        }
        Self { questions }
    }

    /// Questions in catalog order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Distinct categories appearing on either side of any question, in
    /// canonical order.
    pub fn represented(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.questions.iter().any(|q| q.involves(c)))
            .collect()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
