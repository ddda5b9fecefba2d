//! Domain models for the type convergence engine.

pub mod assessment;
pub mod candidate;
pub mod category;
pub mod config;
pub mod pattern;
pub mod question;
pub mod result;
pub mod score;

pub use assessment::AssessmentRecord;
pub use candidate::{CandidateSet, ScenarioPick, CANDIDATE_COUNT};
pub use category::{Category, CATEGORY_COUNT};
pub use config::{Config, EliminationConfig, LoggingConfig, SimulationConfig, StorageConfig};
pub use pattern::PreferencePattern;
pub use question::{AnswerEvent, Choice, Question, QuestionCatalog};
pub use result::{
    CandidateTally, ConvergenceOutcome, ConvergenceResult, RoundRecord, Standings, StopReason,
};
pub use score::CategoryScore;
