//! Inner DNA - two-stage personality type convergence engine
//!
//! Inner DNA narrows a respondent from nine personality types to one. Stage 1
//! tallies 36 forced-choice questions and shortlists the three strongest
//! types; stage 2 runs scenario rounds among those three until a stopping
//! rule fires.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Categories, questions, results, and port traits
//! - **Service Layer** (`services`): Tally, selection, elimination, and orchestration
//! - **Infrastructure Layer** (`infrastructure`): Config, logging, and storage adapters
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use inner_dna::services::{ConvergenceOrchestrator, ScriptedAnswers, ScriptedPicks};
//! use inner_dna::domain::models::{AnswerEvent, Category, Choice, EliminationConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = ConvergenceOrchestrator::standard(EliminationConfig::default());
//!     let mut answers = ScriptedAnswers::new(vec![AnswerEvent::new(Choice::A); 36]);
//!     let mut picks = ScriptedPicks::new([Category::T1; 3]);
//!     let result = orchestrator.run(&mut answers, &mut picks).await?;
//!     println!("{} ({:.0}%)", result.winner(), result.confidence() * 100.0);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
/// Engine services: stage 1, stage 2, orchestration, simulation
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AnswerEvent, CandidateSet, Category, CategoryScore, Choice, Config, ConvergenceResult,
    EliminationConfig, Question, QuestionCatalog, ScenarioPick, StopReason,
};
pub use domain::ports::{AnswerSupplier, AssessmentRepository, PickSupplier};
pub use domain::{AssessmentError, AssessmentResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ConvergenceOrchestrator, ScenarioElimination, Simulator, TopKSelector};
