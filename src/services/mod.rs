//! Application services for the type convergence engine.

/// Run, persist and look up assessments
pub mod assessment_service;
pub mod convergence_orchestrator;
/// Stage 1 scoring
pub mod forced_choice_tally;
pub mod scenario_elimination;
pub mod simulator;
pub mod suppliers;
/// Stage 1 candidate selection
pub mod top_k_selector;

pub use assessment_service::AssessmentService;
pub use convergence_orchestrator::ConvergenceOrchestrator;
pub use forced_choice_tally::ForcedChoiceTally;
pub use scenario_elimination::{Elimination, ScenarioElimination};
pub use simulator::{SimulationReport, Simulator};
pub use suppliers::{ScriptedAnswers, ScriptedPicks, WeightedAnswerSupplier, WeightedPickSupplier};
pub use top_k_selector::TopKSelector;
