//! `assess` command: run one interactive or scripted assessment.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::cli::output::table::{format_rounds, format_stage_one};
use crate::cli::output::{output, percent, CommandOutput};
use crate::cli::prompt::{ConsoleAnswerSupplier, ConsoleInput, ConsolePickSupplier};
use crate::cli::types::AssessArgs;
use crate::domain::models::{AnswerEvent, AssessmentRecord, Category, ConvergenceOutcome};
use crate::domain::ports::{AnswerSupplier, AssessmentRepository, PickSupplier};
use crate::services::{AssessmentService, ScriptedAnswers, ScriptedPicks};

/// Stored assessment plus its trust flag
#[derive(Debug, Serialize)]
pub struct AssessOutput {
    /// Persisted record
    pub record: AssessmentRecord,
    /// Capped result below the confidence threshold
    pub low_trust: bool,
}

impl AssessOutput {
    /// Flag the record against `low_confidence_threshold`
    pub fn new(record: AssessmentRecord, low_confidence_threshold: f64) -> Self {
        let low_trust = record.result.is_low_trust(low_confidence_threshold);
        Self { record, low_trust }
    }
}

impl CommandOutput for AssessOutput {
    fn to_human(&self) -> String {
        let result = &self.record.result;
        let winner = result.winner();
        let outcome = match result.outcome() {
            ConvergenceOutcome::Decisive => style("decisive").green().to_string(),
            ConvergenceOutcome::Capped => style("capped at round limit").yellow().to_string(),
        };

        let mut lines = vec![
            format!("Assessment {}", self.record.id),
            format!("Subject:     {}", self.record.subject),
            format!(
                "Result:      {} {}",
                style(winner).bold(),
                style(winner.name()).bold()
            ),
            format!(
                "Confidence:  {} ({} of {} rounds)",
                percent(result.confidence()),
                result.winner_tally(),
                result.rounds_used()
            ),
            format!("Outcome:     {outcome} ({})", result.stop_reason()),
        ];
        if self.low_trust {
            lines.push(
                style("Low confidence: treat this result as provisional.")
                    .yellow()
                    .to_string(),
            );
        }
        lines.push(format!("\nStage 1\n{}", format_stage_one(result)));
        lines.push(format!("\nStage 2\n{}", format_rounds(result)));
        lines.join("\n")
    }
}

fn parse_picks(input: &str) -> Result<Vec<Category>> {
    input
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Category>().map_err(anyhow::Error::from))
        .collect()
}

/// Handle assess command
pub async fn execute<R: AssessmentRepository>(
    service: &AssessmentService<R>,
    args: AssessArgs,
    low_confidence_threshold: f64,
    json: bool,
) -> Result<()> {
    let input = ConsoleInput::new();
    let total = service.orchestrator().catalog().len();

    let mut answers: Box<dyn AnswerSupplier> = match args.answers.as_deref() {
        Some(raw) => Box::new(ScriptedAnswers::new(
            AnswerEvent::parse_sequence(raw).context("Failed to parse --answers")?,
        )),
        None => Box::new(ConsoleAnswerSupplier::new(input.clone(), total)),
    };
    let mut picks: Box<dyn PickSupplier> = match args.picks.as_deref() {
        Some(raw) => Box::new(ScriptedPicks::new(
            parse_picks(raw).context("Failed to parse --picks")?,
        )),
        None => Box::new(ConsolePickSupplier::new(input)),
    };

    let record = service
        .assess(&args.subject, answers.as_mut(), picks.as_mut())
        .await
        .context("Assessment failed")?;

    output(&AssessOutput::new(record, low_confidence_threshold), json);
    Ok(())
}
