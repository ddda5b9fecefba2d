//! `results` command: browse stored assessments.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::output::table::format_records;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::ResultsCommands;
use crate::domain::models::AssessmentRecord;
use crate::domain::ports::AssessmentRepository;
use crate::services::AssessmentService;

use super::assess::AssessOutput;

/// Stored assessments, newest first
#[derive(Debug, Serialize)]
pub struct ResultListOutput {
    /// Matching records
    pub records: Vec<AssessmentRecord>,
    /// Number of records shown
    pub total: usize,
}

impl CommandOutput for ResultListOutput {
    fn to_human(&self) -> String {
        if self.records.is_empty() {
            return "No stored assessments.".to_string();
        }
        format!(
            "{}\n\nShowing {} assessment(s)",
            format_records(&self.records),
            self.total
        )
    }
}

/// Handle results list/show commands
pub async fn execute<R: AssessmentRepository>(
    service: &AssessmentService<R>,
    command: ResultsCommands,
    low_confidence_threshold: f64,
    json: bool,
) -> Result<()> {
    match command {
        ResultsCommands::List { subject } => list(service, subject.as_deref(), json).await,
        ResultsCommands::Show { id } => show(service, id, low_confidence_threshold, json).await,
    }
}

async fn list<R: AssessmentRepository>(
    service: &AssessmentService<R>,
    subject: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut records = service
        .list(subject)
        .await
        .context("Failed to list assessments")?;
    records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let total = records.len();
    output(&ResultListOutput { records, total }, json);
    Ok(())
}

async fn show<R: AssessmentRepository>(
    service: &AssessmentService<R>,
    id: Uuid,
    low_confidence_threshold: f64,
    json: bool,
) -> Result<()> {
    let record = service
        .get(id)
        .await
        .with_context(|| format!("Failed to load assessment {id}"))?;
    output(&AssessOutput::new(record, low_confidence_threshold), json);
    Ok(())
}
