//! `simulate` command: Monte Carlo batch over a preference pattern.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::progress::create_progress_bar;
use crate::cli::output::table::format_report;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SimulateArgs;
use crate::domain::models::{Category, PreferencePattern, SimulationConfig};
use crate::services::{ConvergenceOrchestrator, SimulationReport, Simulator};

/// Simulation report with the pattern that produced it
#[derive(Debug, Serialize)]
pub struct SimulateOutput {
    /// Respondent preference pattern
    pub pattern: PreferencePattern,
    /// Aggregated batch statistics
    pub report: SimulationReport,
}

impl CommandOutput for SimulateOutput {
    fn to_human(&self) -> String {
        let subject = match self.report.dominant {
            Some(category) => format!("dominant {category} {}", category.name()),
            None => "uniform preferences".to_string(),
        };
        format!(
            "Simulated {} assessments ({subject}, seed {})\n{}",
            self.report.runs,
            self.report.seed,
            format_report(&self.report)
        )
    }
}

/// Apply command-line overrides on top of the configured simulation settings.
fn resolve_config(base: &SimulationConfig, args: &SimulateArgs) -> SimulationConfig {
    SimulationConfig {
        runs: args.runs.unwrap_or(base.runs),
        seed: args.seed.unwrap_or(base.seed),
        dominant_strength: args.strength.unwrap_or(base.dominant_strength),
        ..*base
    }
}

fn build_pattern(args: &SimulateArgs, strength: f64) -> Result<PreferencePattern> {
    match args.dominant.as_deref() {
        Some(raw) => {
            let category: Category = raw.parse().context("Invalid --dominant category")?;
            PreferencePattern::dominant(category, strength).context("Invalid --strength")
        }
        None => Ok(PreferencePattern::uniform()),
    }
}

/// Handle simulate command
pub async fn execute(
    orchestrator: Arc<ConvergenceOrchestrator>,
    base: &SimulationConfig,
    args: SimulateArgs,
    json: bool,
) -> Result<()> {
    let config = resolve_config(base, &args);
    let pattern = build_pattern(&args, config.dominant_strength)?;
    let progress = create_progress_bar(u64::from(config.runs), json);

    let simulator = Simulator::new(orchestrator, config);
    let report = simulator
        .run_with_progress(&pattern, || progress.inc(1))
        .await
        .context("Simulation failed")?;
    progress.finish_and_clear();

    output(&SimulateOutput { pattern, report }, json);
    Ok(())
}
