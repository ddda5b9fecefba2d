//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

/// Top-level command line
#[derive(Parser)]
#[command(name = "inner-dna")]
#[command(about = "Inner DNA - two-stage personality type assessment", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .inner-dna/config.yaml)
    #[arg(short, long, global = true, env = "INNER_DNA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the forced-choice question catalog
    Catalog,

    /// Run an assessment and store the result
    Assess(AssessArgs),

    /// Run a Monte Carlo simulation of the engine
    Simulate(SimulateArgs),

    /// Inspect stored assessment results
    #[command(subcommand)]
    Results(ResultsCommands),
}

/// Arguments for `assess`
#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Who is being assessed
    #[arg(short, long, default_value = "anonymous")]
    pub subject: String,

    /// All stage-1 answers as a string of A/B, one per question (prompted if omitted)
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Comma-separated scenario picks, e.g. T8,T3,T8 (prompted if omitted)
    #[arg(short, long)]
    pub picks: Option<String>,
}

/// Arguments for `simulate`
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of simulated assessments
    #[arg(short, long)]
    pub runs: Option<u32>,

    /// Base RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Category the simulated respondents lean toward (uniform if omitted)
    #[arg(short, long)]
    pub dominant: Option<String>,

    /// Weight of the dominant category relative to the others
    #[arg(long)]
    pub strength: Option<f64>,
}

/// Subcommands of `results`
#[derive(Subcommand)]
pub enum ResultsCommands {
    /// List stored assessments, most recent first
    List {
        /// Only show assessments for this subject
        #[arg(short, long)]
        subject: Option<String>,
    },

    /// Show one assessment in detail
    Show {
        /// Assessment ID
        id: Uuid,
    },
}
