//! Inner DNA CLI entry point.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use inner_dna::cli::{commands, handle_error, Cli, Commands};
use inner_dna::infrastructure::config::ConfigLoader;
use inner_dna::infrastructure::logging::{LogConfig, LoggerImpl};
use inner_dna::infrastructure::storage::JsonFileAssessmentRepository;
use inner_dna::services::{AssessmentService, ConvergenceOrchestrator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::try_from(&config.logging)?)?;

    let orchestrator = Arc::new(ConvergenceOrchestrator::standard(config.elimination));
    let threshold = config.elimination.low_confidence_threshold;

    match cli.command {
        Commands::Catalog => commands::catalog::execute(orchestrator.catalog(), cli.json),
        Commands::Assess(args) => {
            let service = AssessmentService::new(
                orchestrator,
                Arc::new(JsonFileAssessmentRepository::new(&config.storage.results_dir)),
            );
            commands::assess::execute(&service, args, threshold, cli.json).await
        }
        Commands::Simulate(args) => {
            commands::simulate::execute(orchestrator, &config.simulation, args, cli.json).await
        }
        Commands::Results(command) => {
            let service = AssessmentService::new(
                orchestrator,
                Arc::new(JsonFileAssessmentRepository::new(&config.storage.results_dir)),
            );
            commands::results::execute(&service, command, threshold, cli.json).await
        }
    }
}
