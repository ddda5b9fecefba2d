//! Monte Carlo validation of the convergence engine.
//!
//! Each simulated run is an independent assessment driven by weighted random
//! suppliers seeded with `seed + run_index`. Runs execute concurrently but
//! results are aggregated in run order, so a given seed always yields the
//! same report.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{Category, ConvergenceResult, PreferencePattern, SimulationConfig};
use crate::services::convergence_orchestrator::ConvergenceOrchestrator;
use crate::services::suppliers::{WeightedAnswerSupplier, WeightedPickSupplier};

/// Aggregate statistics over a batch of simulated assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Runs simulated.
    pub runs: u32,
    /// Base seed; run `i` used `seed + i`.
    pub seed: u64,
    /// Category the pattern was built around, if any.
    pub dominant: Option<Category>,
    /// Share of runs whose winner is the dominant category.
    pub accuracy: Option<f64>,
    /// Share of runs whose candidate set contains the dominant category.
    pub candidate_hit_rate: Option<f64>,
    /// Share of runs stopped before the round cap.
    pub early_stop_rate: f64,
    /// Runs that hit the round cap.
    pub capped_runs: u32,
    /// Mean rounds used.
    pub mean_rounds: f64,
    /// Mean winner confidence.
    pub mean_confidence: f64,
    /// Lowest winner confidence.
    pub min_confidence: f64,
    /// Rounds used -> number of runs.
    pub rounds_histogram: BTreeMap<u32, u32>,
    /// Winner -> number of runs.
    pub winner_counts: BTreeMap<Category, u32>,
}

impl SimulationReport {
    fn from_results(
        seed: u64,
        dominant: Option<Category>,
        results: &[ConvergenceResult],
    ) -> Self {
        let runs = results.len() as u32;
        let n = f64::from(runs);

        let mut rounds_histogram = BTreeMap::new();
        let mut winner_counts = BTreeMap::new();
        let mut early_stops = 0u32;
        let mut total_rounds = 0u64;
        let mut confidence_sum = 0.0;
        let mut min_confidence = f64::MAX;
        let mut correct = 0u32;
        let mut hits = 0u32;

        for result in results {
            *rounds_histogram.entry(result.rounds_used()).or_insert(0) += 1;
            *winner_counts.entry(result.winner()).or_insert(0) += 1;
            if result.is_early_stop() {
                early_stops += 1;
            }
            total_rounds += u64::from(result.rounds_used());
            confidence_sum += result.confidence();
            min_confidence = min_confidence.min(result.confidence());

            if let Some(target) = dominant {
                if result.winner() == target {
                    correct += 1;
                }
                if result.candidates().contains(target) {
                    hits += 1;
                }
            }
        }

        Self {
            runs,
            seed,
            dominant,
            accuracy: dominant.map(|_| f64::from(correct) / n),
            candidate_hit_rate: dominant.map(|_| f64::from(hits) / n),
            early_stop_rate: f64::from(early_stops) / n,
            capped_runs: runs - early_stops,
            mean_rounds: total_rounds as f64 / n,
            mean_confidence: confidence_sum / n,
            min_confidence,
            rounds_histogram,
            winner_counts,
        }
    }
}

/// Drives batches of simulated assessments through an orchestrator.
#[derive(Debug, Clone)]
pub struct Simulator {
    orchestrator: Arc<ConvergenceOrchestrator>,
    config: SimulationConfig,
}

impl Simulator {
    /// Simulator driving `orchestrator` with batch defaults from `config`.
    pub const fn new(orchestrator: Arc<ConvergenceOrchestrator>, config: SimulationConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    /// Batch defaults.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// One simulated assessment with its own seeded RNG streams.
    pub async fn simulate_once(
        &self,
        pattern: &PreferencePattern,
        seed: u64,
    ) -> AssessmentResult<ConvergenceResult> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut answers = WeightedAnswerSupplier::new(*pattern, SmallRng::from_rng(&mut rng));
        let mut picks = WeightedPickSupplier::new(*pattern, rng);
        self.orchestrator.run(&mut answers, &mut picks).await
    }

    /// Run `config.runs` simulations of `pattern`.
    pub async fn run(&self, pattern: &PreferencePattern) -> AssessmentResult<SimulationReport> {
        self.run_with_progress(pattern, || {}).await
    }

    /// Like [`run`](Self::run), calling `on_complete` as each run finishes.
    #[instrument(skip(self, pattern, on_complete), fields(runs = self.config.runs, seed = self.config.seed))]
    pub async fn run_with_progress<F>(
        &self,
        pattern: &PreferencePattern,
        on_complete: F,
    ) -> AssessmentResult<SimulationReport>
    where
        F: Fn() + Sync,
    {
        let runs = self.config.runs;
        if runs == 0 {
            return Err(AssessmentError::InvalidInput(
                "Simulation needs at least one run".to_string(),
            ));
        }

        let seed = self.config.seed;
        let on_complete = &on_complete;
        let mut indexed: Vec<(u32, AssessmentResult<ConvergenceResult>)> = stream::iter(0..runs)
            .map(|i| async move {
                let result = self
                    .simulate_once(pattern, seed.wrapping_add(u64::from(i)))
                    .await;
                on_complete();
                (i, result)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(i, _)| *i);

        let results = indexed
            .into_iter()
            .map(|(_, r)| r)
            .collect::<AssessmentResult<Vec<_>>>()?;

        let report = SimulationReport::from_results(seed, pattern.dominant_category(), &results);
        info!(
            accuracy = ?report.accuracy,
            early_stop_rate = report.early_stop_rate,
            mean_rounds = report.mean_rounds,
            mean_confidence = report.mean_confidence,
            "simulation complete"
        );
        Ok(report)
    }
}
