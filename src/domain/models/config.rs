//! Engine configuration: stopping policy, simulation, logging, storage.

use serde::{Deserialize, Serialize};

/// Main configuration structure for the assessment engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Stage-2 stopping policy
    #[serde(default)]
    pub elimination: EliminationConfig,

    /// Monte Carlo harness defaults
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Result storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Stopping policy for the scenario elimination round.
///
/// Rules are checked after every round in this order:
/// 1. leader >= `early_win_tally` and gap >= `strong_gap`
/// 2. leader >= `early_win_tally` and gap >= `early_win_gap`
/// 3. rounds >= `fallback_min_rounds` and gap >= `fallback_gap`
/// 4. rounds == `max_rounds`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EliminationConfig {
    /// Hard cap on scenario rounds
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Leader tally needed for an early win
    #[serde(default = "default_early_win_tally")]
    pub early_win_tally: u32,

    /// Gap that marks an early win as strong
    #[serde(default = "default_strong_gap")]
    pub strong_gap: u32,

    /// Smallest lead accepted for an early win
    #[serde(default = "default_early_win_gap")]
    pub early_win_gap: u32,

    /// Rounds before the fallback rule applies
    #[serde(default = "default_fallback_min_rounds")]
    pub fallback_min_rounds: u32,

    /// Lead required by the fallback rule
    #[serde(default = "default_fallback_gap")]
    pub fallback_gap: u32,

    /// Capped results below this confidence are flagged low-trust
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
}

const fn default_max_rounds() -> u32 {
    8
}

const fn default_early_win_tally() -> u32 {
    3
}

const fn default_strong_gap() -> u32 {
    2
}

const fn default_early_win_gap() -> u32 {
    1
}

const fn default_fallback_min_rounds() -> u32 {
    5
}

const fn default_fallback_gap() -> u32 {
    2
}

const fn default_low_confidence_threshold() -> f64 {
    0.5
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            early_win_tally: default_early_win_tally(),
            strong_gap: default_strong_gap(),
            early_win_gap: default_early_win_gap(),
            fallback_min_rounds: default_fallback_min_rounds(),
            fallback_gap: default_fallback_gap(),
            low_confidence_threshold: default_low_confidence_threshold(),
        }
    }
}

/// Monte Carlo simulation defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Number of simulated assessments
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Base seed; run `i` uses `seed + i`
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Runs in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Weight of the dominant category in generated patterns
    #[serde(default = "default_dominant_strength")]
    pub dominant_strength: f64,
}

const fn default_runs() -> u32 {
    1000
}

const fn default_seed() -> u64 {
    42
}

const fn default_concurrency() -> usize {
    64
}

const fn default_dominant_strength() -> f64 {
    3.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            seed: default_seed(),
            concurrency: default_concurrency(),
            dominant_strength: default_dominant_strength(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Result storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Directory holding one JSON file per assessment
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_results_dir() -> String {
    ".inner-dna/results".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}
