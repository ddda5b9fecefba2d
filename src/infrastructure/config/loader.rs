use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Upper bound accepted for `elimination.max_rounds`
pub const MAX_ROUNDS_LIMIT: u32 = 64;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `max_rounds` was zero
    #[error("Invalid max_rounds: {0}. Must be at least 1")]
    InvalidMaxRounds(u32),

    /// `max_rounds` exceeded [`MAX_ROUNDS_LIMIT`]
    #[error("Invalid max_rounds: {0}. Must not exceed {1}")]
    MaxRoundsTooLarge(u32, u32),

    /// `early_win_tally` was zero
    #[error("Invalid early_win_tally: {0}. Must be at least 1")]
    InvalidEarlyWinTally(u32),

    /// Gap thresholds out of order or zero
    #[error("Invalid gap configuration: strong_gap ({strong}) must be >= early_win_gap ({early}) and early_win_gap must be at least 1")]
    InvalidGaps {
        /// Configured `strong_gap`
        strong: u32,
        /// Configured `early_win_gap`
        early: u32,
    },

    /// Fallback rule starts after the round cap
    #[error("Invalid fallback_min_rounds: {0}. Must not exceed max_rounds ({1})")]
    InvalidFallbackRounds(u32, u32),

    /// `fallback_gap` was zero
    #[error("Invalid fallback_gap: {0}. Must be at least 1")]
    InvalidFallbackGap(u32),

    /// Threshold outside `0.0..=1.0`
    #[error("Invalid low_confidence_threshold: {0}. Must be between 0 and 1")]
    InvalidConfidenceThreshold(f64),

    /// Simulation run count was zero
    #[error("Invalid simulation runs: {0}. Must be at least 1")]
    InvalidRuns(u32),

    /// Simulation concurrency was zero
    #[error("Invalid simulation concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    /// Negative or non-finite dominant strength
    #[error("Invalid dominant_strength: {0}. Must be a finite non-negative number")]
    InvalidDominantStrength(f64),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    /// `storage.results_dir` was empty
    #[error("Results directory cannot be empty")]
    EmptyResultsDir,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .inner-dna/config.yaml (project config)
    /// 3. .inner-dna/local.yaml (local overrides, optional)
    /// 4. Environment variables (INNER_DNA_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".inner-dna/config.yaml"))
            .merge(Yaml::file(".inner-dna/local.yaml"))
            .merge(Env::prefixed("INNER_DNA_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("INNER_DNA_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let elim = &config.elimination;
        if elim.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds(elim.max_rounds));
        }
        if elim.max_rounds > MAX_ROUNDS_LIMIT {
            return Err(ConfigError::MaxRoundsTooLarge(
                elim.max_rounds,
                MAX_ROUNDS_LIMIT,
            ));
        }
        if elim.early_win_tally == 0 {
            return Err(ConfigError::InvalidEarlyWinTally(elim.early_win_tally));
        }
        if elim.early_win_gap == 0 || elim.strong_gap < elim.early_win_gap {
            return Err(ConfigError::InvalidGaps {
                strong: elim.strong_gap,
                early: elim.early_win_gap,
            });
        }
        if elim.fallback_min_rounds > elim.max_rounds {
            return Err(ConfigError::InvalidFallbackRounds(
                elim.fallback_min_rounds,
                elim.max_rounds,
            ));
        }
        if elim.fallback_gap == 0 {
            return Err(ConfigError::InvalidFallbackGap(elim.fallback_gap));
        }
        if !(0.0..=1.0).contains(&elim.low_confidence_threshold) {
            return Err(ConfigError::InvalidConfidenceThreshold(
                elim.low_confidence_threshold,
            ));
        }

        let sim = &config.simulation;
        if sim.runs == 0 {
            return Err(ConfigError::InvalidRuns(sim.runs));
        }
        if sim.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(sim.concurrency));
        }
        if !sim.dominant_strength.is_finite() || sim.dominant_strength < 0.0 {
            return Err(ConfigError::InvalidDominantStrength(sim.dominant_strength));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if config.storage.results_dir.is_empty() {
            return Err(ConfigError::EmptyResultsDir);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.elimination.max_rounds, 8);
        assert_eq!(config.elimination.early_win_tally, 3);
        assert_eq!(config.elimination.fallback_min_rounds, 5);
        assert_eq!(config.simulation.runs, 1000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.results_dir, ".inner-dna/results");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
elimination:
  max_rounds: 10
  early_win_tally: 4
simulation:
  runs: 250
  seed: 7
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.elimination.max_rounds, 10);
        assert_eq!(config.elimination.early_win_tally, 4);
        assert_eq!(config.elimination.strong_gap, 2, "unset keys keep defaults");
        assert_eq!(config.simulation.runs, 250);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_zero_max_rounds() {
        let mut config = Config::default();
        config.elimination.max_rounds = 0;
        config.elimination.fallback_min_rounds = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxRounds(0)
        ));
    }

    #[test]
    fn test_validate_max_rounds_upper_bound() {
        let mut config = Config::default();
        config.elimination.max_rounds = u32::MAX;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::MaxRoundsTooLarge(u32::MAX, MAX_ROUNDS_LIMIT)
        ));

        config.elimination.max_rounds = MAX_ROUNDS_LIMIT;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_gaps() {
        let mut config = Config::default();
        config.elimination.strong_gap = 1;
        config.elimination.early_win_gap = 2;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidGaps { strong: 1, early: 2 }
        ));

        let mut config = Config::default();
        config.elimination.early_win_gap = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidGaps { .. }
        ));
    }

    #[test]
    fn test_validate_fallback_after_cap() {
        let mut config = Config::default();
        config.elimination.fallback_min_rounds = 9;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFallbackRounds(9, 8)
        ));
    }

    #[test]
    fn test_validate_confidence_threshold() {
        let mut config = Config::default();
        config.elimination.low_confidence_threshold = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidConfidenceThreshold(_)
        ));
    }

    #[test]
    fn test_validate_simulation() {
        let mut config = Config::default();
        config.simulation.runs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRuns(0)
        ));

        let mut config = Config::default();
        config.simulation.dominant_strength = -1.0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidDominantStrength(_)
        ));
    }

    #[test]
    fn test_validate_logging() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));

        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogRotation(_)
        ));
    }

    #[test]
    fn test_validate_empty_results_dir() {
        let mut config = Config::default();
        config.storage.results_dir = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyResultsDir
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "elimination:\n  max_rounds: 12\nstorage:\n  results_dir: /tmp/r").unwrap();
        file.flush().unwrap();

        let config = temp_env::with_vars_unset(
            ["INNER_DNA_ELIMINATION__MAX_ROUNDS", "INNER_DNA_STORAGE__RESULTS_DIR"],
            || ConfigLoader::load_from_file(file.path()),
        )
        .unwrap();
        assert_eq!(config.elimination.max_rounds, 12);
        assert_eq!(config.storage.results_dir, "/tmp/r");
    }

    #[test]
    fn test_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "simulation:\n  runs: 10").unwrap();
        file.flush().unwrap();

        let config = temp_env::with_vars(
            [
                ("INNER_DNA_SIMULATION__RUNS", Some("77")),
                ("INNER_DNA_LOGGING__LEVEL", Some("warn")),
            ],
            || ConfigLoader::load_from_file(file.path()),
        )
        .unwrap();

        assert_eq!(config.simulation.runs, 77, "env should beat file");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "elimination:\n  fallback_min_rounds: 20").unwrap();
        file.flush().unwrap();

        let result = temp_env::with_var_unset("INNER_DNA_ELIMINATION__FALLBACK_MIN_ROUNDS", || {
            ConfigLoader::load_from_file(file.path())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "elimination:\n  max_rounds: 9\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "elimination:\n  max_rounds: 6\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.elimination.max_rounds, 6, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
