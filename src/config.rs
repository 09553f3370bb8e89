//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default values used when a variable is not set.
pub mod defaults {
    pub const RUNNING_DELAY_MS: u64 = 2_000; // queued -> running after creation
    pub const COMPLETION_DELAY_MS: u64 = 6_000; // running -> terminal on the auto-run path
    pub const RERUN_COMPLETION_DELAY_MS: u64 = 5_000; // running -> terminal after a rerun
    pub const SUCCESS_PROBABILITY: f64 = 0.7;
    pub const MIN_RUN_DURATION_MS: u64 = 5_000;
    pub const MAX_RUN_DURATION_MS: u64 = 15_000; // exclusive
    pub const EVENT_CHANNEL_CAPACITY: usize = 1_000;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Timing and outcome parameters of the job lifecycle simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Delay between job creation and the automatic start
    pub running_delay_ms: u64,
    /// Delay between the automatic start and completion
    pub completion_delay_ms: u64,
    /// Delay between an explicit rerun and completion
    pub rerun_completion_delay_ms: u64,
    /// Probability that a run ends in `success`
    pub success_probability: f64,
    /// Lower bound of the simulated run duration (inclusive)
    pub min_run_duration_ms: u64,
    /// Upper bound of the simulated run duration (exclusive)
    pub max_run_duration_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            running_delay_ms: defaults::RUNNING_DELAY_MS,
            completion_delay_ms: defaults::COMPLETION_DELAY_MS,
            rerun_completion_delay_ms: defaults::RERUN_COMPLETION_DELAY_MS,
            success_probability: defaults::SUCCESS_PROBABILITY,
            min_run_duration_ms: defaults::MIN_RUN_DURATION_MS,
            max_run_duration_ms: defaults::MAX_RUN_DURATION_MS,
        }
    }
}

impl SimulationConfig {
    pub fn running_delay(&self) -> Duration {
        Duration::from_millis(self.running_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn rerun_completion_delay(&self) -> Duration {
        Duration::from_millis(self.rerun_completion_delay_ms)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Load the demo jobs, test cases and devices at startup
    pub seed_demo_data: bool,
    /// Capacity of the job event broadcast channel
    pub event_channel_capacity: usize,
    /// Lifecycle simulation parameters
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            seed_demo_data: true,
            event_channel_capacity: defaults::EVENT_CHANNEL_CAPACITY,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production, default: development)
    /// - `TJS_SEED_DEMO_DATA`: Seed demo data (default: true in development, false in production)
    /// - `TJS_EVENT_CHANNEL_CAPACITY`: Job event channel capacity (default: 1000)
    /// - `TJS_RUNNING_DELAY_MS`: Delay before a new job starts (default: 2000)
    /// - `TJS_COMPLETION_DELAY_MS`: Delay before a started job completes (default: 6000)
    /// - `TJS_RERUN_COMPLETION_DELAY_MS`: Delay before a rerun completes (default: 5000)
    /// - `TJS_SUCCESS_PROBABILITY`: Probability of a successful run (default: 0.7)
    /// - `TJS_MIN_RUN_DURATION_MS`: Minimum simulated duration (default: 5000)
    /// - `TJS_MAX_RUN_DURATION_MS`: Maximum simulated duration, exclusive (default: 15000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("RUST_ENV") {
            Ok(value) => Environment::parse(&value).ok_or(ConfigError::InvalidValue(
                "RUST_ENV must be 'development' or 'production'",
            ))?,
            Err(_) => Environment::Development,
        };

        let seed_demo_data = match env::var("TJS_SEED_DEMO_DATA") {
            Ok(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue(
                "TJS_SEED_DEMO_DATA must be true or false",
            ))?,
            Err(_) => environment.is_development(),
        };

        let event_channel_capacity = parse_var(
            "TJS_EVENT_CHANNEL_CAPACITY",
            defaults::EVENT_CHANNEL_CAPACITY,
            "TJS_EVENT_CHANNEL_CAPACITY must be a valid number",
        )?;

        let simulation = SimulationConfig {
            running_delay_ms: parse_var(
                "TJS_RUNNING_DELAY_MS",
                defaults::RUNNING_DELAY_MS,
                "TJS_RUNNING_DELAY_MS must be a valid number",
            )?,
            completion_delay_ms: parse_var(
                "TJS_COMPLETION_DELAY_MS",
                defaults::COMPLETION_DELAY_MS,
                "TJS_COMPLETION_DELAY_MS must be a valid number",
            )?,
            rerun_completion_delay_ms: parse_var(
                "TJS_RERUN_COMPLETION_DELAY_MS",
                defaults::RERUN_COMPLETION_DELAY_MS,
                "TJS_RERUN_COMPLETION_DELAY_MS must be a valid number",
            )?,
            success_probability: parse_var(
                "TJS_SUCCESS_PROBABILITY",
                defaults::SUCCESS_PROBABILITY,
                "TJS_SUCCESS_PROBABILITY must be a number",
            )?,
            min_run_duration_ms: parse_var(
                "TJS_MIN_RUN_DURATION_MS",
                defaults::MIN_RUN_DURATION_MS,
                "TJS_MIN_RUN_DURATION_MS must be a valid number",
            )?,
            max_run_duration_ms: parse_var(
                "TJS_MAX_RUN_DURATION_MS",
                defaults::MAX_RUN_DURATION_MS,
                "TJS_MAX_RUN_DURATION_MS must be a valid number",
            )?,
        };

        let config = Config {
            environment,
            seed_demo_data,
            event_channel_capacity,
            simulation,
        };

        config.validate()?;

        Ok(config)
    }

    /// Check values that parse individually but make no sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let sim = &self.simulation;

        if !(0.0..=1.0).contains(&sim.success_probability) {
            errors.push(format!(
                "TJS_SUCCESS_PROBABILITY must be between 0 and 1, got {}",
                sim.success_probability
            ));
        }

        if sim.min_run_duration_ms >= sim.max_run_duration_ms {
            errors.push(format!(
                "TJS_MIN_RUN_DURATION_MS ({}) must be lower than TJS_MAX_RUN_DURATION_MS ({})",
                sim.min_run_duration_ms, sim.max_run_duration_ms
            ));
        }

        if self.event_channel_capacity == 0 {
            errors.push("TJS_EVENT_CHANNEL_CAPACITY must be greater than 0".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &str,
    default: T,
    message: &'static str,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(message)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}
