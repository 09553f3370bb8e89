//! Pluggable source of simulated run outcomes.
//!
//! The lifecycle simulator asks an [`OutcomeSource`] whether a run passes and
//! how long it took. [`RandomOutcome`] reproduces the dashboard's weighted coin
//! flip; [`FixedOutcome`] is deterministic and is what tests and replays use.

use std::ops::Range;

use rand::Rng;

use crate::config::SimulationConfig;

/// Range for the simulated duration of a single test, in milliseconds.
const TEST_DURATION_MS: Range<u64> = 100..500;

/// Decides how a simulated run ends.
pub trait OutcomeSource: Send + Sync {
    /// Whether the whole run succeeds.
    fn run_succeeds(&self) -> bool;

    /// Simulated duration of the run in milliseconds.
    fn run_duration_ms(&self) -> u64;

    /// Simulated duration of one test in milliseconds.
    fn test_duration_ms(&self) -> u64;
}

/// Random outcomes drawn from the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomOutcome {
    success_probability: f64,
    run_duration_ms: Range<u64>,
}

impl RandomOutcome {
    /// `success_probability` is clamped into `[0, 1]`; an empty duration range
    /// collapses to its start.
    pub fn new(success_probability: f64, run_duration_ms: Range<u64>) -> Self {
        Self {
            success_probability: success_probability.clamp(0.0, 1.0),
            run_duration_ms,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.success_probability,
            config.min_run_duration_ms..config.max_run_duration_ms,
        )
    }
}

impl OutcomeSource for RandomOutcome {
    fn run_succeeds(&self) -> bool {
        rand::thread_rng().gen_bool(self.success_probability)
    }

    fn run_duration_ms(&self) -> u64 {
        if self.run_duration_ms.is_empty() {
            return self.run_duration_ms.start;
        }
        rand::thread_rng().gen_range(self.run_duration_ms.clone())
    }

    fn test_duration_ms(&self) -> u64 {
        rand::thread_rng().gen_range(TEST_DURATION_MS)
    }
}

/// Always returns the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOutcome {
    pub succeeds: bool,
    pub run_duration_ms: u64,
    pub test_duration_ms: u64,
}

impl FixedOutcome {
    pub fn success() -> Self {
        Self {
            succeeds: true,
            run_duration_ms: 10_000,
            test_duration_ms: 250,
        }
    }

    pub fn failure() -> Self {
        Self {
            succeeds: false,
            ..Self::success()
        }
    }
}

impl OutcomeSource for FixedOutcome {
    fn run_succeeds(&self) -> bool {
        self.succeeds
    }

    fn run_duration_ms(&self) -> u64 {
        self.run_duration_ms
    }

    fn test_duration_ms(&self) -> u64 {
        self.test_duration_ms
    }
}
