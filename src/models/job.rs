//! Job domain model and its state transitions.
//!
//! A job moves `queued -> running -> success | failed`, can be canceled while
//! running, and can be rerun from `queued` or any terminal state. The methods on
//! [`TestJob`] are the only place status changes are applied; they refuse moves
//! the state machine does not allow so callers cannot leave a record with, say,
//! an end time but a `running` status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Device, TestCase, TestResult, generate_id};
use crate::error::{AppError, AppResult};

/// Job status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, waiting for the simulated runner to pick it up.
    Queued,
    /// Simulated execution in progress.
    Running,
    /// All tests passed.
    Success,
    /// At least one test failed.
    Failed,
    /// Stopped by the user while running.
    Canceled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(Self::Queued),
            "running" => Some(Self::Running),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// No automatic transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Canceled)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a completed run writes onto the job.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub succeeded: bool,
    pub duration_ms: u64,
    pub test_count: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub test_results: Vec<TestResult>,
}

/// A simulated test job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestJob {
    pub id: String,
    pub name: String,
    pub status: JobStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Simulated run duration in milliseconds, not wall-clock elapsed time.
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub test_count: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub skipped_tests: u32,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    /// Test cases selected when the job was created (owned copy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<TestCase>>,
    /// Devices selected when the job was created (owned copy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<Device>>,
}

impl TestJob {
    /// Create a queued job. `name` must already be validated.
    pub fn new(
        name: String,
        test_cases: Vec<TestCase>,
        devices: Vec<Device>,
        now: DateTime<Utc>,
    ) -> Self {
        TestJob {
            id: format!("job-{}", generate_id()),
            name,
            status: JobStatus::Queued,
            start_time: now,
            end_time: None,
            duration_ms: None,
            test_count: 0,
            passed_tests: 0,
            failed_tests: 0,
            skipped_tests: 0,
            test_results: Vec::new(),
            test_cases: Some(test_cases),
            devices: Some(devices),
        }
    }

    /// Number of tests the next run will execute.
    ///
    /// Jobs built from a selection run every test case on every device. Jobs
    /// without a selection (seeded history) keep the count they already report.
    pub fn planned_test_count(&self) -> u32 {
        match (&self.test_cases, &self.devices) {
            (Some(cases), Some(devices)) => {
                u32::try_from(cases.len().saturating_mul(devices.len())).unwrap_or(u32::MAX)
            }
            _ => self.test_count,
        }
    }

    /// `passed + failed + skipped == test_count`
    pub fn counts_consistent(&self) -> bool {
        self.passed_tests + self.failed_tests + self.skipped_tests == self.test_count
    }

    /// Reject `action` unless the job is still waiting for its automatic run.
    pub fn ensure_queued(&self, action: &'static str) -> AppResult<()> {
        if self.status != JobStatus::Queued {
            return Err(self.invalid_transition(action));
        }
        Ok(())
    }

    /// `queued -> running`. Returns false when the job is not queued.
    pub fn start(&mut self) -> bool {
        if self.status != JobStatus::Queued {
            return false;
        }
        self.status = JobStatus::Running;
        true
    }

    /// Explicit rerun: back to `running` with a fresh start time and no results.
    pub fn restart(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.status == JobStatus::Running {
            return Err(self.invalid_transition("rerun"));
        }
        self.status = JobStatus::Running;
        self.start_time = now;
        self.end_time = None;
        self.duration_ms = None;
        self.passed_tests = 0;
        self.failed_tests = 0;
        self.skipped_tests = 0;
        self.test_results.clear();
        Ok(())
    }

    /// `running -> canceled`.
    pub fn cancel(&mut self) -> AppResult<()> {
        if self.status != JobStatus::Running {
            return Err(self.invalid_transition("cancel"));
        }
        self.status = JobStatus::Canceled;
        Ok(())
    }

    /// `running -> success | failed`. Returns false when the job is not running.
    pub fn complete(&mut self, outcome: RunOutcome, now: DateTime<Utc>) -> bool {
        if self.status != JobStatus::Running {
            return false;
        }
        self.status = if outcome.succeeded {
            JobStatus::Success
        } else {
            JobStatus::Failed
        };
        self.end_time = Some(now);
        self.duration_ms = Some(outcome.duration_ms);
        self.test_count = outcome.test_count;
        self.passed_tests = outcome.passed_tests;
        self.failed_tests = outcome.failed_tests;
        self.skipped_tests = 0;
        self.test_results = outcome.test_results;
        true
    }

    fn invalid_transition(&self, action: &'static str) -> AppError {
        AppError::InvalidTransition {
            job_id: self.id.clone(),
            status: self.status,
            action,
        }
    }
}

/// Trim a job name and reject it when nothing is left.
pub fn validate_job_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Job name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Partial update of a job record. Absent fields are left untouched.
///
/// Only descriptive fields can be edited. Status, timestamps, counts and
/// results belong to the lifecycle and change through the transition methods
/// on [`TestJob`], so an update can never strand a job without its timer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    pub name: Option<String>,
}

impl JobUpdate {
    /// Apply onto `job`. Validates before writing anything.
    pub fn apply(self, job: &mut TestJob) -> AppResult<()> {
        if let Some(name) = self.name.as_deref().map(validate_job_name).transpose()? {
            job.name = name;
        }
        Ok(())
    }
}
