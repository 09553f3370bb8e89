//! Job lifecycle simulator.
//!
//! Drives jobs through `queued -> running -> success | failed` on timers, with
//! no real test execution behind it. Each armed run is a single tokio task
//! whose handle is stored next to the job in the [`JobRegistry`]; cancel, rerun
//! and delete abort that task and bump the job's run generation so a late
//! callback can never overwrite the newer state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::AppResult;
use crate::models::{JobEvent, RunOutcome, TestJob, TestResult};
use crate::services::{EventBroadcaster, JobRegistry, OutcomeSource};

/// Share of tests reported as passed when a run fails, in percent.
const FAILED_RUN_PASS_PERCENT: u32 = 70;

/// Moves jobs through their lifecycle. Cloning shares the same registry and outcome source.
#[derive(Clone)]
pub struct LifecycleSimulator {
    registry: JobRegistry,
    outcome: Arc<dyn OutcomeSource>,
    events: EventBroadcaster,
    running_delay: Duration,
    completion_delay: Duration,
    rerun_completion_delay: Duration,
}

impl LifecycleSimulator {
    pub fn new(
        registry: JobRegistry,
        outcome: Arc<dyn OutcomeSource>,
        events: EventBroadcaster,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            registry,
            outcome,
            events,
            running_delay: config.running_delay(),
            completion_delay: config.completion_delay(),
            rerun_completion_delay: config.rerun_completion_delay(),
        }
    }

    /// Arm the automatic run of a queued job: start after the running delay,
    /// finish after the completion delay. Any other state is rejected and keeps
    /// its current timer.
    pub async fn schedule(&self, job_id: &str) -> AppResult<()> {
        let (_, generation) = self
            .registry
            .transition(job_id, |job| job.ensure_queued("schedule"))
            .await?;

        self.arm(
            job_id,
            generation,
            Some(self.running_delay),
            self.completion_delay,
        )
        .await;
        debug!(job_id = %job_id, generation, "Automatic run scheduled");
        Ok(())
    }

    /// Cancel a running job. Its pending completion never fires.
    pub async fn cancel(&self, job_id: &str) -> AppResult<TestJob> {
        let (job, _) = self.registry.transition(job_id, TestJob::cancel).await?;

        info!(job_id = %job.id, "Job canceled");
        self.events.send(JobEvent::job_updated(&job));
        Ok(job)
    }

    /// Rerun a queued or finished job: it is running immediately and completes
    /// after the rerun delay. Any timer from an earlier run is invalidated first.
    pub async fn rerun(&self, job_id: &str) -> AppResult<TestJob> {
        let now = Utc::now();
        let (job, generation) = self
            .registry
            .transition(job_id, |job| job.restart(now))
            .await?;

        info!(job_id = %job.id, "Job restarted");
        self.events.send(JobEvent::job_updated(&job));

        self.arm(job_id, generation, None, self.rerun_completion_delay)
            .await;
        Ok(job)
    }

    async fn arm(
        &self,
        job_id: &str,
        generation: u64,
        start_after: Option<Duration>,
        complete_after: Duration,
    ) {
        let simulator = self.clone();
        let id = job_id.to_string();
        let handle = tokio::spawn(async move {
            simulator
                .drive(id, generation, start_after, complete_after)
                .await;
        });
        self.registry.arm(job_id, generation, handle).await;
    }

    async fn drive(
        self,
        job_id: String,
        generation: u64,
        start_after: Option<Duration>,
        complete_after: Duration,
    ) {
        if let Some(delay) = start_after {
            sleep(delay).await;
            let Some(job) = self
                .registry
                .apply_if_current(&job_id, generation, TestJob::start)
                .await
            else {
                return;
            };
            info!(job_id = %job.id, "Job started");
            self.events.send(JobEvent::job_updated(&job));
        }

        sleep(complete_after).await;

        let source = Arc::clone(&self.outcome);
        let finished = self
            .registry
            .apply_if_current(&job_id, generation, move |job| {
                let outcome = simulate_run(job, source.as_ref());
                job.complete(outcome, Utc::now())
            })
            .await;

        if let Some(job) = finished {
            info!(
                job_id = %job.id,
                status = %job.status,
                passed = job.passed_tests,
                failed = job.failed_tests,
                duration_ms = ?job.duration_ms,
                "Job finished"
            );
            self.events.send(JobEvent::job_updated(&job));
        }
    }
}

/// Compute the outcome of one simulated run of `job`.
///
/// Every selected test case runs on every selected device. A failed run reports
/// `floor(test_count * 0.7)` passes; the simulated duration is independent of
/// wall-clock time.
pub fn simulate_run(job: &TestJob, source: &dyn OutcomeSource) -> RunOutcome {
    let succeeded = source.run_succeeds();
    let test_count = job.planned_test_count();
    let passed_tests = if succeeded {
        test_count
    } else {
        failed_run_passes(test_count)
    };

    RunOutcome {
        succeeded,
        duration_ms: source.run_duration_ms(),
        test_count,
        passed_tests,
        failed_tests: test_count - passed_tests,
        test_results: build_results(job, passed_tests, source),
    }
}

/// `floor(test_count * 0.7)`, computed without overflowing `u32`.
fn failed_run_passes(test_count: u32) -> u32 {
    let passed = u64::from(test_count) * u64::from(FAILED_RUN_PASS_PERCENT) / 100;
    u32::try_from(passed).unwrap_or(test_count)
}

/// One result per (test case, device) pair; the first `passed` pass.
fn build_results(job: &TestJob, passed: u32, source: &dyn OutcomeSource) -> Vec<TestResult> {
    let (Some(cases), Some(devices)) = (&job.test_cases, &job.devices) else {
        return Vec::new();
    };

    cases
        .iter()
        .flat_map(|case| devices.iter().map(move |device| (case, device)))
        .enumerate()
        .map(|(index, (case, device))| {
            let id = format!("{}-{}", case.id, device.id);
            let name = format!("{} on {}", case.name, device.name);
            if (index as u32) < passed {
                TestResult::passed(id, name, source.test_duration_ms())
            } else {
                TestResult::failed(
                    id,
                    name,
                    source.test_duration_ms(),
                    format!("{} failed on {}", case.name, device.name),
                )
            }
        })
        .collect()
}
