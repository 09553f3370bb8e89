//! In-memory job registry.
//!
//! Holds every job record, most recent first, together with the timer that
//! drives it. Each entry carries a run generation: disarming a job aborts its
//! timer task and bumps the generation, and timer callbacks may only write
//! through [`JobRegistry::apply_if_current`]. A callback armed for an older run
//! therefore cannot touch a job that has since been canceled, rerun or deleted.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Device, JobUpdate, TestCase, TestJob, validate_job_name};

/// Registry entry: the job plus its timer bookkeeping.
struct JobEntry {
    job: TestJob,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl JobEntry {
    fn new(job: TestJob) -> Self {
        Self {
            job,
            generation: 0,
            timer: None,
        }
    }

    /// Abort the armed timer, if any, and start a new generation.
    fn disarm(&mut self) -> u64 {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
        self.generation += 1;
        self.generation
    }

    fn has_live_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[derive(Default)]
struct RegistryState {
    entries: VecDeque<JobEntry>,
}

impl RegistryState {
    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.job.id == id)
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut JobEntry> {
        self.entries.iter_mut().find(|e| e.job.id == id)
    }
}

/// Authoritative collection of jobs. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct JobRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queued job from a name and owned copies of the selections.
    pub async fn create(
        &self,
        name: &str,
        test_cases: Vec<TestCase>,
        devices: Vec<Device>,
    ) -> AppResult<TestJob> {
        let name = validate_job_name(name)?;
        let job = TestJob::new(name, test_cases, devices, Utc::now());

        let mut state = self.state.write().await;
        state.entries.push_front(JobEntry::new(job.clone()));
        debug!(job_id = %job.id, name = %job.name, "Job registered");

        Ok(job)
    }

    /// Append pre-built jobs, keeping their order.
    pub async fn seed(&self, jobs: Vec<TestJob>) {
        let mut state = self.state.write().await;
        for job in jobs {
            state.entries.push_back(JobEntry::new(job));
        }
    }

    /// Apply a partial update to a job.
    pub async fn update(&self, id: &str, update: JobUpdate) -> AppResult<TestJob> {
        let mut state = self.state.write().await;
        let entry = state
            .entry_mut(id)
            .ok_or_else(|| AppError::job_not_found(id))?;

        update.apply(&mut entry.job)?;
        Ok(entry.job.clone())
    }

    /// Remove a job and abort its timer. Returns false if it did not exist.
    pub async fn delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let removed = match state.position(id) {
            Some(pos) => state.entries.remove(pos),
            None => None,
        };
        match removed {
            Some(mut entry) => {
                entry.disarm();
                debug!(job_id = %id, "Job removed");
                true
            }
            None => false,
        }
    }

    pub async fn find(&self, id: &str) -> Option<TestJob> {
        let state = self.state.read().await;
        state
            .entries
            .iter()
            .find(|e| e.job.id == id)
            .map(|e| e.job.clone())
    }

    /// Jobs in listing order, optionally filtered by a case-insensitive name substring.
    pub async fn list(&self, filter: Option<&str>) -> Vec<TestJob> {
        let needle = filter.map(str::to_lowercase).unwrap_or_default();
        let state = self.state.read().await;
        state
            .entries
            .iter()
            .filter(|e| needle.is_empty() || e.job.name.to_lowercase().contains(&needle))
            .map(|e| e.job.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// Number of jobs with a timer that has not fired yet.
    pub async fn armed_count(&self) -> usize {
        let state = self.state.read().await;
        state.entries.iter().filter(|e| e.has_live_timer()).count()
    }

    /// Abort every armed timer.
    pub async fn disarm_all(&self) {
        let mut state = self.state.write().await;
        for entry in state.entries.iter_mut() {
            entry.disarm();
        }
    }

    /// Invalidate the job's current timer and return the new generation.
    pub(crate) async fn disarm(&self, id: &str) -> Option<u64> {
        let mut state = self.state.write().await;
        state.entry_mut(id).map(JobEntry::disarm)
    }

    /// Run a user command against a job and, if it succeeds, invalidate its timer.
    ///
    /// `command` must leave the job untouched when it returns an error.
    pub(crate) async fn transition<F>(&self, id: &str, command: F) -> AppResult<(TestJob, u64)>
    where
        F: FnOnce(&mut TestJob) -> AppResult<()>,
    {
        let mut state = self.state.write().await;
        let entry = state
            .entry_mut(id)
            .ok_or_else(|| AppError::job_not_found(id))?;

        command(&mut entry.job)?;
        let generation = entry.disarm();
        Ok((entry.job.clone(), generation))
    }

    /// Store the timer task for `generation`. A task armed for a stale
    /// generation or a deleted job is aborted instead.
    pub(crate) async fn arm(&self, id: &str, generation: u64, handle: JoinHandle<()>) {
        let mut state = self.state.write().await;
        match state.entry_mut(id) {
            Some(entry) if entry.generation == generation => {
                if let Some(previous) = entry.timer.replace(handle) {
                    previous.abort();
                }
            }
            _ => {
                debug!(job_id = %id, generation, "Discarding timer for stale run");
                handle.abort();
            }
        }
    }

    /// Apply a timer-driven mutation if the job still belongs to `generation`.
    ///
    /// Returns the updated job when `mutate` reported a change.
    pub(crate) async fn apply_if_current<F>(
        &self,
        id: &str,
        generation: u64,
        mutate: F,
    ) -> Option<TestJob>
    where
        F: FnOnce(&mut TestJob) -> bool,
    {
        let mut state = self.state.write().await;
        let entry = state.entry_mut(id)?;
        if entry.generation != generation {
            debug!(job_id = %id, generation, current = entry.generation, "Ignoring stale timer");
            return None;
        }
        mutate(&mut entry.job).then(|| entry.job.clone())
    }
}
