//! Command and query surface of the core.
//!
//! A [`Dashboard`] owns the job registry, the lifecycle simulator, both
//! catalogs and the event broadcaster. A presentation layer talks to the core
//! only through it. It is built explicitly and torn down with
//! [`Dashboard::shutdown`], which aborts every pending timer.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Device, JobEvent, JobEventMessage, NewTestCase, TestCase, TestJob};
use crate::services::{
    DeviceCatalog, EventBroadcaster, JobRegistry, LifecycleSimulator, OutcomeSource,
    RandomOutcome, TestCaseCatalog, seed,
};

pub struct Dashboard {
    registry: JobRegistry,
    simulator: LifecycleSimulator,
    events: EventBroadcaster,
    test_cases: RwLock<TestCaseCatalog>,
    devices: RwLock<DeviceCatalog>,
}

impl Dashboard {
    /// Build a dashboard with random outcomes, seeding demo data when configured.
    pub async fn new(config: &Config) -> Self {
        let outcome = Arc::new(RandomOutcome::from_config(&config.simulation));
        let dashboard = Self::with_outcome_source(config, outcome);
        if config.seed_demo_data {
            dashboard.seed_demo_data().await;
        }
        dashboard
    }

    /// Build an empty dashboard around a caller-provided outcome source.
    pub fn with_outcome_source(config: &Config, outcome: Arc<dyn OutcomeSource>) -> Self {
        let registry = JobRegistry::new();
        let events = EventBroadcaster::with_capacity(config.event_channel_capacity);
        let simulator = LifecycleSimulator::new(
            registry.clone(),
            outcome,
            events.clone(),
            &config.simulation,
        );

        Self {
            registry,
            simulator,
            events,
            test_cases: RwLock::new(TestCaseCatalog::default()),
            devices: RwLock::new(DeviceCatalog::default()),
        }
    }

    /// Load the demo catalogs and job history, replacing current catalogs.
    pub async fn seed_demo_data(&self) {
        *self.test_cases.write().await = TestCaseCatalog::new(seed::predefined_test_cases());
        *self.devices.write().await = DeviceCatalog::new(seed::predefined_devices());
        self.registry.seed(seed::initial_jobs(Utc::now())).await;
        info!("Demo data loaded");
    }

    /// Subscribe to job events.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEventMessage> {
        self.events.subscribe()
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    pub async fn list_jobs(&self, filter: Option<&str>) -> Vec<TestJob> {
        self.registry.list(filter).await
    }

    pub async fn get_job(&self, id: &str) -> Option<TestJob> {
        self.registry.find(id).await
    }

    /// Create a job and arm its automatic run.
    pub async fn create_job(
        &self,
        name: &str,
        test_cases: Vec<TestCase>,
        devices: Vec<Device>,
    ) -> AppResult<TestJob> {
        let job = self.registry.create(name, test_cases, devices).await?;
        info!(
            job_id = %job.id,
            name = %job.name,
            planned_tests = job.planned_test_count(),
            "Job created"
        );
        self.simulator.schedule(&job.id).await?;
        self.events.send(JobEvent::job_created(&job));
        Ok(job)
    }

    /// Create a job from the enabled test cases and selected devices.
    pub async fn create_job_from_selection(&self, name: &str) -> AppResult<TestJob> {
        let test_cases = self.test_cases.read().await.enabled();
        let devices = self.devices.read().await.selected();
        self.create_job(name, test_cases, devices).await
    }

    pub async fn cancel_job(&self, id: &str) -> AppResult<TestJob> {
        self.simulator.cancel(id).await
    }

    pub async fn rerun_job(&self, id: &str) -> AppResult<TestJob> {
        self.simulator.rerun(id).await
    }

    /// Delete a job. Deleting an unknown id is a no-op.
    pub async fn delete_job(&self, id: &str) {
        if self.registry.delete(id).await {
            info!(job_id = %id, "Job deleted");
            self.events.send(JobEvent::job_deleted(id));
        } else {
            debug!(job_id = %id, "Delete of unknown job ignored");
        }
    }

    // ------------------------------------------------------------------
    // Test cases and devices
    // ------------------------------------------------------------------

    pub async fn list_test_cases(&self) -> Vec<TestCase> {
        self.test_cases.read().await.list().to_vec()
    }

    pub async fn toggle_test_case(&self, id: &str) -> Option<TestCase> {
        self.test_cases.write().await.toggle_enabled(id)
    }

    pub async fn add_test_case(&self, request: NewTestCase) -> AppResult<TestCase> {
        let case = self.test_cases.write().await.add(request)?;
        info!(test_case_id = %case.id, name = %case.name, "Test case created");
        Ok(case)
    }

    /// Delete a test case. Jobs keep their own copies.
    pub async fn delete_test_case(&self, id: &str) {
        if self.test_cases.write().await.remove(id) {
            info!(test_case_id = %id, "Test case deleted");
        }
    }

    pub async fn list_devices(&self) -> Vec<Device> {
        self.devices.read().await.list().to_vec()
    }

    pub async fn toggle_device(&self, id: &str) -> Option<Device> {
        self.devices.write().await.toggle_selected(id)
    }

    /// Abort every pending timer. Jobs keep their current state.
    pub async fn shutdown(&self) {
        let armed = self.registry.armed_count().await;
        self.registry.disarm_all().await;
        info!(armed, "Dashboard shut down");
    }
}
