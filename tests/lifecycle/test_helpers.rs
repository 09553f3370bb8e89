//! Shared helpers for lifecycle tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::Receiver;
use testjob_core::config::Config;
use testjob_core::models::{Device, DeviceType, JobEvent, JobEventMessage, JobStatus, TestCase};
use testjob_core::services::{Dashboard, FixedOutcome};

pub use testjob_core::config::defaults::{
    COMPLETION_DELAY_MS, RERUN_COMPLETION_DELAY_MS, RUNNING_DELAY_MS,
};

/// Default configuration without demo data.
pub fn test_config() -> Config {
    Config {
        seed_demo_data: false,
        ..Config::default()
    }
}

/// Empty dashboard whose runs always end with `outcome`.
pub fn dashboard_with(outcome: FixedOutcome) -> Dashboard {
    Dashboard::with_outcome_source(&test_config(), Arc::new(outcome))
}

pub fn smoke_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("tc-1", "User Authentication"),
        TestCase::new("tc-2", "Data Retrieval"),
    ]
}

pub fn one_device() -> Vec<Device> {
    vec![Device::new("dev-1", "Desktop Chrome", DeviceType::Desktop).selected()]
}

/// Let the paused clock run forward by `ms`, firing every timer due on the way.
pub async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Everything already sitting in the channel.
pub fn drain(rx: &mut Receiver<JobEventMessage>) -> Vec<JobEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        events.push(message.event);
    }
    events
}

/// Statuses announced for `job_id`, in order.
pub fn statuses_for(events: &[JobEvent], job_id: &str) -> Vec<JobStatus> {
    events
        .iter()
        .filter_map(|event| match event {
            JobEvent::JobUpdated(update) if update.job_id == job_id => Some(update.status),
            _ => None,
        })
        .collect()
}
