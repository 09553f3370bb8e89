//! Job lifecycle events for in-process observers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobStatus, TestJob};

/// Event sent to subscribers whenever the registry changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum JobEvent {
    /// A new job was created.
    JobCreated(JobCreatedPayload),
    /// A job changed status.
    JobUpdated(JobUpdatedPayload),
    /// A job was removed.
    JobDeleted(JobDeletedPayload),
}

/// Payload for job_created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreatedPayload {
    pub job_id: String,
    pub name: String,
    pub test_case_count: usize,
    pub device_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Payload for job_updated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdatedPayload {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed_tests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_tests: Option<u32>,
}

/// Payload for job_deleted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDeletedPayload {
    pub job_id: String,
}

/// Wrapper that includes timestamp with every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEventMessage {
    #[serde(flatten)]
    pub event: JobEvent,
    pub timestamp: DateTime<Utc>,
}

impl JobEventMessage {
    /// Create a new event message with the current timestamp.
    pub fn new(event: JobEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

impl JobEvent {
    pub fn job_created(job: &TestJob) -> Self {
        JobEvent::JobCreated(JobCreatedPayload {
            job_id: job.id.clone(),
            name: job.name.clone(),
            test_case_count: job.test_cases.as_ref().map_or(0, Vec::len),
            device_count: job.devices.as_ref().map_or(0, Vec::len),
            created_at: job.start_time,
        })
    }

    /// Counts are only reported once the job has finished.
    pub fn job_updated(job: &TestJob) -> Self {
        let finished = matches!(job.status, JobStatus::Success | JobStatus::Failed);
        JobEvent::JobUpdated(JobUpdatedPayload {
            job_id: job.id.clone(),
            status: job.status,
            passed_tests: finished.then_some(job.passed_tests),
            failed_tests: finished.then_some(job.failed_tests),
        })
    }

    pub fn job_deleted(job_id: &str) -> Self {
        JobEvent::JobDeleted(JobDeletedPayload {
            job_id: job_id.to_string(),
        })
    }

    pub fn job_id(&self) -> &str {
        match self {
            JobEvent::JobCreated(p) => &p.job_id,
            JobEvent::JobUpdated(p) => &p.job_id,
            JobEvent::JobDeleted(p) => &p.job_id,
        }
    }
}
