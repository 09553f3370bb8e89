//! Rerunning jobs.

use std::sync::Arc;

use chrono::Utc;
use testjob_core::config::Config;
use testjob_core::error::AppError;
use testjob_core::models::{JobEvent, JobStatus};
use testjob_core::services::{Dashboard, FixedOutcome};
use tokio_test::{assert_err, assert_ok};

use super::test_helpers::*;

#[tokio::test(start_paused = true)]
async fn test_rerun_finished_job() {
    let dashboard = dashboard_with(FixedOutcome::failure());
    let job = dashboard
        .create_job("Flaky Suite", smoke_cases(), one_device())
        .await
        .unwrap();
    wait_ms(RUNNING_DELAY_MS + COMPLETION_DELAY_MS + 1).await;

    let first_run = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(first_run.status, JobStatus::Failed);
    assert!(!first_run.test_results.is_empty());

    let before = Utc::now();
    let rerun = assert_ok!(dashboard.rerun_job(&job.id).await);
    assert_eq!(rerun.status, JobStatus::Running);
    assert!(rerun.start_time >= before);
    assert!(rerun.end_time.is_none());
    assert!(rerun.duration_ms.is_none());
    assert!(rerun.test_results.is_empty());

    wait_ms(RERUN_COMPLETION_DELAY_MS - 1).await;
    assert_eq!(dashboard.get_job(&job.id).await.unwrap().status, JobStatus::Running);

    wait_ms(2).await;
    let done = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Failed);
    assert_eq!(done.test_count, 2);
    assert!(done.counts_consistent());
    assert_eq!(done.start_time, rerun.start_time);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_queued_job_replaces_pending_run() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let mut rx = dashboard.subscribe();
    let job = dashboard
        .create_job("Impatient", smoke_cases(), one_device())
        .await
        .unwrap();

    assert_ok!(dashboard.rerun_job(&job.id).await);

    wait_ms(RERUN_COMPLETION_DELAY_MS + 1).await;
    let done = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Success);

    // The original automatic run would have finished here.
    wait_ms(RUNNING_DELAY_MS + COMPLETION_DELAY_MS).await;
    assert_eq!(dashboard.get_job(&job.id).await.unwrap(), done);

    let statuses = statuses_for(&drain(&mut rx), &job.id);
    assert_eq!(statuses, vec![JobStatus::Running, JobStatus::Success]);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_running_job_rejected() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let job = dashboard
        .create_job("Busy", smoke_cases(), one_device())
        .await
        .unwrap();
    wait_ms(RUNNING_DELAY_MS + 1).await;

    let err = assert_err!(dashboard.rerun_job(&job.id).await);
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            status: JobStatus::Running,
            action: "rerun",
            ..
        }
    ));

    // The run in progress still completes on schedule.
    wait_ms(COMPLETION_DELAY_MS).await;
    assert_eq!(dashboard.get_job(&job.id).await.unwrap().status, JobStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_canceled_job() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let job = dashboard
        .create_job("Second Chance", smoke_cases(), one_device())
        .await
        .unwrap();
    wait_ms(RUNNING_DELAY_MS + 1).await;
    dashboard.cancel_job(&job.id).await.unwrap();

    assert_ok!(dashboard.rerun_job(&job.id).await);
    wait_ms(RERUN_COMPLETION_DELAY_MS + 1).await;

    let done = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Success);
    assert_eq!(done.passed_tests, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_seeded_job_keeps_recorded_count() {
    let dashboard =
        Dashboard::with_outcome_source(&Config::default(), Arc::new(FixedOutcome::success()));
    dashboard.seed_demo_data().await;

    let rerun = assert_ok!(dashboard.rerun_job("job-4").await);
    assert_eq!(rerun.status, JobStatus::Running);

    wait_ms(RERUN_COMPLETION_DELAY_MS + 1).await;
    let done = dashboard.get_job("job-4").await.unwrap();
    assert_eq!(done.status, JobStatus::Success);
    assert_eq!(done.test_count, 8);
    assert_eq!(done.passed_tests, 8);
}

#[tokio::test]
async fn test_rerun_unknown_job() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let err = assert_err!(dashboard.rerun_job("job-nope").await);
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test(start_paused = true)]
async fn test_rerun_from_created_event_completes() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let mut rx = dashboard.subscribe();
    let job = dashboard
        .create_job("Eager Observer", smoke_cases(), one_device())
        .await
        .unwrap();

    let created = rx.recv().await.unwrap();
    assert!(matches!(created.event, JobEvent::JobCreated(_)));
    assert_ok!(dashboard.rerun_job(created.event.job_id()).await);

    wait_ms(RERUN_COMPLETION_DELAY_MS + 1).await;
    let done = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Success);
    assert_eq!(dashboard.registry().armed_count().await, 0);
}
