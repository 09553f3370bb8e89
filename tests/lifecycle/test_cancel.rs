//! Canceling jobs.

use testjob_core::error::AppError;
use testjob_core::models::JobStatus;
use testjob_core::services::FixedOutcome;
use tokio_test::{assert_err, assert_ok};

use super::test_helpers::*;

#[tokio::test(start_paused = true)]
async fn test_cancel_running_job_is_final() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let mut rx = dashboard.subscribe();
    let job = dashboard
        .create_job("Cancel Me", smoke_cases(), one_device())
        .await
        .unwrap();

    wait_ms(RUNNING_DELAY_MS + 1).await;
    let canceled = assert_ok!(dashboard.cancel_job(&job.id).await);
    assert_eq!(canceled.status, JobStatus::Canceled);

    // Well past the point where the completion timer would have fired.
    wait_ms(COMPLETION_DELAY_MS * 3).await;

    let stored = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(stored, canceled);
    assert!(stored.end_time.is_none());
    assert_eq!(stored.test_count, 0);
    assert_eq!(dashboard.registry().armed_count().await, 0);

    assert_eq!(
        statuses_for(&drain(&mut rx), &job.id),
        vec![JobStatus::Running, JobStatus::Canceled]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_queued_job_rejected() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let job = dashboard
        .create_job("Too Early", smoke_cases(), one_device())
        .await
        .unwrap();

    let err = assert_err!(dashboard.cancel_job(&job.id).await);
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            status: JobStatus::Queued,
            action: "cancel",
            ..
        }
    ));

    // The rejected command leaves the automatic run armed.
    wait_ms(RUNNING_DELAY_MS + COMPLETION_DELAY_MS + 1).await;
    assert_eq!(dashboard.get_job(&job.id).await.unwrap().status, JobStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_finished_job_rejected() {
    let dashboard = dashboard_with(FixedOutcome::failure());
    let job = dashboard
        .create_job("Already Done", smoke_cases(), one_device())
        .await
        .unwrap();
    wait_ms(RUNNING_DELAY_MS + COMPLETION_DELAY_MS + 1).await;

    let before = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(before.status, JobStatus::Failed);

    assert_err!(dashboard.cancel_job(&job.id).await);
    assert_eq!(dashboard.get_job(&job.id).await.unwrap(), before);
}

#[tokio::test]
async fn test_cancel_unknown_job() {
    let dashboard = dashboard_with(FixedOutcome::success());
    let err = assert_err!(dashboard.cancel_job("job-missing").await);
    assert_eq!(err, AppError::NotFound("Job job-missing".to_string()));
}
