//! Test case and device catalogs through the dashboard.

use testjob_core::config::Config;
use testjob_core::error::AppError;
use testjob_core::models::NewTestCase;
use testjob_core::services::Dashboard;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_toggle_test_case_twice_restores_flag() {
    let dashboard = Dashboard::new(&Config::default()).await;
    let original = dashboard.list_test_cases().await[0].enabled;

    let once = dashboard.toggle_test_case("tc-1").await.unwrap();
    let twice = dashboard.toggle_test_case("tc-1").await.unwrap();

    assert_eq!(once.enabled, !original);
    assert_eq!(twice.enabled, original);
    assert!(dashboard.toggle_test_case("tc-unknown").await.is_none());
}

#[tokio::test]
async fn test_add_and_delete_test_case() {
    let dashboard = Dashboard::new(&Config::default()).await;

    let created = assert_ok!(
        dashboard
            .add_test_case(NewTestCase {
                id: Some("tc-api".to_string()),
                name: "API Authentication Test".to_string(),
                description: None,
            })
            .await
    );
    assert_eq!(created.id, "tc-api");
    assert!(created.enabled);

    let err = assert_err!(
        dashboard
            .add_test_case(NewTestCase {
                id: Some("tc-api".to_string()),
                ..NewTestCase::named("Duplicate")
            })
            .await
    );
    assert!(matches!(err, AppError::InvalidInput(_)));

    dashboard.delete_test_case("tc-api").await;
    dashboard.delete_test_case("tc-api").await;
    assert!(dashboard.list_test_cases().await.iter().all(|tc| tc.id != "tc-api"));
}

#[tokio::test]
async fn test_device_selection_drives_new_jobs() {
    let dashboard = Dashboard::new(&Config::default()).await;

    assert!(dashboard.toggle_device("dev-2").await.unwrap().selected);
    let job = dashboard.create_job_from_selection("Cross Device").await.unwrap();

    let devices = job.devices.clone().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(job.planned_test_count(), 10);

    // Later catalog changes do not reach the job's copy.
    dashboard.toggle_device("dev-2").await;
    let stored = dashboard.get_job(&job.id).await.unwrap();
    assert_eq!(stored.devices.unwrap().len(), 2);

    dashboard.shutdown().await;
}
