//! Demo data loaded at startup in development.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Device, DeviceType, JobStatus, TestCase, TestJob, TestResult};

/// Default test case catalog.
pub fn predefined_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("tc-1", "User Authentication")
            .with_description("Login, logout and session expiry flows"),
        TestCase::new("tc-2", "Data Retrieval")
            .with_description("List and detail endpoints return consistent data"),
        TestCase::new("tc-3", "Error Handling"),
        TestCase::new("tc-4", "Form Validation")
            .with_description("Client-side validation messages"),
        TestCase::new("tc-5", "Input Sanitization"),
    ]
}

/// Default device catalog.
pub fn predefined_devices() -> Vec<Device> {
    vec![
        Device::new("dev-1", "Desktop Chrome", DeviceType::Desktop)
            .with_os("Windows 11")
            .selected(),
        Device::new("dev-2", "iPhone 15", DeviceType::Mobile).with_os("iOS 17"),
        Device::new("dev-3", "iPad Air", DeviceType::Tablet).with_os("iPadOS 17"),
        Device::new("dev-4", "CI Runner", DeviceType::Server).with_os("Ubuntu 22.04"),
    ]
}

/// Job history shown on a fresh dashboard, newest first.
pub fn initial_jobs(now: DateTime<Utc>) -> Vec<TestJob> {
    vec![
        seeded_job(
            "job-1",
            "API Integration Tests",
            JobStatus::Success,
            now - Duration::minutes(30),
            Some(180_000),
            (24, 24, 0),
            vec![
                TestResult::passed("test-1", "User Authentication", 300),
                TestResult::passed("test-2", "Data Retrieval", 450),
                TestResult::passed("test-3", "Error Handling", 200),
            ],
        ),
        seeded_job(
            "job-2",
            "UI Component Tests",
            JobStatus::Failed,
            now - Duration::minutes(60),
            Some(300_000),
            (15, 12, 3),
            vec![
                TestResult::passed("test-4", "Button Rendering", 150),
                TestResult::failed(
                    "test-5",
                    "Modal Interactions",
                    220,
                    "Expected modal to be closed after action",
                ),
                TestResult::passed("test-6", "Form Validation", 190),
            ],
        ),
        seeded_job(
            "job-3",
            "Security Validation Suite",
            JobStatus::Running,
            now - Duration::minutes(5),
            None,
            (30, 20, 0),
            vec![
                TestResult::passed("test-7", "Input Sanitization", 380),
                TestResult::passed("test-8", "CSRF Protection", 420),
            ],
        ),
        seeded_job(
            "job-4",
            "Performance Benchmarks",
            JobStatus::Queued,
            now,
            None,
            (8, 0, 0),
            Vec::new(),
        ),
    ]
}

fn seeded_job(
    id: &str,
    name: &str,
    status: JobStatus,
    start_time: DateTime<Utc>,
    duration_ms: Option<u64>,
    (test_count, passed_tests, failed_tests): (u32, u32, u32),
    test_results: Vec<TestResult>,
) -> TestJob {
    TestJob {
        id: id.to_string(),
        name: name.to_string(),
        status,
        start_time,
        end_time: duration_ms.map(|ms| start_time + Duration::milliseconds(ms as i64)),
        duration_ms,
        test_count,
        passed_tests,
        failed_tests,
        skipped_tests: 0,
        test_results,
        test_cases: None,
        devices: None,
    }
}
