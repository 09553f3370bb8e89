//! Display helpers for presenting jobs.

use chrono::{DateTime, Utc};

use crate::models::{JobStatus, TestJob, TestStatus};

/// Human readable duration: `450ms`, `42s`, `3m 5s`.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }

    let seconds = ms / 1000;
    if seconds < 60 {
        return format!("{}s", seconds);
    }

    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// How long ago `timestamp` was, relative to `now`. Future timestamps read as 0 seconds.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_sec = (now - timestamp).num_seconds().max(0);
    if diff_sec < 60 {
        return format!("{} seconds ago", diff_sec);
    }

    let diff_min = diff_sec / 60;
    if diff_min < 60 {
        return format!("{} minutes ago", diff_min);
    }

    let diff_hour = diff_min / 60;
    if diff_hour < 24 {
        return format!("{} hours ago", diff_hour);
    }

    format!("{} days ago", diff_hour / 24)
}

/// CSS classes for a job status badge.
pub fn status_class(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Success => "bg-success text-success-foreground",
        JobStatus::Failed => "bg-error text-error-foreground",
        JobStatus::Running => "bg-primary text-primary-foreground",
        JobStatus::Queued | JobStatus::Canceled => "bg-muted text-muted-foreground",
    }
}

/// CSS class for a test result row.
pub fn test_result_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "text-success",
        TestStatus::Failed => "text-error",
        TestStatus::Skipped => "text-muted-foreground",
    }
}

/// Percentage of passed tests, `None` while the job has no tests.
pub fn pass_rate(job: &TestJob) -> Option<f64> {
    if job.test_count == 0 {
        return None;
    }
    Some(f64::from(job.passed_tests) * 100.0 / f64::from(job.test_count))
}
