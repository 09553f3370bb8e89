//! Test result model representing one simulated test execution.

use serde::{Deserialize, Serialize};

/// Test execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Individual test result attached to a finished job.
///
/// `error_message` is only ever set on failed results; the constructors are the
/// only way this crate builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub name: String,
    pub status: TestStatus,
    /// Execution duration in milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TestResult {
    pub fn passed(id: impl Into<String>, name: impl Into<String>, duration_ms: u64) -> Self {
        TestResult {
            id: id.into(),
            name: name.into(),
            status: TestStatus::Passed,
            duration_ms,
            error_message: None,
        }
    }

    pub fn failed(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_ms: u64,
        error_message: impl Into<String>,
    ) -> Self {
        TestResult {
            id: id.into(),
            name: name.into(),
            status: TestStatus::Failed,
            duration_ms,
            error_message: Some(error_message.into()),
        }
    }

    pub fn skipped(id: impl Into<String>, name: impl Into<String>) -> Self {
        TestResult {
            id: id.into(),
            name: name.into(),
            status: TestStatus::Skipped,
            duration_ms: 0,
            error_message: None,
        }
    }
}
