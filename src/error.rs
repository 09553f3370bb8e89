//! Domain error types for the test job simulator.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Simulated test failures are job data, never errors.

use crate::models::JobStatus;

/// Application-level errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Command not allowed from the job's current state
    #[error("Cannot {action} job {job_id} while it is {status}")]
    InvalidTransition {
        job_id: String,
        status: JobStatus,
        action: &'static str,
    },
}

impl AppError {
    /// Shorthand for a missing job.
    pub fn job_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Job {}", id))
    }

    /// Stable machine-readable code, matching the error codes a presentation layer shows.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

/// Error body for presentation layers that render failures as JSON.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
