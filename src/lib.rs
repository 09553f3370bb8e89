//! Test job simulator library.
//!
//! In-memory core of a test job dashboard: a job registry, a timer-driven job
//! lifecycle with simulated outcomes, test case and device catalogs, and
//! display helpers.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod services;
