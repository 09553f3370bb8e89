//! Job lifecycle test suite.
//!
//! Drives the dashboard core on a paused tokio clock so timer-based transitions
//! are deterministic.
//!
//! Run with: cargo test --test lifecycle

mod test_helpers;

mod test_cancel;
mod test_catalog;
mod test_rerun;
