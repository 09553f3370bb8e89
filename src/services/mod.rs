//! Business logic services.

pub mod catalog;
pub mod dashboard;
pub mod event_broadcaster;
pub mod outcome;
pub mod registry;
pub mod seed;
pub mod simulator;

pub use catalog::{DeviceCatalog, TestCaseCatalog};
pub use dashboard::Dashboard;
pub use event_broadcaster::EventBroadcaster;
pub use outcome::{FixedOutcome, OutcomeSource, RandomOutcome};
pub use registry::JobRegistry;
pub use simulator::{LifecycleSimulator, simulate_run};
