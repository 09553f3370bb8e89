//! Domain models for the test job simulator.

use rand::Rng;

pub mod device;
pub mod job;
pub mod job_event;
pub mod test_case;
pub mod test_result;

// Re-export commonly used types
pub use device::{Device, DeviceType};
pub use job::{JobStatus, JobUpdate, RunOutcome, TestJob, validate_job_name};
pub use job_event::{JobEvent, JobEventMessage};
pub use test_case::{NewTestCase, TestCase};
pub use test_result::{TestResult, TestStatus};

/// Characters used for generated ids (lowercase base36).
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Length of the random part of a generated id.
const ID_RANDOM_LENGTH: usize = 10;

/// Generate the random part of an id, e.g. the `k3x9...` in `job-k3x9...`.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_RANDOM_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
