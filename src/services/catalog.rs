//! Catalogs of reusable test cases and devices.
//!
//! Jobs take copies of what is selected here when they are created, so nothing
//! in these catalogs affects an existing job.

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Device, NewTestCase, TestCase, generate_id};

/// Minimum length of a test case name after trimming.
const MIN_TEST_CASE_NAME_LEN: usize = 2;

/// Mutable catalog of test case definitions, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TestCaseCatalog {
    cases: Vec<TestCase>,
}

impl TestCaseCatalog {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    pub fn list(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn get(&self, id: &str) -> Option<&TestCase> {
        self.cases.iter().find(|tc| tc.id == id)
    }

    /// Test cases currently enabled.
    pub fn enabled(&self) -> Vec<TestCase> {
        self.cases.iter().filter(|tc| tc.enabled).cloned().collect()
    }

    /// Flip `enabled`. Unknown ids are ignored and yield `None`.
    pub fn toggle_enabled(&mut self, id: &str) -> Option<TestCase> {
        let case = self.cases.iter_mut().find(|tc| tc.id == id)?;
        case.enabled = !case.enabled;
        Some(case.clone())
    }

    /// Add an enabled test case. Ids must be unique within the catalog.
    pub fn add(&mut self, request: NewTestCase) -> AppResult<TestCase> {
        let name = request.name.trim();
        if name.chars().count() < MIN_TEST_CASE_NAME_LEN {
            return Err(AppError::InvalidInput(format!(
                "Test case name must be at least {} characters",
                MIN_TEST_CASE_NAME_LEN
            )));
        }

        let id = match request.id.map(|id| id.trim().to_string()) {
            Some(id) if id.is_empty() => {
                return Err(AppError::InvalidInput(
                    "Test case id must not be empty".to_string(),
                ));
            }
            Some(id) => id,
            None => format!("tc-{}", generate_id()),
        };

        if self.get(&id).is_some() {
            return Err(AppError::InvalidInput(format!(
                "Test case {} already exists",
                id
            )));
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let case = TestCase {
            id,
            name: name.to_string(),
            description,
            enabled: true,
        };
        debug!(test_case_id = %case.id, "Test case added");
        self.cases.push(case.clone());
        Ok(case)
    }

    /// Remove by id. Returns false if there was nothing to remove.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.cases.len();
        self.cases.retain(|tc| tc.id != id);
        before != self.cases.len()
    }
}

/// Catalog of target devices.
#[derive(Debug, Clone, Default)]
pub struct DeviceCatalog {
    devices: Vec<Device>,
}

impl DeviceCatalog {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn list(&self) -> &[Device] {
        &self.devices
    }

    /// Devices currently selected.
    pub fn selected(&self) -> Vec<Device> {
        self.devices.iter().filter(|d| d.selected).cloned().collect()
    }

    /// Flip `selected`. Unknown ids are ignored and yield `None`.
    pub fn toggle_selected(&mut self, id: &str) -> Option<Device> {
        let device = self.devices.iter_mut().find(|d| d.id == id)?;
        device.selected = !device.selected;
        Some(device.clone())
    }
}
