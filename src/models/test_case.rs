//! Reusable test case definitions.

use serde::{Deserialize, Serialize};

/// A named test definition, independent of any job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
}

impl TestCase {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TestCase {
            id: id.into(),
            name: name.into(),
            description: None,
            enabled: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request to add a test case to the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTestCase {
    /// Caller-chosen id; a `tc-<random>` id is generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTestCase {
    pub fn named(name: impl Into<String>) -> Self {
        NewTestCase {
            name: name.into(),
            ..Default::default()
        }
    }
}
