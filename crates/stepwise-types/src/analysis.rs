//! Problem Breakdown Types
//!
//! This module contains the step and analysis types produced by one
//! decomposition call. They live only for the duration of a request.

use serde::{Deserialize, Serialize};

/// One actionable step of a problem breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Identifier used as the diagram node key
    pub id: String,
    /// Short title shown in bold on the node
    pub title: String,
    /// Longer explanation of the step
    pub description: String,
    /// Ids of the steps this one depends on, in listed order.
    /// Not validated: ids may dangle, repeat, or form cycles.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Step {
    /// Create a step without dependencies
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            dependencies: Vec::new(),
        }
    }

    /// Add a dependency on another step id
    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }
}

/// Parsed output of one decomposition call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub steps: Vec<Step>,
    pub summary: String,
}

impl Analysis {
    pub fn new(steps: Vec<Step>, summary: impl Into<String>) -> Self {
        Self {
            steps,
            summary: summary.into(),
        }
    }

    /// Total number of dependency edges across all steps
    pub fn edge_count(&self) -> usize {
        self.steps.iter().map(|step| step.dependencies.len()).sum()
    }
}
