//! Search task and input record structures.

use serde::{Deserialize, Serialize};

use crate::models::JobCategory;

/// One unit of search work: a (company, category, platform, query) tuple.
///
/// Produced by the planner, consumed exactly once by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTask {
    /// Company name
    pub company: String,

    /// Category whose term variants produced this task
    pub category: JobCategory,

    /// Platform label this task is scoped to
    pub platform: String,

    /// Full query text sent to the search engine
    pub query: String,
}

/// One row of the input company list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyRecord {
    /// Company name
    #[serde(
        rename = "Company",
        alias = "company",
        alias = "Company Name",
        alias = "company name",
        alias = "name"
    )]
    pub name: String,

    /// Optional location hint for this company's queries
    #[serde(
        rename = "Location",
        alias = "location",
        alias = "Country",
        alias = "country",
        default
    )]
    pub location: Option<String>,
}

impl CompanyRecord {
    /// Create a record with a name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }
}
