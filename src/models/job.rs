//! Job posting data structures.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder value used when a category yields no postings.
pub const NO_JOBS_FOUND: &str = "No jobs found";

/// Placeholder value used when a posting carries no location.
pub const NO_LOCATION: &str = "Location not specified";

/// Job category a posting is classified under.
///
/// The declared order is the column/iteration order everywhere results are
/// rendered, so runs with identical input produce identical output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Quality,
    Regulatory,
    Custom,
}

impl JobCategory {
    /// Human-readable label used for export column headers.
    pub fn label(&self) -> &'static str {
        match self {
            JobCategory::Quality => "Quality",
            JobCategory::Regulatory => "Regulatory",
            JobCategory::Custom => "Custom",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for JobCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quality" => Ok(JobCategory::Quality),
            "regulatory" => Ok(JobCategory::Regulatory),
            "custom" | "custom-title" | "custom_title" => Ok(JobCategory::Custom),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// A structured job posting produced by extraction and normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobPosting {
    /// Company name, as provided in the input list
    pub company: String,

    /// Category this posting was classified under
    pub category: JobCategory,

    /// Originating platform label (e.g. "LinkedIn")
    pub platform: String,

    /// Normalized title, non-empty after cleaning
    pub title: String,

    /// Posting URL; identity key for deduplication
    pub url: String,

    /// Location text, or [`NO_LOCATION`]
    pub location: String,
}

impl JobPosting {
    /// Placeholder posting inserted when a category has no results.
    pub fn sentinel(company: impl Into<String>, category: JobCategory) -> Self {
        Self {
            company: company.into(),
            category,
            platform: String::new(),
            title: NO_JOBS_FOUND.to_string(),
            url: NO_JOBS_FOUND.to_string(),
            location: NO_LOCATION.to_string(),
        }
    }

    /// Whether this posting is the "no results" placeholder.
    pub fn is_sentinel(&self) -> bool {
        self.url == NO_JOBS_FOUND
    }
}

/// An unvalidated extraction result, before title normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Link target
    pub href: String,

    /// Visible anchor text
    pub title: String,

    /// Surrounding text, used as classification context and location hint
    pub snippet: String,
}

/// Finalized per-company result set.
///
/// Only produced by sealing a company aggregate; never mutated afterwards.
/// Every selected category maps to at least one posting (sentinel guarantee).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyResult {
    /// Company name
    pub company: String,

    /// Postings per category, in first-seen order
    pub by_category: BTreeMap<JobCategory, Vec<JobPosting>>,
}

impl CompanyResult {
    /// Total postings across categories, sentinels excluded.
    pub fn posting_count(&self) -> usize {
        self.by_category
            .values()
            .flatten()
            .filter(|p| !p.is_sentinel())
            .count()
    }
}
