//! Per-company deduplication and aggregation.
//!
//! Collects postings for one company while its tasks run, dropping duplicate
//! URLs within each category, then seals the collection into an immutable
//! [`CompanyResult`] with a sentinel for every empty category.

use std::collections::{BTreeMap, HashSet};

use crate::models::{CompanyResult, JobCategory, JobPosting};

/// Mutable accumulation of one company's postings.
///
/// Dedup scope is per-company-per-category: the same URL may legitimately
/// appear once under quality and once under regulatory. Within a category,
/// first-seen wins and insertion order is preserved.
#[derive(Debug)]
pub struct CompanyAggregate {
    company: String,
    by_category: BTreeMap<JobCategory, Vec<JobPosting>>,
    seen: BTreeMap<JobCategory, HashSet<String>>,
}

impl CompanyAggregate {
    /// Start an empty aggregate for the selected categories.
    pub fn new(company: impl Into<String>, categories: &[JobCategory]) -> Self {
        let mut by_category = BTreeMap::new();
        let mut seen = BTreeMap::new();
        for category in categories {
            by_category.insert(*category, Vec::new());
            seen.insert(*category, HashSet::new());
        }
        Self {
            company: company.into(),
            by_category,
            seen,
        }
    }

    /// Company this aggregate belongs to.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Merge postings into a category; duplicates are dropped silently.
    ///
    /// Idempotent: feeding the same posting twice leaves exactly one entry,
    /// with the first-seen title and location retained.
    pub fn add(&mut self, category: JobCategory, postings: impl IntoIterator<Item = JobPosting>) {
        let entries = self.by_category.entry(category).or_default();
        let seen = self.seen.entry(category).or_default();
        for posting in postings {
            let key = posting.url.to_lowercase();
            if seen.insert(key) {
                entries.push(posting);
            }
        }
    }

    /// Finalize into an immutable result.
    ///
    /// Every category that collected nothing receives exactly one sentinel
    /// posting, so downstream consumers never see an empty cell.
    pub fn seal(mut self) -> CompanyResult {
        for (category, postings) in &mut self.by_category {
            if postings.is_empty() {
                postings.push(JobPosting::sentinel(&self.company, *category));
            }
        }
        CompanyResult {
            company: self.company,
            by_category: self.by_category,
        }
    }
}
