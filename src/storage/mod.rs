//! Result export and company-list ingestion.

pub mod export;
pub mod input;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CompanyResult, JobCategory};

pub use export::{CsvExporter, JsonExporter};
pub use input::load_companies;

/// Summary of a completed export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of company rows written
    pub row_count: usize,

    /// Number of real postings written, sentinels excluded
    pub posting_count: usize,

    /// Where the export landed
    pub location: String,

    /// When the export finished
    pub timestamp: DateTime<Utc>,
}

/// Capability for serializing a finished run.
///
/// Receives the sealed result sequence only after the run reaches
/// `Completed`; column set and row count are stable from that point on.
pub trait ResultExporter {
    fn export(
        &self,
        results: &[CompanyResult],
        categories: &[JobCategory],
    ) -> Result<ExportSummary>;
}
