//! CSV export of sealed company results.
//!
//! One row per company, two columns per category: newline-joined URLs and
//! newline-joined titles, matching the spreadsheet the rest of the workflow
//! expects.

use std::path::PathBuf;

use chrono::Utc;

use crate::error::Result;
use crate::models::{CompanyResult, JobCategory};
use crate::storage::{ExportSummary, ResultExporter};

/// Writes run results to a CSV file.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn header(categories: &[JobCategory]) -> Vec<String> {
        let mut header = vec!["Company".to_string()];
        for category in categories {
            header.push(format!("{} Jobs", category.label()));
            header.push(format!("{} Job Titles", category.label()));
        }
        header
    }

    fn row(result: &CompanyResult, categories: &[JobCategory]) -> Vec<String> {
        let mut row = vec![result.company.clone()];
        for category in categories {
            let postings = result
                .by_category
                .get(category)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let urls: Vec<&str> = postings.iter().map(|p| p.url.as_str()).collect();
            let titles: Vec<&str> = postings.iter().map(|p| p.title.as_str()).collect();
            row.push(urls.join("\n"));
            row.push(titles.join("\n"));
        }
        row
    }
}

impl ResultExporter for CsvExporter {
    fn export(
        &self,
        results: &[CompanyResult],
        categories: &[JobCategory],
    ) -> Result<ExportSummary> {
        let mut writer = csv::WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(Self::header(categories))?;

        for result in results {
            writer.write_record(Self::row(result, categories))?;
            // Flush per row so a partial file survives interruption.
            writer.flush()?;
        }

        Ok(ExportSummary {
            row_count: results.len(),
            posting_count: results.iter().map(CompanyResult::posting_count).sum(),
            location: self.path.display().to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// Writes run results as pretty-printed JSON, keeping the full structure
/// instead of the flattened tabular projection.
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultExporter for JsonExporter {
    fn export(
        &self,
        results: &[CompanyResult],
        _categories: &[JobCategory],
    ) -> Result<ExportSummary> {
        let bytes = serde_json::to_vec_pretty(results)?;
        std::fs::write(&self.path, bytes)?;

        Ok(ExportSummary {
            row_count: results.len(),
            posting_count: results.iter().map(CompanyResult::posting_count).sum(),
            location: self.path.display().to_string(),
            timestamp: Utc::now(),
        })
    }
}
