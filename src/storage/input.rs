//! Company list ingestion.
//!
//! Reads the input CSV into typed records. Header naming is lenient
//! ("Company", "Company Name", ...) via serde aliases; rows with an empty
//! name are skipped.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::CompanyRecord;

/// Load the company list from a CSV file.
///
/// Fails with `InvalidInput` if the file cannot be parsed or no row carries
/// a non-empty company name.
pub fn load_companies(path: impl AsRef<Path>) -> Result<Vec<CompanyRecord>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<CompanyRecord>() {
        let mut record = row.map_err(|e| {
            AppError::invalid_input(format!("could not parse company list: {e}"))
        })?;
        if record.name.trim().is_empty() {
            continue;
        }
        record.location = record.location.take().filter(|l| !l.trim().is_empty());
        records.push(record);
    }

    if records.is_empty() {
        return Err(AppError::invalid_input(format!(
            "no usable company rows in {}",
            path.display()
        )));
    }

    log::info!("Loaded {} companies from {}", records.len(), path.display());
    Ok(records)
}
