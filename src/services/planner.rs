//! Query planner.
//!
//! Expands a company record into the ordered list of search tasks:
//! one task per (category, term variant, platform) combination, in the
//! taxonomy's declared order so progress and result ordering are
//! reproducible across runs.

use crate::error::{AppError, Result};
use crate::models::{CompanyRecord, Config, JobCategory, SearchTask};

/// Build the ordered task list for one company.
///
/// `location_filter` is the run-level filter; when absent, the record's own
/// location column is used. Fails with `InvalidInput` on an empty company
/// name, an empty category selection, or a selected category missing from
/// the taxonomy.
pub fn plan(
    record: &CompanyRecord,
    categories: &[JobCategory],
    location_filter: Option<&str>,
    config: &Config,
) -> Result<Vec<SearchTask>> {
    let company = record.name.trim();
    if company.is_empty() {
        return Err(AppError::invalid_input("company name is empty"));
    }
    if categories.is_empty() {
        return Err(AppError::invalid_input("no categories selected"));
    }
    for category in categories {
        if config.category_spec(*category).is_none() {
            return Err(AppError::invalid_input(format!(
                "category {category} is not in the taxonomy"
            )));
        }
    }

    let location = location_filter
        .or(record.location.as_deref())
        .map(location_clause)
        .filter(|c| !c.is_empty());

    let mut tasks = Vec::new();
    // Iterate the taxonomy in declared order, not the selection order.
    for spec in &config.categories {
        if !categories.contains(&spec.category) {
            continue;
        }
        for term in &spec.search_terms {
            for platform in &config.platforms {
                let mut query = format!("{company} {term}");
                if !platform.query_filter.is_empty() {
                    query.push(' ');
                    query.push_str(&platform.query_filter);
                }
                if let Some(clause) = &location {
                    query.push(' ');
                    query.push_str(clause);
                }
                tasks.push(SearchTask {
                    company: company.to_string(),
                    category: spec.category,
                    platform: platform.name.clone(),
                    query,
                });
            }
        }
    }
    Ok(tasks)
}

/// Combine a free-text location filter into OR syntax.
///
/// `"Boston, Remote"` becomes `("Boston" OR "Remote")`; a single location is
/// quoted as-is.
fn location_clause(filter: &str) -> String {
    let parts: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => format!("\"{single}\""),
        many => {
            let joined = many
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({joined})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected() -> Vec<JobCategory> {
        vec![JobCategory::Quality, JobCategory::Regulatory]
    }

    #[test]
    fn plan_builds_full_cross_product() {
        let config = Config::default();
        let record = CompanyRecord::new("Acme Medical");
        let tasks = plan(&record, &selected(), None, &config).unwrap();

        let terms: usize = config
            .categories
            .iter()
            .map(|s| s.search_terms.len())
            .sum();
        assert_eq!(tasks.len(), terms * config.platforms.len());

        // Declared order: all quality tasks precede all regulatory tasks.
        let first_regulatory = tasks
            .iter()
            .position(|t| t.category == JobCategory::Regulatory)
            .unwrap();
        assert!(
            tasks[..first_regulatory]
                .iter()
                .all(|t| t.category == JobCategory::Quality)
        );
    }

    #[test]
    fn plan_is_deterministic() {
        let config = Config::default();
        let record = CompanyRecord::new("Acme");
        let a = plan(&record, &selected(), Some("Boston"), &config).unwrap();
        let b = plan(&record, &selected(), Some("Boston"), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn plan_ignores_selection_order() {
        let config = Config::default();
        let record = CompanyRecord::new("Acme");
        let forward = plan(&record, &selected(), None, &config).unwrap();
        let reversed = plan(
            &record,
            &[JobCategory::Regulatory, JobCategory::Quality],
            None,
            &config,
        )
        .unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn plan_rejects_empty_company() {
        let config = Config::default();
        let record = CompanyRecord::new("   ");
        assert!(plan(&record, &selected(), None, &config).is_err());
    }

    #[test]
    fn plan_rejects_empty_selection() {
        let config = Config::default();
        let record = CompanyRecord::new("Acme");
        assert!(plan(&record, &[], None, &config).is_err());
    }

    #[test]
    fn plan_rejects_unknown_category() {
        // Custom is only in the taxonomy once a custom title is installed.
        let config = Config::default();
        let record = CompanyRecord::new("Acme");
        assert!(plan(&record, &[JobCategory::Custom], None, &config).is_err());
    }

    #[test]
    fn query_contains_company_term_and_filter() {
        let config = Config::default();
        let record = CompanyRecord::new("Acme");
        let tasks = plan(&record, &[JobCategory::Quality], None, &config).unwrap();
        let linkedin = tasks.iter().find(|t| t.platform == "LinkedIn").unwrap();
        assert!(linkedin.query.contains("Acme"));
        assert!(linkedin.query.contains("quality jobs"));
        assert!(linkedin.query.contains("site:linkedin.com/jobs"));
    }

    #[test]
    fn record_location_is_used_when_no_run_filter() {
        let config = Config::default();
        let mut record = CompanyRecord::new("Acme");
        record.location = Some("Dublin".into());
        let tasks = plan(&record, &[JobCategory::Quality], None, &config).unwrap();
        assert!(tasks[0].query.ends_with("\"Dublin\""));

        let tasks = plan(&record, &[JobCategory::Quality], Some("Boston"), &config).unwrap();
        assert!(tasks[0].query.ends_with("\"Boston\""));
    }

    #[test]
    fn location_clause_or_syntax() {
        assert_eq!(location_clause("Boston"), "\"Boston\"");
        assert_eq!(
            location_clause("Boston, Remote"),
            "(\"Boston\" OR \"Remote\")"
        );
        assert_eq!(location_clause(" , "), "");
    }
}
