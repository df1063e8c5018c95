//! Result extractor.
//!
//! Turns the flattened elements of a fetched result page into candidate
//! postings for the task's category. Classification is keyword-driven from
//! the taxonomy; malformed elements are dropped silently.

use crate::models::{Candidate, Config, SearchTask};
use crate::services::fetcher::PageElement;

/// Fallback title when an anchor has no visible text.
const UNTITLED: &str = "Job Posting";

/// Extract candidate postings for a task from raw page elements.
///
/// A candidate is accepted only if the href is non-empty and belongs to the
/// task's platform, the anchor or context text contains a classification
/// keyword for the task's category, and the whole anchor text is not itself
/// a navigational keyword. A posting matching several categories' keywords
/// is accepted independently by each category's tasks.
pub fn extract(task: &SearchTask, elements: &[PageElement], config: &Config) -> Vec<Candidate> {
    let Some(platform) = config.platform_spec(&task.platform) else {
        log::debug!("No platform spec for '{}', dropping page", task.platform);
        return Vec::new();
    };
    let Some(spec) = config.category_spec(task.category) else {
        log::debug!("No taxonomy entry for {}, dropping page", task.category);
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for element in elements {
        if element.href.is_empty() || !platform.matches(&element.href) {
            continue;
        }

        let text = element.text.to_lowercase();
        let context = element.context.to_lowercase();
        let keyword_hit = spec
            .keywords
            .iter()
            .any(|k| text.contains(k) || context.contains(k));
        if !keyword_hit {
            continue;
        }

        // Pure navigation links ("Careers", "Home") match keywords but are
        // not postings.
        let whole = text.trim();
        if config.excluded_keywords.iter().any(|e| whole == e) {
            continue;
        }

        let title = if element.text.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            element.text.clone()
        };
        candidates.push(Candidate {
            href: element.href.clone(),
            title,
            snippet: element.context.clone(),
        });
    }
    candidates
}
