//! Title normalizer.
//!
//! Cleans raw anchor text into a canonical posting title, or rejects the
//! candidate entirely.

use regex::Regex;

use crate::models::CleaningConfig;
use crate::utils::collapse_whitespace;

/// Characters trimmed from the edges after boilerplate removal.
const EDGE_TRIM: &[char] = &[' ', '-', '–', '—', '|', ':', '·', ',', '.', '!', ';'];

/// Regex patterns applied before the literal boilerplate list.
const TIME_PATTERNS: &[&str] = &[
    r"(?i)\bposted\s+(?:today|yesterday)\b",
    r"(?i)\b\d+\+?\s*(?:minute|hour|day|week|month|year)s?\s+ago\b",
    r"(?i)\bposted\b",
    r"(?i)\bago\b",
];

/// Cleans extracted text into canonical titles.
pub struct TitleCleaner {
    removals: Vec<Regex>,
    blocked: Vec<String>,
    min_chars: usize,
}

impl TitleCleaner {
    /// Build a cleaner from config data, precompiling all removal patterns.
    pub fn new(config: &CleaningConfig) -> Self {
        let mut removals: Vec<Regex> = TIME_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        removals.extend(
            config
                .boilerplate_patterns
                .iter()
                .filter_map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).ok()),
        );
        Self {
            removals,
            blocked: config
                .blocked_titles
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            min_chars: config.min_title_chars,
        }
    }

    /// Normalize raw text into a title, or `None` to drop the candidate.
    ///
    /// Rejects titles shorter than the configured minimum after cleaning,
    /// and titles that exactly match a navigational keyword.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let mut text = collapse_whitespace(raw);
        for pattern in &self.removals {
            text = pattern.replace_all(&text, " ").into_owned();
        }
        let cleaned = collapse_whitespace(&text)
            .trim_matches(EDGE_TRIM)
            .to_string();

        if self.blocked.iter().any(|b| cleaned.eq_ignore_ascii_case(b)) {
            return None;
        }
        if cleaned.chars().count() < self.min_chars {
            return None;
        }
        Some(cleaned)
    }
}
