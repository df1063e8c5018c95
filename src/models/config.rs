//! Application configuration structures.
//!
//! The keyword taxonomy and platform list are configuration data, not code,
//! so new categories or job boards can be added without touching logic.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::JobCategory;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and search behavior settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Title cleaning settings
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Keyword taxonomy, one spec per category
    #[serde(default = "defaults::default_categories")]
    pub categories: Vec<CategorySpec>,

    /// Job platform definitions
    #[serde(default = "defaults::default_platforms")]
    pub platforms: Vec<PlatformSpec>,

    /// Navigational keywords that disqualify a match when they are the
    /// entire matched text
    #[serde(default = "defaults::excluded_keywords")]
    pub excluded_keywords: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.user_agent.trim().is_empty() {
            return Err(AppError::invalid_input("search.user_agent is empty"));
        }
        if self.search.timeout_secs == 0 {
            return Err(AppError::invalid_input("search.timeout_secs must be > 0"));
        }
        if self.cleaning.min_title_chars == 0 {
            return Err(AppError::invalid_input(
                "cleaning.min_title_chars must be > 0",
            ));
        }
        if self.categories.is_empty() {
            return Err(AppError::invalid_input("No categories defined"));
        }
        if self.platforms.is_empty() {
            return Err(AppError::invalid_input("No platforms defined"));
        }
        for spec in &self.categories {
            if spec.search_terms.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "Category {} has no search terms",
                    spec.category
                )));
            }
            if spec.keywords.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "Category {} has no classification keywords",
                    spec.category
                )));
            }
        }
        for platform in &self.platforms {
            if platform.domain_patterns.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "Platform {} has no domain patterns",
                    platform.name
                )));
            }
        }
        Ok(())
    }

    /// Look up the taxonomy entry for a category.
    pub fn category_spec(&self, category: JobCategory) -> Option<&CategorySpec> {
        self.categories.iter().find(|s| s.category == category)
    }

    /// Look up a platform definition by its label.
    pub fn platform_spec(&self, name: &str) -> Option<&PlatformSpec> {
        self.platforms.iter().find(|p| p.name == name)
    }

    /// Install the user-supplied custom title search.
    ///
    /// Replaces any existing custom entry so the title from the current
    /// invocation always wins over config-file leftovers.
    pub fn set_custom_title(&mut self, title: &str) {
        self.categories.retain(|s| s.category != JobCategory::Custom);
        let mut keywords: Vec<String> = title
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        keywords.extend(defaults::classification_keywords());
        self.categories.push(CategorySpec {
            category: JobCategory::Custom,
            search_terms: vec![format!("{title} jobs")],
            keywords,
        });
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            cleaning: CleaningConfig::default(),
            categories: defaults::default_categories(),
            platforms: defaults::default_platforms(),
            excluded_keywords: defaults::excluded_keywords(),
        }
    }
}

/// HTTP client and search behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between search requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Search endpoint; `{query}` is replaced with the encoded query text
    #[serde(default = "defaults::search_url")]
    pub search_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            search_url: defaults::search_url(),
        }
    }
}

/// Title cleaning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Boilerplate fragments removed from titles, case-insensitively
    #[serde(default = "defaults::boilerplate_patterns")]
    pub boilerplate_patterns: Vec<String>,

    /// Cleaned titles equal to one of these are rejected outright
    #[serde(default = "defaults::excluded_keywords")]
    pub blocked_titles: Vec<String>,

    /// Minimum cleaned title length; shorter titles are rejected
    #[serde(default = "defaults::min_title_chars")]
    pub min_title_chars: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            boilerplate_patterns: defaults::boilerplate_patterns(),
            blocked_titles: defaults::excluded_keywords(),
            min_title_chars: defaults::min_title_chars(),
        }
    }
}

/// Keyword taxonomy entry for one job category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category this entry describes
    pub category: JobCategory,

    /// Search term variants appended to the company name
    pub search_terms: Vec<String>,

    /// Keywords that must appear in link or context text for a match
    pub keywords: Vec<String>,
}

/// A job platform and the URL patterns that identify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Platform label (e.g. "LinkedIn")
    pub name: String,

    /// Lowercase substrings an href must contain to belong to this platform
    pub domain_patterns: Vec<String>,

    /// Scoping filter appended to the query text
    #[serde(default)]
    pub query_filter: String,
}

impl PlatformSpec {
    /// Whether an href belongs to this platform.
    pub fn matches(&self, href: &str) -> bool {
        let href = href.to_lowercase();
        self.domain_patterns.iter().any(|p| href.contains(p))
    }
}

mod defaults {
    use super::{CategorySpec, PlatformSpec};
    use crate::models::JobCategory;

    // Search defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobfinder/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        2000
    }
    pub fn search_url() -> String {
        "https://html.duckduckgo.com/html/?q={query}".into()
    }

    // Cleaning defaults
    pub fn min_title_chars() -> usize {
        5
    }
    pub fn boilerplate_patterns() -> Vec<String> {
        vec![
            "apply now".into(),
            "easy apply".into(),
            "quick apply".into(),
            "view job".into(),
            "view all jobs".into(),
            "be an early applicant".into(),
            "actively hiring".into(),
            "save this job".into(),
        ]
    }

    // Navigational keywords; disqualify a candidate when they are the whole
    // matched text
    pub fn excluded_keywords() -> Vec<String> {
        vec![
            "careers".into(),
            "jobs".into(),
            "login".into(),
            "sign in".into(),
            "contact".into(),
            "home".into(),
            "about".into(),
            "help".into(),
            "privacy".into(),
        ]
    }

    pub fn classification_keywords() -> Vec<String> {
        vec![
            "job".into(),
            "career".into(),
            "position".into(),
            "vacancy".into(),
            "opportunities".into(),
            "hiring".into(),
            "opening".into(),
        ]
    }

    // Taxonomy defaults
    pub fn default_categories() -> Vec<CategorySpec> {
        vec![
            CategorySpec {
                category: JobCategory::Quality,
                search_terms: vec!["quality jobs".into(), "quality assurance jobs".into()],
                keywords: {
                    let mut k = vec!["quality".to_string(), "qa".to_string()];
                    k.extend(classification_keywords());
                    k
                },
            },
            CategorySpec {
                category: JobCategory::Regulatory,
                search_terms: vec![
                    "regulatory jobs".into(),
                    "regulatory affairs jobs".into(),
                ],
                keywords: {
                    let mut k = vec!["regulatory".to_string(), "compliance".to_string()];
                    k.extend(classification_keywords());
                    k
                },
            },
        ]
    }

    // Platform defaults
    pub fn default_platforms() -> Vec<PlatformSpec> {
        vec![
            PlatformSpec {
                name: "LinkedIn".into(),
                domain_patterns: vec!["linkedin.com/jobs".into()],
                query_filter: "site:linkedin.com/jobs".into(),
            },
            PlatformSpec {
                name: "Indeed".into(),
                domain_patterns: vec!["indeed.com".into()],
                query_filter: "site:indeed.com".into(),
            },
            PlatformSpec {
                name: "Workday".into(),
                domain_patterns: vec!["myworkdayjobs.com".into(), "workday.com".into()],
                query_filter: "site:myworkdayjobs.com".into(),
            },
            PlatformSpec {
                name: "Careers pages".into(),
                domain_patterns: vec!["careers".into(), "/jobs".into()],
                query_filter: "careers".into(),
            },
        ]
    }
}
