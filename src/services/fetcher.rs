//! Page fetching.
//!
//! The orchestrator only ever sees the [`PageFetcher`] capability: a query
//! string in, a flat list of (href, text, context) elements out. The real
//! implementation drives an HTML search endpoint with reqwest and flattens
//! the result page with scraper; tests substitute scripted fetchers.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::SearchConfig;
use crate::utils::{collapse_whitespace, get_domain};

/// One flattened element from a fetched result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    /// Link target
    pub href: String,

    /// Visible anchor text
    pub text: String,

    /// Text of the surrounding container
    pub context: String,
}

/// Capability for turning a search query into raw page elements.
///
/// One instance is constructed per run and owned by the orchestrator; calls
/// are strictly sequential, so implementations need no internal locking.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the result page for a query and flatten its anchors.
    ///
    /// Per-query failures are `AppError::Fetch`; a dead session that cannot
    /// serve any further query is `AppError::FatalFetcher`.
    async fn fetch(&self, query: &str) -> Result<Vec<PageElement>>;
}

/// Search-engine backed fetcher.
pub struct SearchPageFetcher {
    client: reqwest::Client,
    search_url: String,
    delay: Duration,
}

impl SearchPageFetcher {
    /// Build a fetcher from search settings.
    ///
    /// A client that cannot be constructed is a fatal error; the run must
    /// not start.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AppError::fatal_fetcher)?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    fn request_url(&self, query: &str) -> String {
        self.search_url
            .replace("{query}", &urlencoding::encode(query))
    }

    /// Flatten all anchors of a result page into page elements.
    ///
    /// Search-engine-internal links are skipped here; everything else is
    /// left for the extractor to judge.
    fn parse_elements(html: &str) -> Vec<PageElement> {
        let document = Html::parse_document(html);
        let anchor_sel = match Selector::parse("a[href]") {
            Ok(sel) => sel,
            Err(_) => return Vec::new(),
        };

        let mut elements = Vec::new();
        for anchor in document.select(&anchor_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.starts_with("http") {
                continue;
            }
            if let Some(domain) = get_domain(href) {
                if domain.ends_with("duckduckgo.com") {
                    continue;
                }
            }

            let text = collapse_whitespace(&anchor.text().collect::<Vec<_>>().join(" "));
            let context = anchor
                .parent()
                .and_then(ElementRef::wrap)
                .map(|p| collapse_whitespace(&p.text().collect::<Vec<_>>().join(" ")))
                .unwrap_or_default();

            elements.push(PageElement {
                href: href.to_string(),
                text,
                context,
            });
        }
        elements
    }
}

#[async_trait]
impl PageFetcher for SearchPageFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<PageElement>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let url = self.request_url(query);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::fetch(query, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(query, format!("status {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::fetch(query, e))?;
        Ok(Self::parse_elements(&html))
    }
}
