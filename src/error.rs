// src/error.rs

//! Unified error handling for the job finder application.

use std::fmt;

use thiserror::Error;

/// Result type alias for job finder operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSV reading/writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Bad company list or run configuration; nothing is processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single search task failed; isolated to that task.
    #[error("Fetch failed for '{query}': {message}")]
    Fetch { query: String, message: String },

    /// A malformed page element; the candidate is dropped locally.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The fetcher/session cannot be created or died; aborts the run.
    #[error("Fatal fetcher error: {0}")]
    FatalFetcher(String),
}

impl AppError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a per-task fetch error.
    pub fn fetch(query: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            query: query.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a fatal fetcher error.
    pub fn fatal_fetcher(message: impl fmt::Display) -> Self {
        Self::FatalFetcher(message.to_string())
    }

    /// Whether this error must abort the whole run rather than one task.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalFetcher(_) | Self::InvalidInput(_))
    }
}
