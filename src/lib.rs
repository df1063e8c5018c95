// src/lib.rs

//! Job vacancy finder library.
//!
//! Turns a list of companies into per-company job posting results by
//! planning search queries, fetching result pages, extracting and
//! classifying candidates, and aggregating deduplicated postings.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
