//! Data models for the job finder.

pub mod config;
pub mod job;
pub mod task;

pub use config::{CategorySpec, CleaningConfig, Config, PlatformSpec, SearchConfig};
pub use job::{Candidate, CompanyResult, JobCategory, JobPosting, NO_JOBS_FOUND, NO_LOCATION};
pub use task::{CompanyRecord, SearchTask};
