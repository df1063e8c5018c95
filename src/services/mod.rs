//! Core services: planning, fetching, extraction, normalization,
//! aggregation.

pub mod aggregate;
pub mod extract;
pub mod fetcher;
pub mod normalize;
pub mod planner;

pub use aggregate::CompanyAggregate;
pub use fetcher::{PageElement, PageFetcher, SearchPageFetcher};
pub use normalize::TitleCleaner;
