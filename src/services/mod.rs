//! Availability checking services.
//!
//! - `classifier`: pure verdict over raw page text
//! - `fetcher`: HTTP retrieval of supplier pages
//! - `resolver`: ordered, short-circuiting supplier walk

pub mod classifier;
pub mod fetcher;
pub mod resolver;

pub use classifier::{Verdict, classify};
pub use fetcher::PageFetcher;
pub use resolver::{Resolution, StockResolver};
