//! Clinic data extraction: Firecrawl client, pattern extractors, pipeline.

pub mod client;
pub mod error;
pub mod fields;
pub mod media;
pub mod pipeline;
mod retry;
pub mod types;

pub use client::FirecrawlClient;
pub use error::ExtractError;
pub use pipeline::{ExtractionOutcome, Extractor};
pub use types::{KeyPages, MediaAssets, PageMetadata, ScrapedPage};
