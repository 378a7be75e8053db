//! Headline sources.
//!
//! A [`HeadlineSource`] turns a search query into an ordered list of raw
//! headlines. Failures are reported as a single [`PipelineError::Fetch`].

pub mod google;

pub use google::{GoogleNewsSource, SourceConfig};

use crate::error::PipelineError;
use async_trait::async_trait;

/// Fetches raw headlines for a query.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<String>, PipelineError>;
}
