//! Google News search scraping.
//!
//! Fetches the search results page for a query and takes the text of the
//! first `<h3>` elements as headlines.

use crate::error::PipelineError;
use crate::source::HeadlineSource;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Options for the Google News source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub search_url: String,
    pub max_headlines: usize,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            search_url: "https://news.google.com/search".to_string(),
            max_headlines: 5,
            timeout_seconds: 30,
            user_agent: format!("newspulse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Headline source backed by the Google News search page.
pub struct GoogleNewsSource {
    config: SourceConfig,
    http_client: reqwest::Client,
}

impl GoogleNewsSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn fetch_page(&self, query: &str) -> Result<String> {
        let response = self
            .http_client
            .get(&self.config.search_url)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl HeadlineSource for GoogleNewsSource {
    async fn fetch(&self, query: &str) -> Result<Vec<String>, PipelineError> {
        info!("Fetching headlines for '{}'", query);

        let html = self.fetch_page(query).await.map_err(|e| {
            warn!("Headline fetch failed: {:#}", e);
            PipelineError::fetch(e)
        })?;

        let headlines =
            extract_headlines(&html, self.config.max_headlines).map_err(PipelineError::fetch)?;

        debug!(count = headlines.len(), "Extracted headlines");
        Ok(headlines)
    }
}

/// Take the trimmed text of the first `max` non-empty `<h3>` elements.
pub fn extract_headlines(html: &str, max: usize) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h3").map_err(|e| anyhow!("Invalid selector: {:?}", e))?;

    let headlines = document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|title| !title.is_empty())
        .take(max)
        .collect();

    Ok(headlines)
}
