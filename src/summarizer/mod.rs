//! Headline summarization.
//!
//! The [`Summarizer`] trait is the seam between the analyzer and whatever
//! produces summaries. Two backends ship with the crate: an Ollama-hosted
//! model and a word-truncating fallback that works offline.

pub mod ollama;

pub use ollama::{OllamaSummarizer, SummarizerConfig};

use anyhow::{bail, Result};
use async_trait::async_trait;

/// Produces a shorter summary of a headline.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`, or fail.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Short human-readable backend name for logs.
    fn name(&self) -> &str;
}

/// Keeps the first `max_words` words of the text.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    max_words: usize,
}

impl ExtractiveSummarizer {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(1),
        }
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(self.max_words).collect();
        if words.is_empty() {
            bail!("Cannot summarize empty text");
        }
        Ok(words.join(" "))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractive_truncates_words() {
        let summarizer = ExtractiveSummarizer::new(3);
        let summary =
            tokio_test::block_on(summarizer.summarize("Tesla  opens new   factory in Berlin"))
                .unwrap();
        assert_eq!(summary, "Tesla opens new");
    }

    #[test]
    fn test_extractive_keeps_short_text() {
        let summarizer = ExtractiveSummarizer::new(50);
        let summary = tokio_test::block_on(summarizer.summarize("Markets rally")).unwrap();
        assert_eq!(summary, "Markets rally");
    }

    #[test]
    fn test_extractive_rejects_blank_text() {
        let summarizer = ExtractiveSummarizer::new(50);
        assert!(tokio_test::block_on(summarizer.summarize("   ")).is_err());
    }
}
