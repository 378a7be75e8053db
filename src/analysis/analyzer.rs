//! Per-headline analysis.
//!
//! Headlines are processed one after another: summarize, score the summary,
//! classify, assign topics. The batch is all or nothing. A fetch-error
//! headline or any collaborator failure aborts the whole call and no partial
//! results are returned.

use crate::analysis::{classify, topics};
use crate::error::{PipelineError, FETCH_ERROR_MARKER};
use crate::models::AnalyzedArticle;
use crate::scoring::SentimentScorer;
use crate::summarizer::Summarizer;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs headlines through the summarizer and sentiment scorer.
pub struct ArticleAnalyzer {
    summarizer: Arc<dyn Summarizer>,
    scorer: Arc<dyn SentimentScorer>,
    show_progress: bool,
}

impl ArticleAnalyzer {
    pub fn new(summarizer: Arc<dyn Summarizer>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            summarizer,
            scorer,
            show_progress: false,
        }
    }

    /// Show a progress bar on stderr while headlines are processed.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Analyze every headline, preserving input order.
    pub async fn analyze(
        &self,
        headlines: &[String],
    ) -> Result<Vec<AnalyzedArticle>, PipelineError> {
        if let Some(failed) = headlines.iter().find(|h| h.contains(FETCH_ERROR_MARKER)) {
            return Err(PipelineError::Fetch(failed.clone()));
        }

        info!(
            "Analyzing {} headlines with {}",
            headlines.len(),
            self.summarizer.name()
        );

        let progress = self.progress_bar(headlines.len());
        let mut articles = Vec::with_capacity(headlines.len());

        for headline in headlines {
            progress.set_message(truncate(headline, 40));
            let article = match self.analyze_one(headline).await {
                Ok(article) => article,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };
            articles.push(article);
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(articles)
    }

    async fn analyze_one(&self, headline: &str) -> Result<AnalyzedArticle, PipelineError> {
        let summary = self
            .summarizer
            .summarize(headline)
            .await
            .map_err(|e| PipelineError::Summarization {
                headline: headline.to_string(),
                reason: format!("{:#}", e),
            })?;

        let polarity = self
            .scorer
            .polarity(&summary)
            .map_err(|e| PipelineError::Scoring {
                headline: headline.to_string(),
                reason: format!("{:#}", e),
            })?;

        let sentiment = classify(polarity);
        debug!(%sentiment, polarity, "Scored '{}'", headline);

        Ok(AnalyzedArticle {
            title: headline.to_string(),
            summary,
            sentiment,
            topics: topics::assign_owned(sentiment),
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns "summary of <headline>" and counts calls.
    struct EchoSummarizer {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl EchoSummarizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(headline: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Some(headline),
            }
        }
    }

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(text) {
                return Err(anyhow!("model crashed"));
            }
            Ok(format!("summary of {}", text))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    /// Looks up polarity by summary text.
    struct TableScorer(HashMap<String, f64>);

    impl TableScorer {
        fn new(entries: &[(&str, f64)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(headline, p)| (format!("summary of {}", headline), *p))
                    .collect(),
            )
        }
    }

    impl SentimentScorer for TableScorer {
        fn polarity(&self, text: &str) -> Result<f64> {
            self.0
                .get(text)
                .copied()
                .ok_or_else(|| anyhow!("no score for '{}'", text))
        }
    }

    fn headlines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_analyze_builds_records_in_order() {
        let scorer = TableScorer::new(&[("Up", 0.4), ("Down", -0.2), ("Flat", 0.0)]);
        let analyzer = ArticleAnalyzer::new(Arc::new(EchoSummarizer::new()), Arc::new(scorer));

        let articles =
            tokio_test::block_on(analyzer.analyze(&headlines(&["Up", "Down", "Flat"]))).unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Up");
        assert_eq!(articles[0].summary, "summary of Up");
        assert_eq!(articles[0].sentiment, Sentiment::Positive);
        assert_eq!(
            articles[0].topics,
            vec!["Stock Market", "Electric Vehicles", "Regulations"]
        );
        assert_eq!(articles[1].sentiment, Sentiment::Negative);
        assert_eq!(articles[1].topics, vec!["Innovation", "Autonomous Vehicles"]);
        assert_eq!(articles[2].sentiment, Sentiment::Neutral);
        assert_eq!(articles[2].topics, vec!["Electric Vehicles", "Regulations"]);
    }

    #[test]
    fn test_scorer_sees_summary_not_headline() {
        // Only the summary text is in the table; scoring the raw headline would fail.
        let scorer = TableScorer::new(&[("Headline", 1.0)]);
        let analyzer = ArticleAnalyzer::new(Arc::new(EchoSummarizer::new()), Arc::new(scorer));

        let articles =
            tokio_test::block_on(analyzer.analyze(&headlines(&["Headline"]))).unwrap();
        assert_eq!(articles[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_fetch_marker_fails_whole_batch() {
        let summarizer = Arc::new(EchoSummarizer::new());
        let scorer = TableScorer::new(&[("Real headline", 0.5)]);
        let analyzer = ArticleAnalyzer::new(summarizer.clone(), Arc::new(scorer));

        let batch = headlines(&[
            "Real headline",
            "Error fetching news: 503 Service Unavailable",
        ]);
        let err = tokio_test::block_on(analyzer.analyze(&batch)).unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(_)));
        assert_eq!(
            err.to_string(),
            "Error fetching news: 503 Service Unavailable"
        );
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_summarizer_failure_names_headline() {
        let summarizer = Arc::new(EchoSummarizer::failing_on("Second"));
        let scorer = TableScorer::new(&[("First", 0.1), ("Second", 0.1), ("Third", 0.1)]);
        let analyzer = ArticleAnalyzer::new(summarizer.clone(), Arc::new(scorer));

        let err =
            tokio_test::block_on(analyzer.analyze(&headlines(&["First", "Second", "Third"])))
                .unwrap_err();

        assert!(matches!(err, PipelineError::Summarization { .. }));
        assert_eq!(
            err.to_string(),
            "Error processing article 'Second': model crashed"
        );
        // Processing stops at the failing headline.
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_scorer_failure_fails_batch() {
        let scorer = TableScorer::new(&[("Known", 0.3)]);
        let analyzer = ArticleAnalyzer::new(Arc::new(EchoSummarizer::new()), Arc::new(scorer));

        let err = tokio_test::block_on(analyzer.analyze(&headlines(&["Known", "Unknown"])))
            .unwrap_err();

        match err {
            PipelineError::Scoring { headline, .. } => assert_eq!(headline, "Unknown"),
            other => panic!("expected scoring error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_batch_is_empty() {
        let analyzer = ArticleAnalyzer::new(
            Arc::new(EchoSummarizer::new()),
            Arc::new(TableScorer::new(&[])),
        );
        let articles = tokio_test::block_on(analyzer.analyze(&[])).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd…");
    }
}
