//! Request handling: company name in, report out.
//!
//! Wires the headline source, the article analyzer and the report aggregator
//! together. Each step runs to completion before the next starts and the
//! first error ends the request.

use crate::analysis::aggregator::AggregatedReport;
use crate::analysis::{ArticleAnalyzer, ReportAggregator};
use crate::error::PipelineError;
use crate::source::HeadlineSource;
use std::sync::Arc;
use tracing::{info, warn};

/// One configured analysis pipeline. Collaborators are built once and reused
/// for every request.
pub struct NewsPipeline {
    source: Arc<dyn HeadlineSource>,
    analyzer: ArticleAnalyzer,
    aggregator: ReportAggregator,
}

impl NewsPipeline {
    pub fn new(
        source: Arc<dyn HeadlineSource>,
        analyzer: ArticleAnalyzer,
        aggregator: ReportAggregator,
    ) -> Self {
        Self {
            source,
            analyzer,
            aggregator,
        }
    }

    /// Fetch, analyze and aggregate the news for `company`.
    pub async fn run(&self, company: &str) -> Result<AggregatedReport, PipelineError> {
        let company = validate_company(company)?;

        let headlines = self.source.fetch(company).await?;
        info!("Fetched {} headlines for {}", headlines.len(), company);
        if headlines.is_empty() {
            warn!("No headlines found for {}", company);
        }

        let articles = self.analyzer.analyze(&headlines).await?;
        self.aggregator.aggregate(company, articles).await
    }
}

/// Trim the company name and reject blank input.
pub fn validate_company(company: &str) -> Result<&str, PipelineError> {
    let company = company.trim();
    if company.is_empty() {
        return Err(PipelineError::InvalidRequest);
    }
    Ok(company)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use crate::scoring::SentimentScorer;
    use crate::speech::{NarrationBuilder, NarrationOutcome, SpeechSynthesizer};
    use crate::summarizer::Summarizer;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource(Result<Vec<String>, String>);

    #[async_trait]
    impl HeadlineSource for FixedSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>, PipelineError> {
            self.0.clone().map_err(PipelineError::fetch)
        }
    }

    struct UpperSummarizer;

    #[async_trait]
    impl Summarizer for UpperSummarizer {
        async fn summarize(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    /// "GOOD" scores positive, "BAD" negative, anything else zero.
    struct KeywordScorer;

    impl SentimentScorer for KeywordScorer {
        fn polarity(&self, text: &str) -> Result<f64> {
            Ok(if text.contains("GOOD") {
                0.5
            } else if text.contains("BAD") {
                -0.5
            } else {
                0.0
            })
        }
    }

    struct CountingSynthesizer(AtomicUsize);

    #[async_trait]
    impl SpeechSynthesizer for CountingSynthesizer {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0xFF, 0xFB])
        }
    }

    fn pipeline(
        source: FixedSource,
        synthesizer: Arc<CountingSynthesizer>,
        dir: &tempfile::TempDir,
    ) -> NewsPipeline {
        let analyzer = ArticleAnalyzer::new(Arc::new(UpperSummarizer), Arc::new(KeywordScorer));
        let narrator = NarrationBuilder::new(synthesizer, "hi", dir.path().join("output.mp3"));
        NewsPipeline::new(Arc::new(source), analyzer, ReportAggregator::new(narrator))
    }

    fn headlines(items: &[&str]) -> FixedSource {
        FixedSource(Ok(items.iter().map(|s| s.to_string()).collect()))
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(CountingSynthesizer(AtomicUsize::new(0)));
        let pipeline = pipeline(
            headlines(&["good quarter", "bad recall", "new office", "good launch"]),
            synthesizer.clone(),
            &dir,
        );

        let AggregatedReport { report, narration } = pipeline.run("  Tesla ").await.unwrap();

        assert_eq!(report.company, "Tesla");
        assert_eq!(report.articles.len(), 4);
        assert_eq!(report.articles[1].summary, "BAD RECALL");
        assert_eq!(report.articles[2].sentiment, Sentiment::Neutral);

        let score = &report.comparative_score;
        assert_eq!(score.counts.positive, 2);
        assert_eq!(score.counts.negative, 1);
        assert_eq!(score.counts.neutral, 1);
        assert_eq!(score.distribution.positive, 50.0);
        assert_eq!(score.distribution.negative, 25.0);
        assert_eq!(score.distribution.neutral, 25.0);

        assert_eq!(report.topic_overlap.unique_positive, vec!["Stock Market"]);
        assert_eq!(synthesizer.0.load(Ordering::SeqCst), 1);
        assert_eq!(
            narration,
            NarrationOutcome::Saved(dir.path().join("output.mp3"))
        );
        assert!(dir.path().join("output.mp3").exists());
    }

    #[tokio::test]
    async fn test_blank_company_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(CountingSynthesizer(AtomicUsize::new(0)));
        let pipeline = pipeline(headlines(&["good"]), synthesizer.clone(), &dir);

        let err = pipeline.run("   ").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest));
        assert_eq!(synthesizer.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_is_surfaced_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(CountingSynthesizer(AtomicUsize::new(0)));
        let source = FixedSource(Err("404 Not Found".to_string()));
        let pipeline = pipeline(source, synthesizer.clone(), &dir);

        let err = pipeline.run("Tesla").await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching news: 404 Not Found");
        assert_eq!(synthesizer.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_in_band_fetch_error_poisons_batch() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(CountingSynthesizer(AtomicUsize::new(0)));
        let source = headlines(&["good quarter", "Error fetching news: timed out"]);
        let pipeline = pipeline(source, synthesizer.clone(), &dir);

        let err = pipeline.run("Tesla").await.unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(_)));
        assert_eq!(err.to_string(), "Error fetching news: timed out");
    }

    #[tokio::test]
    async fn test_no_headlines_is_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(CountingSynthesizer(AtomicUsize::new(0)));
        let pipeline = pipeline(headlines(&[]), synthesizer.clone(), &dir);

        let err = pipeline.run("Tesla").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput { .. }));
        assert_eq!(synthesizer.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validate_company() {
        assert_eq!(validate_company(" Acme Corp ").unwrap(), "Acme Corp");
        assert!(validate_company("").is_err());
    }
}
