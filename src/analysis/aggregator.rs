//! Report aggregation and statistics.
//!
//! This module turns the analyzed articles for one company into the final
//! [`Report`]: sentiment counts and percentages, topic overlap between
//! sentiment groups, and the fixed narrative fields.

use crate::analysis::topics::COMMON_TOPIC;
use crate::error::PipelineError;
use crate::models::{
    AnalyzedArticle, ComparativeSentimentScore, CoverageDifference, Report, Sentiment,
    SentimentCounts, SentimentDistribution, TopicOverlap,
};
use crate::speech::narration::AUDIO_PLACEHOLDER;
use crate::speech::{NarrationBuilder, NarrationOutcome};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Fixed coverage statements, as `(comparison, impact)` pairs.
///
/// These are boilerplate report content and are not derived from the articles.
pub const COVERAGE_DIFFERENCES: [(&str, &str); 2] = [
    (
        "Article 1 highlights positive aspects, while others discuss challenges.",
        "Positive news can boost investor confidence, while negative news may indicate risks.",
    ),
    (
        "Articles cover financial growth, regulatory issues, and innovation.",
        "Provides a comprehensive view of the company's current standing.",
    ),
];

/// Builds the final sentence of a report.
pub fn final_sentiment_sentence(company: &str) -> String {
    format!(
        "{}'s latest news coverage indicates a mix of optimism and challenges.",
        company
    )
}

/// A report together with what happened to its narration.
#[derive(Debug, Clone)]
pub struct AggregatedReport {
    pub report: Report,
    pub narration: NarrationOutcome,
}

/// Assembles reports and triggers narration for each one.
pub struct ReportAggregator {
    narrator: NarrationBuilder,
}

impl ReportAggregator {
    pub fn new(narrator: NarrationBuilder) -> Self {
        Self { narrator }
    }

    /// Build the report for `company`. Narration runs before returning and
    /// its failure never fails the report.
    pub async fn aggregate(
        &self,
        company: &str,
        articles: Vec<AnalyzedArticle>,
    ) -> Result<AggregatedReport, PipelineError> {
        let report = build_report(company, articles)?;

        info!(
            "Built report for {} from {} articles",
            company,
            report.articles.len()
        );

        let narration = self.narrator.narrate(company).await;
        match &narration {
            NarrationOutcome::Saved(path) => debug!("Narration saved to {}", path.display()),
            NarrationOutcome::Skipped => debug!("Narration disabled"),
            NarrationOutcome::Failed(reason) => debug!("Narration skipped after failure: {}", reason),
        }

        Ok(AggregatedReport { report, narration })
    }
}

/// Build a report without narrating it.
pub fn build_report(company: &str, articles: Vec<AnalyzedArticle>) -> Result<Report, PipelineError> {
    let counts = SentimentCounts::from_articles(&articles);
    let distribution =
        sentiment_distribution(&counts).ok_or_else(|| PipelineError::EmptyInput {
            company: company.to_string(),
        })?;
    let topic_overlap = topic_overlap(&articles);

    Ok(Report {
        company: company.to_string(),
        articles,
        comparative_score: ComparativeSentimentScore {
            distribution,
            counts,
            coverage_differences: coverage_differences(),
        },
        topic_overlap,
        final_sentiment_analysis: final_sentiment_sentence(company),
        audio: AUDIO_PLACEHOLDER.to_string(),
    })
}

/// Percentage of articles per sentiment. `None` when there are no articles.
pub fn sentiment_distribution(counts: &SentimentCounts) -> Option<SentimentDistribution> {
    let total = counts.total();
    if total == 0 {
        return None;
    }

    let percent = |count: usize| round2(count as f64 / total as f64 * 100.0);

    Some(SentimentDistribution {
        positive: percent(counts.positive),
        negative: percent(counts.negative),
        neutral: percent(counts.neutral),
    })
}

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compare topic sets across sentiment groups.
pub fn topic_overlap(articles: &[AnalyzedArticle]) -> TopicOverlap {
    let has_common = articles
        .iter()
        .any(|a| a.topics.iter().any(|t| t == COMMON_TOPIC));

    TopicOverlap {
        common: if has_common {
            vec![COMMON_TOPIC.to_string()]
        } else {
            Vec::new()
        },
        unique_positive: unique_topics(articles, Sentiment::Positive),
        unique_negative: unique_topics(articles, Sentiment::Negative),
    }
}

/// Topics seen in articles with `sentiment` that never appear in any other article.
pub fn unique_topics(articles: &[AnalyzedArticle], sentiment: Sentiment) -> Vec<String> {
    let (inside, outside): (Vec<_>, Vec<_>) =
        articles.iter().partition(|a| a.sentiment == sentiment);

    let outside_topics: BTreeSet<&str> = outside
        .iter()
        .flat_map(|a| a.topics.iter().map(String::as_str))
        .collect();

    inside
        .iter()
        .flat_map(|a| a.topics.iter().map(String::as_str))
        .collect::<BTreeSet<&str>>()
        .difference(&outside_topics)
        .map(|t| t.to_string())
        .collect()
}

fn coverage_differences() -> Vec<CoverageDifference> {
    COVERAGE_DIFFERENCES
        .iter()
        .map(|(comparison, impact)| CoverageDifference {
            comparison: comparison.to_string(),
            impact: impact.to_string(),
        })
        .collect()
}
