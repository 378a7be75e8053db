//! Data models for the news analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing analyzed articles and reports.
//! Field names follow the JSON document consumed by the display layer,
//! so most fields carry an explicit `serde` rename.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete sentiment label of a summarized headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels, in report order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Returns an emoji representation of the sentiment.
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "🟢",
            Sentiment::Negative => "🔴",
            Sentiment::Neutral => "⚪",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// One successfully processed headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    /// The raw headline.
    #[serde(rename = "Title")]
    pub title: String,
    /// Summary produced by the summarizer.
    #[serde(rename = "Summary")]
    pub summary: String,
    /// Sentiment of the summary.
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    /// Topics assigned from the sentiment, in vocabulary order.
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
}

/// Number of articles per sentiment. All three keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    /// Tallies the sentiment labels of the given articles.
    pub fn from_articles(articles: &[AnalyzedArticle]) -> Self {
        let mut counts = Self::default();

        for article in articles {
            match article.sentiment {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Negative => counts.negative += 1,
                Sentiment::Neutral => counts.neutral += 1,
            }
        }

        counts
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Share of articles per sentiment, in percent with two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

/// A fixed statement contrasting how the coverage differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// The "Comparative Sentiment Score" block of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeSentimentScore {
    #[serde(rename = "Sentiment Distribution")]
    pub distribution: SentimentDistribution,
    #[serde(rename = "Sentiment Counts")]
    pub counts: SentimentCounts,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
}

/// Set comparison of topics across sentiment groups.
///
/// The unique-topic lists have set semantics; they are emitted sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common: Vec<String>,
    #[serde(rename = "Unique Topics in Positive Articles")]
    pub unique_positive: Vec<String>,
    #[serde(rename = "Unique Topics in Negative Articles")]
    pub unique_negative: Vec<String>,
}

/// The complete news sentiment report for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<AnalyzedArticle>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative_score: ComparativeSentimentScore,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_sentiment_analysis: String,
    /// Placeholder marker; audio bytes are never embedded.
    #[serde(rename = "Audio")]
    pub audio: String,
}
