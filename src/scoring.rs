//! Sentiment polarity scoring.
//!
//! The analyzer only needs a signed scalar per text; [`VaderScorer`]
//! provides one from the VADER lexicon's compound score.

use anyhow::Result;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Produces a signed polarity for a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Positive values lean positive, negative values lean negative.
    fn polarity(&self, text: &str) -> Result<f64>;
}

/// Lexicon-based scorer using VADER's compound score in `[-1.0, 1.0]`.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> Result<f64> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        let scores = self.analyzer.polarity_scores(text);
        Ok(scores.get("compound").copied().unwrap_or(0.0))
    }
}
