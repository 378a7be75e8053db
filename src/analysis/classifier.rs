//! Polarity to sentiment label mapping.

use crate::models::Sentiment;

/// Map a signed polarity scalar to a sentiment label.
///
/// Strictly positive is `Positive`, strictly negative is `Negative`,
/// everything else (zero, and NaN) is `Neutral`.
pub fn classify(polarity: f64) -> Sentiment {
    if polarity > 0.0 {
        Sentiment::Positive
    } else if polarity < 0.0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
