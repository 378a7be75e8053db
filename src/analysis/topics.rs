//! Sentiment-driven topic assignment.

use crate::models::Sentiment;

/// The fixed topic vocabulary, in assignment order.
pub static TOPIC_VOCABULARY: [&str; 5] = [
    "Stock Market",
    "Electric Vehicles",
    "Regulations",
    "Innovation",
    "Autonomous Vehicles",
];

/// The topic that drives the "Common Topics" list of a report.
pub const COMMON_TOPIC: &str = "Electric Vehicles";

/// Topics assigned to an article with the given sentiment.
///
/// The returned slice preserves vocabulary order.
pub fn assign(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Positive => &TOPIC_VOCABULARY[..3],
        Sentiment::Negative => &TOPIC_VOCABULARY[3..],
        Sentiment::Neutral => &TOPIC_VOCABULARY[1..3],
    }
}

/// Owned copy of [`assign`], ready to store in an article record.
pub fn assign_owned(sentiment: Sentiment) -> Vec<String> {
    assign(sentiment).iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_topics() {
        assert_eq!(
            assign(Sentiment::Positive),
            &["Stock Market", "Electric Vehicles", "Regulations"]
        );
    }

    #[test]
    fn test_negative_topics() {
        assert_eq!(
            assign(Sentiment::Negative),
            &["Innovation", "Autonomous Vehicles"]
        );
    }

    #[test]
    fn test_neutral_topics() {
        assert_eq!(
            assign(Sentiment::Neutral),
            &["Electric Vehicles", "Regulations"]
        );
    }

    #[test]
    fn test_cardinality_and_vocabulary_membership() {
        let expected = [
            (Sentiment::Positive, 3),
            (Sentiment::Negative, 2),
            (Sentiment::Neutral, 2),
        ];

        for (sentiment, size) in expected {
            let topics = assign(sentiment);
            assert_eq!(topics.len(), size, "{}", sentiment);
            assert!(topics.iter().all(|t| TOPIC_VOCABULARY.contains(t)));
        }
    }

    #[test]
    fn test_common_topic_is_in_vocabulary() {
        assert_eq!(TOPIC_VOCABULARY[1], COMMON_TOPIC);
    }
}
