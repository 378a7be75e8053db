//! Error types for the news analysis pipeline.
//!
//! Every failure that aborts a request is a [`PipelineError`]. Its
//! `Display` text is exactly what ends up in the `"error"` field of the
//! JSON error document.

use serde::Serialize;
use thiserror::Error;

/// Marker that a headline source embeds in a headline to signal a fetch failure.
pub const FETCH_ERROR_MARKER: &str = "Error fetching news:";

/// Errors that can abort a company analysis request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The request did not name a company.
    #[error("Company name is required")]
    InvalidRequest,

    /// The headline source could not be reached or answered with an error.
    /// The text is surfaced verbatim.
    #[error("{0}")]
    Fetch(String),

    /// The summarizer failed on a specific headline.
    #[error("Error processing article '{headline}': {reason}")]
    Summarization { headline: String, reason: String },

    /// The sentiment scorer failed on a specific headline.
    #[error("Error processing article '{headline}': {reason}")]
    Scoring { headline: String, reason: String },

    /// Nothing reached the aggregation step.
    #[error("No articles available to analyze for '{company}'")]
    EmptyInput { company: String },

    /// Speech synthesis failed. Recovered locally, never returned to callers.
    #[error("Error generating audio: {0}")]
    Narration(String),
}

impl PipelineError {
    /// Build a fetch error carrying the standard marker prefix.
    ///
    /// Uses the alternate form so `anyhow` errors keep their cause chain.
    pub fn fetch(reason: impl std::fmt::Display) -> Self {
        PipelineError::Fetch(format!("{} {:#}", FETCH_ERROR_MARKER, reason))
    }

    /// Returns the JSON error document for this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

/// Body returned in place of a report when a request fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
