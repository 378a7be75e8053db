//! Spoken narration of a report's conclusion.
//!
//! Narration is best effort: any synthesis or write failure is logged and
//! reported through [`NarrationOutcome`], never as an error.

use crate::error::PipelineError;
use crate::speech::SpeechSynthesizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Marker placed in the report's `Audio` field.
pub const AUDIO_PLACEHOLDER: &str = "[Play Hindi Speech]";

/// Build the narration sentence for a company.
pub fn narration_text(company: &str) -> String {
    format!(
        "{} के नवीनतम समाचार कवरेज में आशावाद और चुनौतियों का मिश्रण है।",
        company
    )
}

/// What happened when narration was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// Audio was written to the given path.
    Saved(PathBuf),
    /// Narration is disabled.
    Skipped,
    /// Synthesis or writing failed; the message has already been logged.
    Failed(String),
}

/// Turns a company name into an audio file through a [`SpeechSynthesizer`].
pub struct NarrationBuilder {
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    language: String,
    output_path: PathBuf,
}

impl NarrationBuilder {
    /// Narrator writing to `output_path`. The file is overwritten on every call.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        language: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            synthesizer: Some(synthesizer),
            language: language.into(),
            output_path: output_path.into(),
        }
    }

    /// Narrator that never produces audio.
    pub fn disabled() -> Self {
        Self {
            synthesizer: None,
            language: String::new(),
            output_path: PathBuf::new(),
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.synthesizer.as_ref().map(|_| self.output_path.as_path())
    }

    /// Synthesize and save the narration for `company`.
    pub async fn narrate(&self, company: &str) -> NarrationOutcome {
        let Some(synthesizer) = &self.synthesizer else {
            return NarrationOutcome::Skipped;
        };

        let text = narration_text(company);

        let result = match synthesizer.synthesize(&text, &self.language).await {
            Ok(audio) => tokio::fs::write(&self.output_path, audio)
                .await
                .map_err(|e| {
                    PipelineError::Narration(format!(
                        "failed to write {}: {}",
                        self.output_path.display(),
                        e
                    ))
                }),
            Err(e) => Err(PipelineError::Narration(format!("{:#}", e))),
        };

        match result {
            Ok(()) => {
                info!("Audio saved as {}", self.output_path.display());
                NarrationOutcome::Saved(self.output_path.clone())
            }
            Err(e) => {
                warn!("{}", e);
                NarrationOutcome::Failed(e.to_string())
            }
        }
    }
}
