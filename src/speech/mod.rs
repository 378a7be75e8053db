//! Speech synthesis and report narration.

pub mod google_tts;
pub mod narration;

pub use google_tts::{GoogleTtsSynthesizer, SpeechConfig};
pub use narration::{NarrationBuilder, NarrationOutcome};

use anyhow::Result;
use async_trait::async_trait;

/// Renders text as audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns encoded audio (MP3 for the bundled backend).
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}
