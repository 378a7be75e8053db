//! Google Translate text-to-speech backend.

use crate::speech::SpeechSynthesizer;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Speech settings shared by the synthesizer and the narrator.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub language: String,
    pub output_path: PathBuf,
    pub tts_url: String,
    pub timeout_seconds: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "hi".to_string(),
            output_path: PathBuf::from("output.mp3"),
            tts_url: "https://translate.google.com/translate_tts".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Synthesizer calling the public translate TTS endpoint.
pub struct GoogleTtsSynthesizer {
    tts_url: String,
    http_client: reqwest::Client,
}

impl GoogleTtsSynthesizer {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            tts_url: config.tts_url.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        debug!("Synthesizing {} chars of speech in '{}'", text.len(), language);

        let response = self
            .http_client
            .get(&self.tts_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ])
            .send()
            .await
            .context("Failed to reach TTS service")?;

        if !response.status().is_success() {
            bail!("TTS service returned {}", response.status());
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read TTS response")?;
        if bytes.is_empty() {
            bail!("TTS service returned no audio");
        }

        Ok(bytes.to_vec())
    }
}
