//! Summarization through a local Ollama server.
//!
//! Each headline is sent as a single non-streaming chat request. The
//! system prompt bounds the summary length in words.

use crate::summarizer::Summarizer;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the Ollama summarizer.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    /// Lower bound on summary length, in words.
    pub min_length: usize,
    /// Upper bound on summary length, in words.
    pub max_length: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model_name: "llama3.2:latest".to_string(),
            temperature: 0.0,
            timeout_seconds: 120,
            min_length: 10,
            max_length: 50,
        }
    }
}

/// Message in the chat history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Ollama chat API request.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: usize,
}

/// Ollama chat API response.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

/// Summarizer backed by an Ollama chat model.
pub struct OllamaSummarizer {
    config: SummarizerConfig,
    http_client: reqwest::Client,
}

impl OllamaSummarizer {
    /// Create a summarizer; the HTTP client is built once and reused.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        info!(
            "Initializing summarizer with model {} at {}",
            config.model_name, config.ollama_url
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn system_prompt(&self) -> String {
        format!(
            "You summarize news headlines. Reply with a single plain-text summary of \
             between {} and {} words. Do not add commentary, quotes or markdown.",
            self.config.min_length, self.config.max_length
        )
    }

    fn build_request(&self, text: &str) -> OllamaChatRequest {
        OllamaChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                // Tokens, not words; leave headroom.
                num_predict: self.config.max_length * 2,
            },
        }
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.config.ollama_url);
        let request = self.build_request(text);

        debug!("Requesting summary from {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Request timed out after {}s", self.config.timeout_seconds)
                } else if e.is_connect() {
                    anyhow::anyhow!(
                        "Cannot connect to Ollama at {}. Is Ollama running?",
                        self.config.ollama_url
                    )
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Ollama API error {}: {}", status, body);
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        let summary = clean_summary(&chat_response.message.content);
        if summary.is_empty() {
            bail!("Model returned an empty summary");
        }

        Ok(summary)
    }

    fn name(&self) -> &str {
        &self.config.model_name
    }
}

/// Collapse whitespace and strip wrapping quotes from a model reply.
fn clean_summary(raw: &str) -> String {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    joined.trim_matches(|c| c == '"' || c == '\'').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_config_default() {
        let config = SummarizerConfig::default();
        assert_eq!(config.min_length, 10);
        assert_eq!(config.max_length, 50);
        assert_eq!(config.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_request_shape() {
        let summarizer = OllamaSummarizer::new(SummarizerConfig::default()).unwrap();
        let request = summarizer.build_request("Tesla recalls vehicles");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Tesla recalls vehicles");
        assert_eq!(json["options"]["num_predict"], 100);
        assert!(json["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("between 10 and 50 words"));
    }

    #[test]
    fn test_clean_summary() {
        assert_eq!(
            clean_summary("  \"Tesla shares\n rise sharply\"  "),
            "Tesla shares rise sharply"
        );
        assert_eq!(clean_summary("   "), "");
    }
}
