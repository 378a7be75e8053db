//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.newspulse.toml` files.

use crate::cli::OutputFormat;
use crate::source::SourceConfig;
use crate::speech::SpeechConfig;
use crate::summarizer::SummarizerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".newspulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Headline source settings.
    #[serde(default)]
    pub source: SourceSettings,

    /// Summarizer settings.
    #[serde(default)]
    pub summarizer: SummarizerSettings,

    /// Speech settings.
    #[serde(default)]
    pub speech: SpeechSettings,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report output path. Derived from the format when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Headline source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Search page queried with `?q=<company>`.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Number of headlines taken from the top of the results.
    #[serde(default = "default_max_headlines")]
    pub max_headlines: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_source_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with search requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            max_headlines: default_max_headlines(),
            timeout_seconds: default_source_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_search_url() -> String {
    "https://news.google.com/search".to_string()
}

fn default_max_headlines() -> usize {
    5
}

fn default_source_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("newspulse/{}", env!("CARGO_PKG_VERSION"))
}

/// Which summarizer to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// Ollama-hosted language model
    #[default]
    Ollama,
    /// First words of the headline, no model needed
    Extractive,
}

/// Summarizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerSettings {
    /// Summarization backend.
    #[serde(default)]
    pub backend: SummarizerBackend,

    /// Ollama API URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Ollama model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Minimum summary length in words.
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum summary length in words.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Temperature for generation.
    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_summarizer_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            backend: SummarizerBackend::default(),
            ollama_url: default_ollama_url(),
            model: default_model(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            temperature: 0.0,
            timeout_seconds: default_summarizer_timeout(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_min_length() -> usize {
    10
}

fn default_max_length() -> usize {
    50
}

fn default_summarizer_timeout() -> u64 {
    120
}

/// Speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Generate the spoken summary.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Language code passed to the synthesizer.
    #[serde(default = "default_language")]
    pub language: String,

    /// Audio file, overwritten on every run.
    #[serde(default = "default_audio_output")]
    pub output_path: PathBuf,

    /// Text-to-speech endpoint.
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_language(),
            output_path: default_audio_output(),
            tts_url: default_tts_url(),
            timeout_seconds: default_speech_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "hi".to_string()
}

fn default_audio_output() -> PathBuf {
    PathBuf::from("output.mp3")
}

fn default_tts_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_speech_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.source.max_headlines == 0 {
            anyhow::bail!("source.max_headlines must be at least 1");
        }
        if self.summarizer.min_length > self.summarizer.max_length {
            anyhow::bail!(
                "summarizer.min_length ({}) exceeds summarizer.max_length ({})",
                self.summarizer.min_length,
                self.summarizer.max_length
            );
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // General settings
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        // Source settings
        if let Some(ref url) = args.search_url {
            self.source.search_url = url.clone();
        }
        if let Some(max) = args.max_headlines {
            self.source.max_headlines = max;
        }

        // Summarizer settings
        if let Some(backend) = args.summarizer {
            self.summarizer.backend = backend;
        }
        if let Some(ref url) = args.ollama_url {
            self.summarizer.ollama_url = url.clone();
        }
        if let Some(ref model) = args.model {
            self.summarizer.model = model.clone();
        }

        // Timeout applies to every network collaborator
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
            self.summarizer.timeout_seconds = timeout;
            self.speech.timeout_seconds = timeout;
        }

        // Speech settings
        if let Some(ref language) = args.language {
            self.speech.language = language.clone();
        }
        if let Some(ref path) = args.audio_output {
            self.speech.output_path = path.clone();
        }
        if args.no_audio {
            self.speech.enabled = false;
        }
    }

    /// Log level from the merged verbosity settings. `quiet` always wins.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Effective report output path.
    pub fn output_path(&self) -> PathBuf {
        self.general
            .output
            .clone()
            .unwrap_or_else(|| self.general.format.default_output())
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            search_url: self.source.search_url.clone(),
            max_headlines: self.source.max_headlines,
            timeout_seconds: self.source.timeout_seconds,
            user_agent: self.source.user_agent.clone(),
        }
    }

    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            ollama_url: self.summarizer.ollama_url.clone(),
            model_name: self.summarizer.model.clone(),
            temperature: self.summarizer.temperature,
            timeout_seconds: self.summarizer.timeout_seconds,
            min_length: self.summarizer.min_length,
            max_length: self.summarizer.max_length,
        }
    }

    pub fn speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            enabled: self.speech.enabled,
            language: self.speech.language.clone(),
            output_path: self.speech.output_path.clone(),
            tts_url: self.speech.tts_url.clone(),
            timeout_seconds: self.speech.timeout_seconds,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.max_headlines, 5);
        assert_eq!(config.summarizer.backend, SummarizerBackend::Ollama);
        assert_eq!(config.summarizer.min_length, 10);
        assert_eq!(config.summarizer.max_length, 50);
        assert_eq!(config.speech.language, "hi");
        assert_eq!(config.output_path(), PathBuf::from("news_report.json"));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
format = "markdown"
verbose = true

[source]
max_headlines = 8

[summarizer]
backend = "extractive"
model = "mistral:7b"

[speech]
enabled = false
language = "en"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert!(config.general.verbose);
        assert_eq!(config.source.max_headlines, 8);
        assert_eq!(config.source.search_url, "https://news.google.com/search");
        assert_eq!(config.summarizer.backend, SummarizerBackend::Extractive);
        assert_eq!(config.summarizer.model, "mistral:7b");
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.language, "en");
        assert_eq!(config.output_path(), PathBuf::from("news_report.md"));
    }

    #[test]
    fn test_load_rejects_inverted_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[summarizer]\nmin_length = 60\nmax_length = 20\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let args = Args::try_parse_from([
            "newspulse",
            "--company",
            "Tesla",
            "--timeout",
            "5",
            "--no-audio",
            "--max-headlines",
            "3",
            "--output",
            "custom.json",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_args(&args);

        assert_eq!(config.source.max_headlines, 3);
        assert_eq!(config.source.timeout_seconds, 5);
        assert_eq!(config.summarizer.timeout_seconds, 5);
        assert_eq!(config.speech.timeout_seconds, 5);
        assert!(!config.speech.enabled);
        assert_eq!(config.output_path(), PathBuf::from("custom.json"));
        // Untouched settings keep their defaults.
        assert_eq!(config.speech.language, "hi");
    }

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["newspulse", "--company", "Tesla"]).unwrap();
        let mut config = Config::default();
        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::INFO);

        let args =
            Args::try_parse_from(["newspulse", "--company", "Tesla", "--verbose"]).unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::DEBUG);
        assert_eq!(config.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_verbose_from_config_file() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = Args::try_parse_from(["newspulse", "--company", "Tesla"]).unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::DEBUG);

        let args =
            Args::try_parse_from(["newspulse", "--company", "Tesla", "--quiet"]).unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.log_level(args.quiet), tracing::Level::ERROR);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[summarizer]"));
        assert!(toml_str.contains("[speech]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.source.max_headlines, 5);
    }
}
