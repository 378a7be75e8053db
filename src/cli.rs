//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Settings left unset here fall back to the
//! configuration file, then to built-in defaults.

use crate::config::SummarizerBackend;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// NewsPulse - company news sentiment reports
///
/// Fetches the latest headlines for a company, summarizes each one,
/// tags its sentiment and topics, and writes a JSON or Markdown report
/// together with a short spoken summary.
///
/// Examples:
///   newspulse --company Tesla
///   newspulse --company Tesla --format markdown --output tesla.md
///   newspulse --company Tesla --summarizer extractive --no-audio
///   newspulse --company Tesla --dry-run
///   newspulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Company name to analyze
    #[arg(short, long, value_name = "NAME", required_unless_present = "init_config")]
    pub company: Option<String>,

    /// Output file path for the report
    ///
    /// Defaults to news_report.json or news_report.md depending on --format.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .newspulse.toml in the current directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of headlines to analyze
    #[arg(long, value_name = "COUNT")]
    pub max_headlines: Option<usize>,

    /// News search page URL
    #[arg(long, value_name = "URL")]
    pub search_url: Option<String>,

    /// Summarization backend (ollama, extractive)
    #[arg(long, value_name = "BACKEND")]
    pub summarizer: Option<SummarizerBackend>,

    /// Ollama API endpoint URL
    #[arg(long, env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Ollama model used for summaries
    #[arg(short, long, env = "NEWSPULSE_MODEL")]
    pub model: Option<String>,

    /// Request timeout in seconds for every network call
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Language code for the spoken summary
    #[arg(long, value_name = "CODE")]
    pub language: Option<String>,

    /// Where to save the spoken summary (overwritten on every run)
    #[arg(long, value_name = "FILE")]
    pub audio_output: Option<PathBuf>,

    /// Skip speech synthesis
    #[arg(long, conflicts_with = "play")]
    pub no_audio: bool,

    /// Open the audio file with the system player after the report is written
    #[arg(long)]
    pub play: bool,

    /// Dry run: fetch and list headlines without summarizing or scoring
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .newspulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Markdown format
    Markdown,
}

impl OutputFormat {
    /// Default report file name for this format.
    pub fn default_output(&self) -> PathBuf {
        match self {
            OutputFormat::Json => PathBuf::from("news_report.json"),
            OutputFormat::Markdown => PathBuf::from("news_report.md"),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the company name (should be validated first).
    pub fn company_name(&self) -> &str {
        self.company.as_deref().map(str::trim).unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.company_name().is_empty() {
            return Err("Company name is required".to_string());
        }

        for (name, url) in [
            ("Search URL", &self.search_url),
            ("Ollama URL", &self.ollama_url),
        ] {
            if let Some(url) = url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(format!("{} must start with 'http://' or 'https://'", name));
                }
            }
        }

        if self.max_headlines == Some(0) {
            return Err("Max headlines must be at least 1".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if let Some(ref language) = self.language {
            if language.trim().is_empty() {
                return Err("Language code cannot be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }
}
