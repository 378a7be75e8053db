//! NewsPulse - company news sentiment reports
//!
//! A CLI tool that fetches the latest headlines for a company,
//! summarizes and sentiment-tags each one, aggregates the results
//! into a report and renders a short spoken summary.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid input, fetch or analysis failure, I/O)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod pipeline;
mod report;
mod scoring;
mod source;
mod speech;
mod summarizer;

use analysis::aggregator::AggregatedReport;
use analysis::{ArticleAnalyzer, ReportAggregator};
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, SummarizerBackend, CONFIG_FILE_NAME};
use pipeline::NewsPipeline;
use scoring::VaderScorer;
use source::{GoogleNewsSource, HeadlineSource};
use speech::{GoogleTtsSynthesizer, NarrationBuilder, NarrationOutcome};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use summarizer::{ExtractiveSummarizer, OllamaSummarizer, Summarizer};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so the file can set verbosity
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    info!("NewsPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run_analysis(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .newspulse.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the news source, summarizer and speech output.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run one company analysis. Returns the exit code.
async fn run_analysis(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    let company = args.company_name().to_string();
    let source: Arc<dyn HeadlineSource> = Arc::new(GoogleNewsSource::new(config.source_config())?);

    // Handle --dry-run: fetch headlines and exit
    if args.dry_run {
        return handle_dry_run(source.as_ref(), &company).await;
    }

    // Build the collaborators once for this process
    let summarizer = build_summarizer(&config)?;
    let narrator = build_narrator(&config)?;

    println!("📰 Analyzing news for: {}", company);
    println!("   Source: {}", config.source.search_url);
    println!("   Summarizer: {}", summarizer.name());
    match narrator.output_path() {
        Some(path) => println!(
            "   Speech: {} → {}",
            config.speech.language,
            path.display()
        ),
        None => println!("   Speech: disabled"),
    }

    let analyzer = ArticleAnalyzer::new(summarizer, Arc::new(VaderScorer::new()))
        .with_progress(!args.quiet);
    let pipeline = NewsPipeline::new(source, analyzer, ReportAggregator::new(narrator));

    let format = config.general.format;
    let output_path = config.output_path();

    let AggregatedReport { report, narration } = match pipeline.run(&company).await {
        Ok(aggregated) => aggregated,
        Err(e) => {
            error!("{}", e);
            let document = match format {
                OutputFormat::Json => report::generate_json_error(&e)?,
                OutputFormat::Markdown => report::generate_markdown_error(&e),
            };
            report::write_output(&document, &output_path).with_context(|| {
                format!("Failed to write error report to {}", output_path.display())
            })?;
            eprintln!("\n❌ Error: {}", e);
            return Ok(1);
        }
    };

    // Render and save the report
    let output = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    report::write_output(&output, &output_path)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    let score = &report.comparative_score;
    println!("\n📊 Sentiment Summary:");
    println!("   Articles: {}", report.articles.len());
    println!(
        "   - 🟢 Positive: {} ({:.2}%) | 🔴 Negative: {} ({:.2}%) | ⚪ Neutral: {} ({:.2}%)",
        score.counts.positive,
        score.distribution.positive,
        score.counts.negative,
        score.distribution.negative,
        score.counts.neutral,
        score.distribution.neutral
    );
    println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    if args.play {
        match narration {
            NarrationOutcome::Saved(path) => play_audio(&path),
            NarrationOutcome::Skipped => warn!("Speech is disabled, nothing to play"),
            NarrationOutcome::Failed(_) => warn!("No audio was generated on this run"),
        }
    }

    Ok(0)
}

/// Handle --dry-run: fetch headlines, print them, exit.
async fn handle_dry_run(source: &dyn HeadlineSource, company: &str) -> Result<i32> {
    println!("\n🔍 Dry run: fetching headlines (no model calls)...\n");

    match source.fetch(company).await {
        Ok(headlines) if headlines.is_empty() => {
            println!("   No headlines found for {}.", company);
        }
        Ok(headlines) => {
            println!("   Found {} headlines:\n", headlines.len());
            for (i, headline) in headlines.iter().enumerate() {
                println!("     {}. {}", i + 1, headline);
            }
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            return Ok(1);
        }
    }

    println!("\n✅ Dry run complete. No summaries or audio were generated.");
    Ok(0)
}

/// Build the configured summarizer.
fn build_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match config.summarizer.backend {
        SummarizerBackend::Ollama => Arc::new(OllamaSummarizer::new(config.summarizer_config())?),
        SummarizerBackend::Extractive => {
            Arc::new(ExtractiveSummarizer::new(config.summarizer.max_length))
        }
    };
    Ok(summarizer)
}

/// Build the narrator, or a disabled one when speech is off.
fn build_narrator(config: &Config) -> Result<NarrationBuilder> {
    let speech = config.speech_config();
    if !speech.enabled {
        return Ok(NarrationBuilder::disabled());
    }

    let synthesizer = Arc::new(GoogleTtsSynthesizer::new(&speech)?);
    Ok(NarrationBuilder::new(
        synthesizer,
        speech.language,
        speech.output_path,
    ))
}

/// Open the audio file with the platform's default player.
fn play_audio(path: &Path) {
    if !path.exists() {
        warn!("No audio to play at {}", path.display());
        return;
    }

    let mut command = if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else {
        std::process::Command::new("xdg-open")
    };

    if let Err(e) = command.arg(path).spawn() {
        warn!("Failed to open {}: {}", path.display(), e);
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if let Some(ref config_path) = args.config {
        // Explicit config path must load
        Config::load(config_path)?
    } else {
        // Try default location
        match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE_NAME, e);
                Config::default()
            }
        }
    };

    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}
