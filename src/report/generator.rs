//! Markdown and JSON report generation.
//!
//! The Markdown layout follows what the interactive display shows: company,
//! one block per article, sentiment score, coverage differences, topic
//! overlap, final analysis and audio.

use crate::error::PipelineError;
use crate::models::{AnalyzedArticle, ComparativeSentimentScore, Report, Sentiment, TopicOverlap};
use anyhow::Result;
use chrono::Utc;
use std::path::Path;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Company News Sentiment Analysis\n\n");
    output.push_str(&format!("## Company: {}\n\n", report.company));

    output.push_str(&generate_articles_section(&report.articles));
    output.push_str(&generate_score_section(&report.comparative_score));
    output.push_str(&generate_overlap_section(&report.topic_overlap));

    output.push_str("## Final Sentiment Analysis\n\n");
    output.push_str(&report.final_sentiment_analysis);
    output.push_str("\n\n");

    output.push_str(&format!("## Audio\n\n{}\n\n", report.audio));

    output.push_str(&generate_footer());

    output
}

/// Generate the articles section.
fn generate_articles_section(articles: &[AnalyzedArticle]) -> String {
    let mut section = String::new();

    section.push_str("## Articles\n\n");

    for article in articles {
        section.push_str(&generate_article_block(article));
    }

    section
}

/// Generate a single article block.
fn generate_article_block(article: &AnalyzedArticle) -> String {
    let mut block = String::new();

    block.push_str(&format!("**Title:** {}\n\n", article.title));
    block.push_str(&format!("**Summary:** {}\n\n", article.summary));
    block.push_str(&format!(
        "**Sentiment:** {} {}\n\n",
        article.sentiment.emoji(),
        article.sentiment
    ));
    block.push_str(&format!("**Topics:** {}\n\n", article.topics.join(", ")));
    block.push_str("---\n\n");

    block
}

/// Generate the comparative sentiment score section.
fn generate_score_section(score: &ComparativeSentimentScore) -> String {
    let mut section = String::new();

    section.push_str("## Comparative Sentiment Score\n\n");
    section.push_str("| Sentiment | Articles | Share |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for sentiment in Sentiment::ALL {
        section.push_str(&format!(
            "| {} {} | {} | {:.2}% |\n",
            sentiment.emoji(),
            sentiment,
            score.counts.get(sentiment),
            score.distribution.get(sentiment)
        ));
    }
    section.push('\n');

    section.push_str("### Coverage Differences\n\n");
    for difference in &score.coverage_differences {
        section.push_str(&format!("**Comparison:** {}\n\n", difference.comparison));
        section.push_str(&format!("**Impact:** {}\n\n", difference.impact));
        section.push_str("---\n\n");
    }

    section
}

/// Generate the topic overlap section.
fn generate_overlap_section(overlap: &TopicOverlap) -> String {
    let mut section = String::new();

    section.push_str("## Topic Overlap\n\n");
    section.push_str(&format!(
        "- **Common Topics:** {}\n",
        join_or_none(&overlap.common)
    ));
    section.push_str(&format!(
        "- **Unique Topics in Positive Articles:** {}\n",
        join_or_none(&overlap.unique_positive)
    ));
    section.push_str(&format!(
        "- **Unique Topics in Negative Articles:** {}\n\n",
        join_or_none(&overlap.unique_negative)
    ));

    section
}

fn join_or_none(topics: &[String]) -> String {
    if topics.is_empty() {
        "None".to_string()
    } else {
        topics.join(", ")
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by NewsPulse on {}*\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Generate a Markdown document describing a failed request.
pub fn generate_markdown_error(error: &PipelineError) -> String {
    format!(
        "# Company News Sentiment Analysis\n\n**Error:** {}\n",
        error
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate the JSON error document, `{"error": "..."}`.
pub fn generate_json_error(error: &PipelineError) -> Result<String> {
    serde_json::to_string_pretty(&error.to_response()).map_err(Into::into)
}

/// Write rendered output to a file.
pub fn write_output(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
