//! Analysis modules.
//!
//! Leaves first: polarity classification and topic assignment, then the
//! per-headline analyzer and the report aggregator built on top of them.

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod topics;

pub use aggregator::ReportAggregator;
pub use analyzer::ArticleAnalyzer;
pub use classifier::classify;
