//! Output module for reporting mapped graphs
//!
//! This module handles:
//! - Computing graph statistics
//! - Exporting the link graph as JSON
//! - Generating markdown summaries of a run

mod json;
mod markdown;
pub mod stats;
mod summary;

pub use json::{write_graph_json, GraphExport, NodeExport};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, GraphStatistics};
pub use summary::CrawlSummary;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
