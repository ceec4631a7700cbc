//! Wiki-Mapper: a bounded article link-graph explorer
//!
//! This crate explores the hyperlink graph of a wiki starting from a seed article,
//! expanding pages in breadth-first or depth-first order until one of its item,
//! branching, or depth budgets is spent. The resulting link graph can be pruned of
//! endnodes and exported for rendering.

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod graph;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Wiki-Mapper operations
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid state transition for {node}: {from} -> {to}")]
    InvalidTransition {
        node: String,
        from: state::NodeState,
        to: state::NodeState,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while retrieving a node's outbound links
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {node}: {source}")]
    Http { node: String, source: reqwest::Error },

    #[error("HTTP {status} for {node}")]
    Status { node: String, status: u16 },

    #[error("Request timeout for {node}")]
    Timeout { node: String },

    #[error("No article content found for {node}")]
    MissingContent { node: String },

    #[error("Cannot build a URL for {node}: {message}")]
    InvalidNode { node: String, message: String },

    #[error("Fetch failed for {node}: {message}")]
    Unavailable { node: String, message: String },
}

impl FetchError {
    /// Returns the node the failed fetch was made for
    pub fn node(&self) -> &str {
        match self {
            Self::Http { node, .. }
            | Self::Status { node, .. }
            | Self::Timeout { node }
            | Self::MissingContent { node }
            | Self::InvalidNode { node, .. }
            | Self::Unavailable { node, .. } => node,
        }
    }
}

/// Link graph construction errors
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Node already present in graph: {0}")]
    DuplicateNode(String),
}

/// Result type alias for Wiki-Mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Engine, SearchOrder, TraversalOptions};
pub use fetcher::LinkFetcher;
pub use graph::{prune_endnodes, DepthTable, LinkGraph, NodeId};
pub use state::NodeState;
