use crate::crawler::FetchFailurePolicy;
use serde::Deserialize;

/// Main configuration structure for Wiki-Mapper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Article name the traversal starts from
    pub seed: String,

    /// Search order, either "breadth" or "depth"
    #[serde(rename = "search-first", default = "default_search_first")]
    pub search_first: String,

    /// Maximum number of newly discovered articles
    #[serde(rename = "max-items", default = "default_max_items")]
    pub max_items: u32,

    /// Maximum outbound links kept per article (0 = detect from the first discovery)
    #[serde(rename = "max-breadth", default)]
    pub max_breadth: u32,

    /// Maximum discovery depth, seed included (0 = unlimited)
    #[serde(rename = "max-depth", default)]
    pub max_depth: u32,

    /// Suppress progress notifications
    #[serde(default)]
    pub silent: bool,

    /// What to do when an article's links cannot be fetched
    #[serde(rename = "on-fetch-error", default)]
    pub on_fetch_error: FetchFailurePolicy,
}

/// Article fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Base URL article names are appended to
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Keep "List_of_..." articles among extracted links
    #[serde(rename = "keep-list-articles", default)]
    pub keep_list_articles: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            keep_list_articles: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON graph export
    #[serde(rename = "graph-path", default = "default_graph_path")]
    pub graph_path: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,

    /// Export the graph without removing endnodes
    #[serde(rename = "keep-endnodes", default)]
    pub keep_endnodes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_path: default_graph_path(),
            summary_path: default_summary_path(),
            keep_endnodes: false,
        }
    }
}

fn default_search_first() -> String {
    "breadth".to_string()
}

fn default_max_items() -> u32 {
    1000
}

fn default_base_url() -> String {
    "https://en.wikipedia.org/wiki/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_graph_path() -> String {
    "./graph.json".to_string()
}

fn default_summary_path() -> String {
    "./summary.md".to_string()
}
