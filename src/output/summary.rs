use crate::crawler::{CrawlOutcome, TraversalOptions};
use crate::graph::LinkGraph;
use crate::output::stats::GraphStatistics;
use chrono::{DateTime, Utc};

/// Everything the markdown summary reports about one run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,

    // Traversal settings
    pub search_order: String,
    pub max_items: usize,
    pub max_breadth: usize,
    pub max_depth: u32,
    pub effective_breadth: Option<usize>,
    pub on_fetch_error: String,

    // Results
    pub termination: String,
    pub items_discovered: usize,
    pub endnodes_pruned: bool,
    pub statistics: GraphStatistics,
}

impl CrawlSummary {
    /// Builds the summary of a finished run
    ///
    /// `graph` is the graph as written out, after any endnode pruning.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seed: &str,
        options: &TraversalOptions,
        outcome: &CrawlOutcome,
        graph: &LinkGraph,
        endnodes_pruned: bool,
        config_hash: &str,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seed: seed.to_string(),
            started_at,
            finished_at,
            config_hash: config_hash.to_string(),
            search_order: options.order.to_string(),
            max_items: options.budgets.max_items,
            max_breadth: options.budgets.max_breadth,
            max_depth: options.budgets.max_depth,
            effective_breadth: outcome.effective_breadth,
            on_fetch_error: options.on_fetch_error.as_str().to_string(),
            termination: outcome.termination.to_string(),
            items_discovered: outcome.items_discovered,
            endnodes_pruned,
            statistics: GraphStatistics::compute(graph, &outcome.depths),
        }
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
