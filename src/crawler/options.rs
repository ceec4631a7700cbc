//! Traversal options
//!
//! The search order, the three budgets, and the policy for failed fetches.

use crate::config::{CrawlerConfig, FetcherConfig};
use crate::MapperError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Order in which discovered nodes are expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOrder {
    /// Expand every pending node's links before moving a level deeper
    Breadth,
    /// Follow one new link per node, extending a single branch at a time
    Depth,
}

impl SearchOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breadth => "breadth",
            Self::Depth => "depth",
        }
    }
}

impl FromStr for SearchOrder {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breadth" => Ok(Self::Breadth),
            "depth" => Ok(Self::Depth),
            other => Err(MapperError::InvalidConfiguration(format!(
                "unexpected search order '{}', expected one of 'breadth' or 'depth'",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the engine does when a node's links cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Treat the node as having no outbound links and carry on
    #[default]
    Skip,
    /// Stop the traversal and report the error
    Abort,
}

impl FetchFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        }
    }
}

/// Resource limits of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Newly discovered nodes allowed across the run
    pub max_items: usize,
    /// Links retained per node; 0 takes the first discovery's out-degree
    pub max_breadth: usize,
    /// Nodes at this depth or deeper are never expanded; 0 is unlimited
    pub max_depth: u32,
}

impl Budgets {
    pub fn new(max_items: usize, max_breadth: usize, max_depth: u32) -> Self {
        Self {
            max_items,
            max_breadth,
            max_depth,
        }
    }

    /// Returns true if the branching limit is detected from the data
    pub fn detects_breadth(&self) -> bool {
        self.max_breadth == 0
    }

    /// Returns true if a node at `depth` must not be expanded
    pub fn is_depth_bounded(&self, depth: u32) -> bool {
        self.max_depth > 0 && depth >= self.max_depth
    }
}

/// Everything the engine needs besides the seed and the fetcher
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    pub order: SearchOrder,
    pub budgets: Budgets,
    pub on_fetch_error: FetchFailurePolicy,
    /// Upper bound on a single fetch
    pub fetch_timeout: Duration,
    /// Suppress progress notifications
    pub silent: bool,
}

impl TraversalOptions {
    pub fn new(order: SearchOrder, budgets: Budgets) -> Self {
        Self {
            order,
            budgets,
            on_fetch_error: FetchFailurePolicy::default(),
            fetch_timeout: Duration::from_secs(30),
            silent: false,
        }
    }

    pub fn with_fetch_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.on_fetch_error = policy;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Builds options from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TraversalOptions)` - Options ready for the engine
    /// * `Err(MapperError::InvalidConfiguration)` - The search order is not
    ///   `breadth` or `depth`
    pub fn from_config(
        crawler: &CrawlerConfig,
        fetcher: &FetcherConfig,
    ) -> Result<Self, MapperError> {
        let order = crawler.search_first.parse()?;
        let budgets = Budgets::new(
            crawler.max_items as usize,
            crawler.max_breadth as usize,
            crawler.max_depth,
        );

        Ok(Self::new(order, budgets)
            .with_fetch_policy(crawler.on_fetch_error)
            .with_fetch_timeout(Duration::from_secs(
                fetcher.timeout_secs + fetcher.connect_timeout_secs,
            ))
            .silent(crawler.silent))
    }
}
