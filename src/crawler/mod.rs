//! Traversal of the article link graph
//!
//! This module contains the bounded exploration logic, including:
//! - Search order, budgets and fetch failure policy
//! - The step-wise traversal engine
//! - Entry points that wire the engine to a configured fetcher

mod engine;
mod options;

pub use engine::{CrawlOutcome, Engine, ExpansionOutcome, Step, Termination};
pub use options::{Budgets, FetchFailurePolicy, SearchOrder, TraversalOptions};

use crate::config::Config;
use crate::fetcher::{ArticleFetcher, CachingFetcher, LinkFetcher};
use crate::graph::NodeId;
use crate::MapperError;

/// Runs a complete traversal from the configured seed
///
/// This is the main entry point for mapping a wiki. It will:
/// 1. Build the HTTP article fetcher behind a per-run cache
/// 2. Fetch the seed's links
/// 3. Expand nodes until a budget is spent or nothing is left to expand
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The link graph and its depth table
/// * `Err(MapperError)` - The fetcher could not be built, or a fetch failed
///   under the `abort` policy
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, MapperError> {
    let options = TraversalOptions::from_config(&config.crawler, &config.fetcher)?;
    let fetcher = CachingFetcher::new(ArticleFetcher::new(&config.fetcher, &config.user_agent)?);
    let seed = NodeId::from(config.crawler.seed.trim());

    run_crawl(fetcher, seed, options).await
}

/// Runs a complete traversal over any link source
pub async fn run_crawl<F: LinkFetcher>(
    fetcher: F,
    seed: NodeId,
    options: TraversalOptions,
) -> Result<CrawlOutcome, MapperError> {
    let outcome = Engine::start(fetcher, seed, options).await?.run().await?;

    tracing::info!(
        "Traversal stopped ({}) after discovering {} items",
        outcome.termination,
        outcome.items_discovered
    );

    Ok(outcome)
}
