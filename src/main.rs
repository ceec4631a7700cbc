//! Wiki-Mapper main entry point
//!
//! This is the command-line interface for the Wiki-Mapper link-graph explorer.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_mapper::config::{load_config_with_hash, Config, ConfigOverrides};
use wiki_mapper::crawler::{crawl, run_crawl, CrawlOutcome, TraversalOptions};
use wiki_mapper::fetcher::{CachingFetcher, MemoryFetcher};
use wiki_mapper::output::{
    generate_markdown_summary, print_statistics, write_graph_json, CrawlSummary, GraphExport,
};
use wiki_mapper::{prune_endnodes, LinkGraph, NodeId};

/// Wiki-Mapper: a bounded article link-graph explorer
///
/// Wiki-Mapper starts from a seed article and follows article links in
/// breadth-first or depth-first order until its item, branching, or depth
/// budget is spent. The resulting link graph is written as JSON together with
/// a markdown summary.
#[derive(Parser, Debug)]
#[command(name = "wiki-mapper")]
#[command(version = "1.0.0")]
#[command(about = "A bounded article link-graph explorer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Seed article (overrides the configuration)
    #[arg(long)]
    seed: Option<String>,

    /// Search order: breadth or depth
    #[arg(long, value_name = "ORDER")]
    search_first: Option<String>,

    /// Maximum number of newly discovered articles
    #[arg(long)]
    max_items: Option<u32>,

    /// Links kept per article; 0 detects it from the first discovery
    #[arg(long)]
    max_breadth: Option<u32>,

    /// Articles at this depth are not expanded; 0 is unlimited
    #[arg(long)]
    max_depth: Option<u32>,

    /// Log progress at debug level only
    #[arg(long)]
    silent: bool,

    /// Keep links to articles that are referenced only once
    #[arg(long)]
    keep_endnodes: bool,

    /// Read links from a JSON adjacency file instead of fetching pages
    #[arg(long, value_name = "FILE")]
    graph_file: Option<PathBuf>,

    /// Validate config and show the effective settings without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.seed.clone(),
            search_first: self.search_first.clone(),
            max_items: self.max_items,
            max_breadth: self.max_breadth,
            max_depth: self.max_depth,
            silent: self.silent,
            keep_endnodes: self.keep_endnodes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config, &cli.overrides())
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let options = TraversalOptions::from_config(&config.crawler, &config.fetcher)?;

    if cli.dry_run {
        handle_dry_run(&config, &options);
        return Ok(());
    }

    handle_crawl(&config, &config_hash, options, cli.graph_file.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_mapper=info,warn"),
            1 => EnvFilter::new("wiki_mapper=debug,info"),
            2 => EnvFilter::new("wiki_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, options: &TraversalOptions) {
    println!("=== Wiki-Mapper Dry Run ===\n");

    println!("Traversal:");
    println!("  Seed: {}", config.crawler.seed.trim());
    println!("  Search order: {}-first", options.order);
    println!("  Max items: {}", options.budgets.max_items);
    if options.budgets.detects_breadth() {
        println!("  Max breadth: detected from the first discovered article");
    } else {
        println!("  Max breadth: {}", options.budgets.max_breadth);
    }
    if options.budgets.max_depth == 0 {
        println!("  Max depth: unlimited");
    } else {
        println!("  Max depth: {}", options.budgets.max_depth);
    }
    println!("  On fetch error: {}", options.on_fetch_error.as_str());
    println!("  Fetch timeout: {}s", options.fetch_timeout.as_secs());

    println!("\nFetcher:");
    println!("  Base URL: {}", config.fetcher.base_url);
    println!("  Keep list articles: {}", config.fetcher.keep_list_articles);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Graph: {}", config.output.graph_path);
    println!("  Summary: {}", config.output.summary_path);
    println!("  Keep endnodes: {}", config.output.keep_endnodes);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: &str,
    options: TraversalOptions,
    graph_file: Option<&Path>,
) -> anyhow::Result<()> {
    let seed = config.crawler.seed.trim();
    let started_at = Utc::now();

    let outcome = match graph_file {
        Some(path) => {
            tracing::info!("Reading links from {}", path.display());
            let fetcher = CachingFetcher::new(load_graph_file(path)?);
            run_crawl(fetcher, NodeId::from(seed), options.clone()).await
        }
        None => crawl(config).await,
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    let finished_at = Utc::now();

    let keep_endnodes = config.output.keep_endnodes;
    let graph = if keep_endnodes {
        outcome.graph.clone()
    } else {
        prune_endnodes(&outcome.graph)
    };

    let summary = CrawlSummary::new(
        seed,
        &options,
        &outcome,
        &graph,
        !keep_endnodes,
        config_hash,
        started_at,
        finished_at,
    );
    tracing::info!(
        "The network has {} nodes and {} edges",
        summary.statistics.distinct_nodes,
        summary.statistics.undirected_edges
    );

    write_outputs(config, &options, &outcome, &graph, &summary)?;

    if !config.crawler.silent {
        print_statistics(&summary.statistics);
    }

    Ok(())
}

/// Writes the graph export and the markdown summary
fn write_outputs(
    config: &Config,
    options: &TraversalOptions,
    outcome: &CrawlOutcome,
    graph: &LinkGraph,
    summary: &CrawlSummary,
) -> anyhow::Result<()> {
    let graph_path = Path::new(&config.output.graph_path);
    let export = GraphExport::new(graph, &outcome.depths, options.order, outcome.termination);
    write_graph_json(&export, graph_path)
        .with_context(|| format!("Failed to write graph to {}", graph_path.display()))?;
    tracing::info!("Graph written to: {}", graph_path.display());

    let summary_path = Path::new(&config.output.summary_path);
    generate_markdown_summary(summary, summary_path)
        .with_context(|| format!("Failed to write summary to {}", summary_path.display()))?;
    tracing::info!("Summary written to: {}", summary_path.display());

    Ok(())
}

/// Loads a `{"Article": ["Link", ...]}` adjacency file
fn load_graph_file(path: &Path) -> anyhow::Result<MemoryFetcher> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let adjacency: HashMap<String, Vec<String>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse graph file {}", path.display()))?;

    Ok(MemoryFetcher::from_adjacency(adjacency))
}
