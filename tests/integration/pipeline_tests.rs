//! Integration tests for the configuration-to-output pipeline
//!
//! These tests load a configuration file, run the traversal over an in-memory
//! link source, prune the result and write both output files.

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use wiki_mapper::config::{load_config_with_hash, ConfigOverrides};
use wiki_mapper::crawler::{run_crawl, Termination, TraversalOptions};
use wiki_mapper::fetcher::{CachingFetcher, MemoryFetcher};
use wiki_mapper::output::{
    generate_markdown_summary, write_graph_json, CrawlSummary, GraphExport,
};
use wiki_mapper::{prune_endnodes, NodeId};

const CONFIG: &str = r#"
[crawler]
seed = "Rayman"
search-first = "breadth"
max-items = 100
max-breadth = 3

[user-agent]
crawler-name = "TestMapper"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

const ADJACENCY: &str = r#"{
    "Rayman": ["Ubisoft", "Michel_Ancel", "Platform_game"],
    "Ubisoft": ["Rayman", "Montreuil", "Assassins_Creed"],
    "Michel_Ancel": ["Rayman", "Ubisoft", "Beyond_Good_and_Evil"],
    "Platform_game": ["Donkey_Kong", "Rayman"]
}"#;

fn create_temp_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn memory_fetcher() -> MemoryFetcher {
    let adjacency: HashMap<String, Vec<String>> = serde_json::from_str(ADJACENCY).unwrap();
    MemoryFetcher::from_adjacency(adjacency)
}

#[tokio::test]
async fn test_config_to_outputs() {
    let file = create_temp_config(CONFIG);
    let overrides = ConfigOverrides {
        max_depth: Some(2),
        silent: true,
        ..ConfigOverrides::default()
    };
    let (config, hash) = load_config_with_hash(file.path(), &overrides).unwrap();
    assert_eq!(hash.len(), 64);

    let options = TraversalOptions::from_config(&config.crawler, &config.fetcher).unwrap();
    let started_at = Utc::now();
    let outcome = run_crawl(
        CachingFetcher::new(memory_fetcher()),
        NodeId::from(config.crawler.seed.as_str()),
        options.clone(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(outcome.graph.len(), 4);
    assert_eq!(outcome.depths.max_depth(), 2);

    // Montreuil, Assassins_Creed, Beyond_Good_and_Evil and Donkey_Kong are
    // each referenced once and never expanded
    let pruned = prune_endnodes(&outcome.graph);
    assert_eq!(pruned.len(), outcome.graph.len());
    assert_eq!(pruned.all_nodes().len(), 4);
    assert_eq!(
        pruned.links("Ubisoft").unwrap(),
        &[NodeId::from("Rayman")]
    );

    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("graph.json");
    let summary_path = dir.path().join("summary.md");

    let export = GraphExport::new(&pruned, &outcome.depths, options.order, outcome.termination);
    write_graph_json(&export, &graph_path).unwrap();

    let summary = CrawlSummary::new(
        &config.crawler.seed,
        &options,
        &outcome,
        &pruned,
        true,
        &hash,
        started_at,
        Utc::now(),
    );
    generate_markdown_summary(&summary, &summary_path).unwrap();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&graph_path).unwrap()).unwrap();
    assert_eq!(written["seed"], "Rayman");
    assert_eq!(written["nodes"].as_array().unwrap().len(), 4);

    let markdown = std::fs::read_to_string(&summary_path).unwrap();
    assert!(markdown.contains("- **Seed**: Rayman"));
    assert!(markdown.contains(&format!("- **Config Hash**: {}", hash)));
    assert!(markdown.contains("- **Max Depth**: 2"));
    assert!(markdown.contains("- **Endnodes Pruned**: yes"));
}

#[tokio::test]
async fn test_overrides_change_the_traversal() {
    let file = create_temp_config(CONFIG);
    let overrides = ConfigOverrides {
        search_first: Some("depth".to_string()),
        max_items: Some(2),
        silent: true,
        ..ConfigOverrides::default()
    };
    let (config, _) = load_config_with_hash(file.path(), &overrides).unwrap();

    let options = TraversalOptions::from_config(&config.crawler, &config.fetcher).unwrap();
    let outcome = run_crawl(
        memory_fetcher(),
        NodeId::from("Rayman"),
        options,
    )
    .await
    .unwrap();

    assert_eq!(outcome.termination, Termination::ItemBudget);
    assert_eq!(
        outcome.graph.keys().map(NodeId::as_str).collect::<Vec<_>>(),
        vec!["Rayman", "Ubisoft", "Montreuil"]
    );
}

#[test]
fn test_invalid_override_is_rejected() {
    let file = create_temp_config(CONFIG);
    let overrides = ConfigOverrides {
        search_first: Some("sideways".to_string()),
        ..ConfigOverrides::default()
    };

    assert!(load_config_with_hash(file.path(), &overrides).is_err());
}
