//! Statistics over a finished link graph
//!
//! Counts are reported the way a graph renderer would see the data: every key
//! and every link target is a node, and a link between two nodes is a single
//! undirected edge no matter how many times or in which direction it appears.

use crate::graph::{DepthTable, LinkGraph, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Nodes listed in the fan-out ranking
const TOP_FAN_OUT: usize = 10;

/// Graph statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Nodes whose links were recorded
    pub keys: usize,

    /// Keys plus every link target that is not a key
    pub distinct_nodes: usize,

    /// Unique undirected edges between distinct nodes
    pub undirected_edges: usize,

    /// Sum of retained link list lengths
    pub retained_edges: usize,

    /// Deepest recorded depth (the seed is depth 1)
    pub max_depth: u32,

    /// Number of nodes per depth
    pub depth_breakdown: BTreeMap<u32, usize>,

    /// Keys with the most retained links, largest first
    pub top_fan_out: Vec<(String, usize)>,
}

impl GraphStatistics {
    /// Computes statistics for a graph and its depth table
    pub fn compute(graph: &LinkGraph, depths: &DepthTable) -> Self {
        let mut edges: HashSet<(&NodeId, &NodeId)> = HashSet::new();
        for (node, links) in graph.iter() {
            for link in links {
                let edge = if node <= link { (node, link) } else { (link, node) };
                edges.insert(edge);
            }
        }

        let mut top_fan_out: Vec<(String, usize)> = graph
            .iter()
            .map(|(node, links)| (node.to_string(), links.len()))
            .filter(|(_, fan_out)| *fan_out > 0)
            .collect();
        // Stable sort keeps discovery order among equal fan-outs
        top_fan_out.sort_by(|a, b| b.1.cmp(&a.1));
        top_fan_out.truncate(TOP_FAN_OUT);

        Self {
            keys: graph.len(),
            distinct_nodes: graph.all_nodes().len(),
            undirected_edges: edges.len(),
            retained_edges: graph.edge_count(),
            max_depth: depths.max_depth(),
            depth_breakdown: depths.breakdown(),
            top_fan_out,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  Expanded nodes: {}", stats.keys);
    println!("  Distinct nodes: {}", stats.distinct_nodes);
    println!("  Undirected edges: {}", stats.undirected_edges);
    println!("  Retained links: {}", stats.retained_edges);
    println!();

    if !stats.depth_breakdown.is_empty() {
        println!("Nodes by Depth:");
        let total: usize = stats.depth_breakdown.values().sum();
        for (depth, count) in &stats.depth_breakdown {
            let percentage = (*count as f64 / total as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", depth, count, percentage);
        }
        println!();
    }

    if !stats.top_fan_out.is_empty() {
        println!("Top Fan-Out:");
        for (node, fan_out) in &stats.top_fan_out {
            println!("  {}: {}", node, fan_out);
        }
        println!();
    }
}
