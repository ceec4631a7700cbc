//! Endnode pruning
//!
//! An endnode is a link target that was never crawled and that only a single
//! crawled page refers to. It adds a dangling leaf to a drawing and nothing to
//! the structure, so it is dropped before the graph is rendered.

use crate::graph::{LinkGraph, NodeId};
use std::collections::{HashMap, HashSet};

/// Removes links that point at endnodes
///
/// A link `A -> B` is kept when `B` is itself a key of the graph, or when at
/// least one other key also links to `B`. The key set is unchanged and the
/// surviving links keep their relative order.
///
/// Runs in a single counting pass: for every target, the number of distinct
/// source keys that reference it.
///
/// # Example
///
/// ```
/// use wiki_mapper::graph::{prune_endnodes, LinkGraph, NodeId};
///
/// let graph = LinkGraph::from_entries(vec![
///     (NodeId::from("A"), vec![NodeId::from("B"), NodeId::from("X")]),
///     (NodeId::from("B"), vec![NodeId::from("Y")]),
/// ])
/// .unwrap();
///
/// let pruned = prune_endnodes(&graph);
/// assert_eq!(pruned.links("A").unwrap(), &[NodeId::from("B")]);
/// assert!(pruned.links("B").unwrap().is_empty());
/// ```
pub fn prune_endnodes(graph: &LinkGraph) -> LinkGraph {
    let references = reference_counts(graph);

    graph.filter_links(|target| {
        graph.contains(target.as_str())
            || references.get(target.as_str()).copied().unwrap_or(0) >= 2
    })
}

/// Counts, for every link target, how many distinct keys reference it
fn reference_counts(graph: &LinkGraph) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, links) in graph.iter() {
        let distinct: HashSet<&str> = links.iter().map(NodeId::as_str).collect();
        for target in distinct {
            *counts.entry(target).or_insert(0) += 1;
        }
    }
    counts
}
