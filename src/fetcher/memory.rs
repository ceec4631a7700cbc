use crate::fetcher::LinkFetcher;
use crate::graph::NodeId;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Serves links from a fixed adjacency map
///
/// Nodes absent from the map have no outbound links. Nodes registered with
/// `with_failure` fail every fetch. Every call is recorded, so a caller can
/// check which nodes were fetched and how often.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    failing: HashSet<NodeId>,
    calls: Mutex<Vec<NodeId>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fetcher from a name-to-names adjacency map
    pub fn from_adjacency(adjacency: HashMap<String, Vec<String>>) -> Self {
        let adjacency = adjacency
            .into_iter()
            .map(|(node, links)| {
                (
                    NodeId::from(node),
                    links.into_iter().map(NodeId::from).collect(),
                )
            })
            .collect();

        Self {
            adjacency,
            ..Self::default()
        }
    }

    /// Sets the outbound links of a node
    pub fn with_links(mut self, node: &str, links: &[&str]) -> Self {
        self.adjacency.insert(
            NodeId::from(node),
            links.iter().map(|l| NodeId::from(*l)).collect(),
        );
        self
    }

    /// Makes every fetch of a node fail
    pub fn with_failure(mut self, node: &str) -> Self {
        self.failing.insert(NodeId::from(node));
        self
    }

    /// Every fetched node, in call order
    pub fn calls(&self) -> Vec<NodeId> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times a node was fetched
    pub fn fetch_count(&self, node: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.as_str() == node)
            .count()
    }
}

#[async_trait]
impl LinkFetcher for MemoryFetcher {
    async fn fetch_links(&self, node: &NodeId) -> FetchResult<Vec<NodeId>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(node.clone());

        if self.failing.contains(node) {
            return Err(FetchError::Unavailable {
                node: node.to_string(),
                message: "configured to fail".to_string(),
            });
        }

        Ok(self.adjacency.get(node).cloned().unwrap_or_default())
    }
}
