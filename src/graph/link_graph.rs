use crate::graph::NodeId;
use crate::GraphError;
use std::collections::{HashMap, HashSet};

/// Mapping from each crawled node to its retained outbound links
///
/// Keys keep their insertion order so that a run is reproducible, and an entry
/// is never replaced or edited once added: the graph only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    order: Vec<NodeId>,
    entries: HashMap<NodeId, Vec<NodeId>>,
}

impl LinkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph holding only the seed and its retained links
    pub fn with_seed(seed: NodeId, links: Vec<NodeId>) -> Self {
        let mut graph = Self::new();
        graph.order.push(seed.clone());
        graph.entries.insert(seed, links);
        graph
    }

    /// Builds a graph from `(node, links)` pairs, in order
    ///
    /// # Returns
    ///
    /// * `Ok(LinkGraph)` - All nodes were distinct
    /// * `Err(GraphError::DuplicateNode)` - A node appeared twice
    pub fn from_entries<I>(entries: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    {
        let mut graph = Self::new();
        for (node, links) in entries {
            graph.insert(node, links)?;
        }
        Ok(graph)
    }

    /// Adds a node with its retained links
    ///
    /// A node can only be added once.
    pub fn insert(&mut self, node: NodeId, links: Vec<NodeId>) -> Result<(), GraphError> {
        if self.entries.contains_key(&node) {
            return Err(GraphError::DuplicateNode(node.into_inner()));
        }
        self.order.push(node.clone());
        self.entries.insert(node, links);
        Ok(())
    }

    /// Copies the graph, keeping only the links accepted by `keep`
    ///
    /// Keys and their order are unchanged, as is the relative order of the
    /// surviving links.
    pub fn filter_links(&self, mut keep: impl FnMut(&NodeId) -> bool) -> LinkGraph {
        let entries = self
            .order
            .iter()
            .map(|node| {
                let links = self.entries[node]
                    .iter()
                    .filter(|target| keep(target))
                    .cloned()
                    .collect();
                (node.clone(), links)
            })
            .collect();

        LinkGraph {
            order: self.order.clone(),
            entries,
        }
    }

    /// Returns true if the node is a key of the graph
    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    /// Returns the retained links of a node, if it is a key
    pub fn links(&self, node: &str) -> Option<&[NodeId]> {
        self.entries.get(node).map(Vec::as_slice)
    }

    /// Returns the first key added, which is the crawl seed
    pub fn seed(&self) -> Option<&NodeId> {
        self.order.first()
    }

    /// Iterates over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter()
    }

    /// Iterates over `(node, links)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.order
            .iter()
            .map(move |node| (node, self.entries[node].as_slice()))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of retained links across all keys
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Length of the node's retained link list, or 0 if it is not a key
    pub fn fan_out(&self, node: &str) -> usize {
        self.entries.get(node).map_or(0, Vec::len)
    }

    /// Every node a renderer would draw: keys first, then link targets that
    /// are not keys, each in first-seen order
    pub fn all_nodes(&self) -> Vec<&NodeId> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.order.len());
        let mut nodes = Vec::with_capacity(self.order.len());

        for node in &self.order {
            seen.insert(node.as_str());
            nodes.push(node);
        }

        for (_, links) in self.iter() {
            for target in links {
                if seen.insert(target.as_str()) {
                    nodes.push(target);
                }
            }
        }

        nodes
    }

    /// Fan-out of every drawn node, in `all_nodes` order
    pub fn fan_out_map(&self) -> Vec<(&NodeId, usize)> {
        self.all_nodes()
            .into_iter()
            .map(|node| (node, self.fan_out(node.as_str())))
            .collect()
    }
}
