use crate::graph::NodeId;
use std::collections::{BTreeMap, HashMap};

/// Discovery depth of every node in the graph (the seed sits at depth 1)
///
/// Depths are fixed when a node is first recorded and are never revised,
/// even if a shorter path to the node turns up later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthTable {
    depths: HashMap<NodeId, u32>,
}

impl DepthTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding only the seed at depth 1
    pub fn with_seed(seed: NodeId) -> Self {
        let mut table = Self::new();
        table.depths.insert(seed, 1);
        table
    }

    /// Records a node's depth unless it already has one
    ///
    /// Returns true if the depth was recorded.
    pub fn record(&mut self, node: NodeId, depth: u32) -> bool {
        match self.depths.entry(node) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(depth);
                true
            }
        }
    }

    pub fn get(&self, node: &str) -> Option<u32> {
        self.depths.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Deepest recorded depth, or 0 for an empty table
    pub fn max_depth(&self) -> u32 {
        self.depths.values().copied().max().unwrap_or(0)
    }

    /// Number of nodes at each depth, sorted by depth
    pub fn breakdown(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for depth in self.depths.values() {
            *counts.entry(*depth).or_insert(0) += 1;
        }
        counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, u32)> {
        self.depths.iter().map(|(node, depth)| (node, *depth))
    }
}
