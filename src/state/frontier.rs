use crate::graph::NodeId;
use crate::state::NodeState;
use crate::MapperError;
use std::collections::HashMap;

/// Tracks the expansion state of every discovered node
///
/// Nodes are kept in discovery order, which is also the order in which
/// candidates are offered for expansion.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    order: Vec<NodeId>,
    states: HashMap<NodeId, NodeState>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the pending seed
    pub fn with_seed(seed: NodeId) -> Self {
        let mut frontier = Self::new();
        frontier.discover(seed);
        frontier
    }

    /// Registers a newly discovered node as pending
    ///
    /// Returns false if the node was already known.
    pub fn discover(&mut self, node: NodeId) -> bool {
        if self.states.contains_key(&node) {
            return false;
        }
        self.order.push(node.clone());
        self.states.insert(node, NodeState::Pending);
        true
    }

    pub fn state(&self, node: &str) -> Option<NodeState> {
        self.states.get(node).copied()
    }

    /// Moves a node to a new state
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transition was applied
    /// * `Err(MapperError::InvalidTransition)` - The node is unknown or the
    ///   transition is not allowed from its current state
    pub fn transition(&mut self, node: &NodeId, next: NodeState) -> Result<(), MapperError> {
        let current = self
            .states
            .get_mut(node.as_str())
            .ok_or_else(|| MapperError::InvalidTransition {
                node: node.to_string(),
                from: NodeState::Pending,
                to: next,
            })?;

        if !current.can_transition_to(next) {
            return Err(MapperError::InvalidTransition {
                node: node.to_string(),
                from: *current,
                to: next,
            });
        }

        *current = next;
        Ok(())
    }

    /// Candidates for a breadth-first round: every node not yet expanded
    pub fn breadth_candidates(&self) -> Vec<NodeId> {
        self.select(|state| state != NodeState::Expanded)
    }

    /// Candidates for a depth-first round
    ///
    /// Pending nodes come first. Once every branch is depth-exhausted, the
    /// nodes that still have unprocessed links are offered instead.
    pub fn depth_candidates(&self) -> Vec<NodeId> {
        let pending = self.select(|state| state == NodeState::Pending);
        if !pending.is_empty() {
            return pending;
        }
        self.select(|state| state == NodeState::DepthExhausted)
    }

    /// Number of nodes in the given state
    pub fn count(&self, state: NodeState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn select(&self, keep: impl Fn(NodeState) -> bool) -> Vec<NodeId> {
        self.order
            .iter()
            .filter(|node| keep(self.states[*node]))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> NodeId {
        NodeId::from(name)
    }

    fn names(nodes: Vec<NodeId>) -> Vec<String> {
        nodes.into_iter().map(NodeId::into_inner).collect()
    }

    #[test]
    fn test_seed_is_pending() {
        let frontier = Frontier::with_seed(id("S"));
        assert_eq!(frontier.state("S"), Some(NodeState::Pending));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_discover_is_idempotent() {
        let mut frontier = Frontier::with_seed(id("S"));
        assert!(frontier.discover(id("A")));
        assert!(!frontier.discover(id("A")));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_transition_rejects_invalid() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.transition(&id("S"), NodeState::Expanded).unwrap();

        let result = frontier.transition(&id("S"), NodeState::DepthExhausted);
        assert!(matches!(
            result,
            Err(MapperError::InvalidTransition {
                from: NodeState::Expanded,
                to: NodeState::DepthExhausted,
                ..
            })
        ));
    }

    #[test]
    fn test_transition_unknown_node() {
        let mut frontier = Frontier::new();
        assert!(frontier.transition(&id("X"), NodeState::Expanded).is_err());
    }

    #[test]
    fn test_breadth_candidates_skip_expanded() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.discover(id("A"));
        frontier.discover(id("B"));
        frontier.transition(&id("S"), NodeState::Expanded).unwrap();

        assert_eq!(names(frontier.breadth_candidates()), vec!["A", "B"]);
    }

    #[test]
    fn test_depth_candidates_prefer_pending() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.discover(id("A"));
        frontier.transition(&id("S"), NodeState::DepthExhausted).unwrap();

        assert_eq!(names(frontier.depth_candidates()), vec!["A"]);
    }

    #[test]
    fn test_depth_candidates_fall_back_to_unexpanded() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.discover(id("A"));
        frontier.discover(id("B"));
        frontier.transition(&id("S"), NodeState::DepthExhausted).unwrap();
        frontier.transition(&id("A"), NodeState::Expanded).unwrap();
        frontier.transition(&id("B"), NodeState::DepthExhausted).unwrap();

        assert_eq!(names(frontier.depth_candidates()), vec!["S", "B"]);
    }

    #[test]
    fn test_no_candidates_when_all_expanded() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.transition(&id("S"), NodeState::Expanded).unwrap();

        assert!(frontier.breadth_candidates().is_empty());
        assert!(frontier.depth_candidates().is_empty());
    }

    #[test]
    fn test_count_by_state() {
        let mut frontier = Frontier::with_seed(id("S"));
        frontier.discover(id("A"));
        frontier.transition(&id("S"), NodeState::DepthExhausted).unwrap();

        assert_eq!(frontier.count(NodeState::Pending), 1);
        assert_eq!(frontier.count(NodeState::DepthExhausted), 1);
        assert_eq!(frontier.count(NodeState::Expanded), 0);
    }
}
