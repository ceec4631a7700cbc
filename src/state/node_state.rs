//! Node state definitions for tracking traversal progress
//!
//! Every discovered node moves through these states as the engine expands it.
use std::fmt;

/// Represents the expansion status of a discovered node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Node is known but its outbound links have not been processed yet
    Pending,

    /// Depth-first only: the node contributed one new child and its remaining
    /// links are deferred until every branch has hit its limit
    DepthExhausted,

    /// All of the node's outbound links have been processed
    Expanded,
}

impl NodeState {
    /// Returns true if the node will never be expanded again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// Returns true if a node in this state may move to `next`
    ///
    /// Marking a depth-exhausted node as depth-exhausted again is allowed and
    /// changes nothing; it happens when depth-first search falls back to
    /// unexpanded nodes and one of them yields another child.
    pub fn can_transition_to(&self, next: NodeState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::DepthExhausted)
                | (Self::Pending, Self::Expanded)
                | (Self::DepthExhausted, Self::DepthExhausted)
                | (Self::DepthExhausted, Self::Expanded)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::DepthExhausted => "depth_exhausted",
            Self::Expanded => "expanded",
        }
    }

    /// Returns all possible node states
    pub fn all_states() -> [Self; 3] {
        [Self::Pending, Self::DepthExhausted, Self::Expanded]
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
