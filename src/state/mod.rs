//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `NodeState`: Expansion status of an individual node (pending, depth-exhausted, expanded)
//! - `Frontier`: The set of discovered nodes and their states, in discovery order

mod frontier;
mod node_state;

// Re-export main types
pub use frontier::Frontier;
pub use node_state::NodeState;
