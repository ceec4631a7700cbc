//! Link graph data model
//!
//! This module holds the structures a traversal produces:
//! - `NodeId`: an article name
//! - `LinkGraph`: each crawled node with its retained outbound links
//! - `DepthTable`: each node's discovery depth
//!
//! plus `prune_endnodes`, which strips dangling leaves before rendering.

mod depth;
mod link_graph;
mod node;
mod prune;

pub use depth::DepthTable;
pub use link_graph::LinkGraph;
pub use node::NodeId;
pub use prune::prune_endnodes;
