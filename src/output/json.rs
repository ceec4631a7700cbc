//! JSON export of the link graph
//!
//! The export lists every node a renderer would draw, in `all_nodes` order,
//! with its depth (absent for link targets that were never expanded), its
//! fan-out and its retained links.

use crate::crawler::{SearchOrder, Termination};
use crate::graph::{DepthTable, LinkGraph, NodeId};
use crate::output::OutputResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One drawn node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeExport<'a> {
    pub id: &'a NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    pub fan_out: usize,
    pub links: &'a [NodeId],
}

/// Serialized form of a mapped graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport<'a> {
    pub seed: Option<&'a NodeId>,
    pub order: &'static str,
    pub termination: &'static str,
    pub nodes: Vec<NodeExport<'a>>,
}

impl<'a> GraphExport<'a> {
    pub fn new(
        graph: &'a LinkGraph,
        depths: &DepthTable,
        order: SearchOrder,
        termination: Termination,
    ) -> Self {
        let nodes = graph
            .fan_out_map()
            .into_iter()
            .map(|(node, fan_out)| NodeExport {
                id: node,
                depth: depths.get(node.as_str()),
                fan_out,
                links: graph.links(node.as_str()).unwrap_or(&[]),
            })
            .collect();

        Self {
            seed: graph.seed(),
            order: order.as_str(),
            termination: termination.as_str(),
            nodes,
        }
    }
}

/// Writes the graph export as pretty-printed JSON
///
/// # Arguments
///
/// * `export` - The graph to write
/// * `output_path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the graph
/// * `Err(OutputError)` - Failed to serialize or write the file
pub fn write_graph_json(export: &GraphExport<'_>, output_path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, export)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
