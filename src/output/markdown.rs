//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a run: the
//! traversal settings, how the run ended, and the shape of the mapped graph.

use crate::output::summary::CrawlSummary;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary of a run
///
/// # Arguments
///
/// * `summary` - The run summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let stats = &summary.statistics;
    let mut md = String::new();

    md.push_str("# Wiki-Mapper Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", summary.seed));
    md.push_str(&format!(
        "- **Started**: {}\n",
        summary.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        summary.duration_seconds()
    ));
    md.push_str(&format!("- **Stopped By**: {}\n", summary.termination));
    md.push_str(&format!("- **Config Hash**: {}\n\n", summary.config_hash));

    // Settings
    md.push_str("## Traversal Settings\n\n");
    md.push_str(&format!("- **Search Order**: {}-first\n", summary.search_order));
    md.push_str(&format!("- **Max Items**: {}\n", summary.max_items));
    md.push_str(&format!(
        "- **Max Breadth**: {}\n",
        describe_limit(summary.max_breadth as u64, "detected")
    ));
    if summary.max_breadth == 0 {
        match summary.effective_breadth {
            Some(breadth) => {
                md.push_str(&format!("- **Detected Breadth**: {}\n", breadth));
            }
            None => md.push_str("- **Detected Breadth**: none\n"),
        }
    }
    md.push_str(&format!(
        "- **Max Depth**: {}\n",
        describe_limit(summary.max_depth as u64, "unlimited")
    ));
    md.push_str(&format!(
        "- **On Fetch Error**: {}\n\n",
        summary.on_fetch_error
    ));

    // Graph statistics
    md.push_str("## Graph Statistics\n\n");
    md.push_str(&format!(
        "- **Items Discovered**: {}\n",
        summary.items_discovered
    ));
    md.push_str(&format!("- **Expanded Nodes**: {}\n", stats.keys));
    md.push_str(&format!("- **Nodes**: {}\n", stats.distinct_nodes));
    md.push_str(&format!("- **Edges**: {}\n", stats.undirected_edges));
    md.push_str(&format!("- **Retained Links**: {}\n", stats.retained_edges));
    md.push_str(&format!(
        "- **Endnodes Pruned**: {}\n\n",
        if summary.endnodes_pruned { "yes" } else { "no" }
    ));

    if !stats.depth_breakdown.is_empty() {
        md.push_str("## Depth Breakdown\n\n");
        md.push_str("| Depth | Nodes |\n");
        md.push_str("|-------|-------|\n");
        for (depth, count) in &stats.depth_breakdown {
            md.push_str(&format!("| {} | {} |\n", depth, count));
        }
        md.push('\n');
    }

    if !stats.top_fan_out.is_empty() {
        md.push_str(&format!("## Top {} Nodes by Fan-Out\n\n", stats.top_fan_out.len()));
        md.push_str("| Node | Links |\n");
        md.push_str("|------|-------|\n");
        for (node, fan_out) in &stats.top_fan_out {
            md.push_str(&format!("| {} | {} |\n", node, fan_out));
        }
        md.push('\n');
    }

    md
}

fn describe_limit(value: u64, zero: &str) -> String {
    if value == 0 {
        format!("0 ({})", zero)
    } else {
        value.to_string()
    }
}
