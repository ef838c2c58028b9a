use crate::types::{format_sequence, ReportKind, TraversalReport};
use anyhow::Result;
use std::fmt::Write;

/// Trait for report formatters
pub trait ReportFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String>;
}

/// JSON formatter
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Plain text formatter
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "Lineage Report ({:?})", report.kind)?;
        writeln!(out, "===================")?;
        writeln!(out)?;

        if let Some(start) = report.start {
            writeln!(out, "Start: {}", start)?;
        }
        if let Some(goal) = report.goal {
            writeln!(out, "Goal: {}", goal)?;
        }
        if let Some(order) = &report.order {
            writeln!(out, "Order: {}", order)?;
        }

        match report.kind {
            ReportKind::Traversal => {
                writeln!(out, "Visited ({}): {}", report.visited.len(), format_sequence(&report.visited, ", "))?;
            }
            ReportKind::Path => match &report.path {
                Some(path) => writeln!(
                    out,
                    "Path ({} hops): {}",
                    path.len().saturating_sub(1),
                    format_sequence(path, " -> ")
                )?,
                None => writeln!(out, "Path: none")?,
            },
            ReportKind::Ancestor => {
                writeln!(out, "Earliest ancestor: {}", ancestor_label(report))?;
                for (ancestor, generations) in &report.generations {
                    writeln!(out, "  {} ({} generations up)", ancestor, generations)?;
                }
            }
            ReportKind::Statistics => {}
        }

        writeln!(out)?;
        writeln!(out, "Graph:")?;
        writeln!(out, "- Vertices: {}", report.statistics.total_nodes)?;
        writeln!(out, "- Edges: {}", report.statistics.total_edges)?;
        writeln!(out, "- Roots: {}", report.statistics.root_nodes)?;
        writeln!(out, "- Leaves: {}", report.statistics.leaf_nodes)?;
        writeln!(out, "- Average Degree: {:.2}", report.statistics.average_degree)?;
        writeln!(out)?;
        write!(out, "Generated at: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

        Ok(out)
    }
}

/// Markdown formatter
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "# Lineage Report")?;
        writeln!(out)?;
        writeln!(out, "**Kind**: {:?}", report.kind)?;
        if let Some(start) = report.start {
            writeln!(out, "**Start**: {}", start)?;
        }
        if let Some(goal) = report.goal {
            writeln!(out, "**Goal**: {}", goal)?;
        }
        if let Some(order) = &report.order {
            writeln!(out, "**Order**: {}", order)?;
        }
        writeln!(out)?;

        match report.kind {
            ReportKind::Traversal => {
                writeln!(out, "## Visit Order")?;
                writeln!(out, "{}", format_sequence(&report.visited, ", "))?;
            }
            ReportKind::Path => {
                writeln!(out, "## Path")?;
                match &report.path {
                    Some(path) => writeln!(out, "`{}`", format_sequence(path, " -> "))?,
                    None => writeln!(out, "No path found")?,
                }
            }
            ReportKind::Ancestor => {
                writeln!(out, "## Earliest Ancestor")?;
                writeln!(out, "**{}**", ancestor_label(report))?;
                if !report.generations.is_empty() {
                    writeln!(out)?;
                    writeln!(out, "| Ancestor | Generations |")?;
                    writeln!(out, "|---|---|")?;
                    for (ancestor, generations) in &report.generations {
                        writeln!(out, "| {} | {} |", ancestor, generations)?;
                    }
                }
            }
            ReportKind::Statistics => {}
        }

        writeln!(out)?;
        writeln!(out, "## Graph Statistics")?;
        writeln!(out, "- **Vertices**: {}", report.statistics.total_nodes)?;
        writeln!(out, "- **Edges**: {}", report.statistics.total_edges)?;
        writeln!(out, "- **Roots**: {}", report.statistics.root_nodes)?;
        writeln!(out, "- **Leaves**: {}", report.statistics.leaf_nodes)?;
        writeln!(out, "- **Average Degree**: {:.2}", report.statistics.average_degree)?;
        writeln!(out)?;
        writeln!(out, "---")?;
        write!(out, "*Generated at: {}*", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

        Ok(out)
    }
}

fn ancestor_label(report: &TraversalReport) -> String {
    match report.ancestor {
        Some(ancestor) => ancestor.to_string(),
        None => "none".to_string(),
    }
}
