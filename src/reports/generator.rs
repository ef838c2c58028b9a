use crate::reports::formatters::{JsonFormatter, MarkdownFormatter, ReportFormatter, TextFormatter};
use crate::types::TraversalReport;
use anyhow::Result;

/// Supported output formats
pub const SUPPORTED_FORMATS: [&str; 3] = ["json", "markdown", "text"];

/// Report generator for creating various output formats
#[derive(Debug, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate report in the specified format
    pub fn generate(&self, report: &TraversalReport, format: &str) -> Result<String> {
        match format.to_lowercase().as_str() {
            "json" => JsonFormatter.format(report),
            "markdown" | "md" => MarkdownFormatter.format(report),
            "text" => TextFormatter.format(report),
            _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::lineage::GraphTraversal;
    use crate::types::ReportKind;

    fn path_report() -> TraversalReport {
        let graph = fixtures::sample_graph().unwrap();
        let mut report = TraversalReport::new(ReportKind::Path, graph.statistics());
        report.start = Some(1);
        report.goal = Some(6);
        report.order = Some("breadth-first".to_string());
        report.path = GraphTraversal::breadth_first_path(&graph, 1, 6).unwrap();
        report
    }

    #[test]
    fn test_generate_json() {
        let output = ReportGenerator::new().generate(&path_report(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["kind"], "path");
        assert_eq!(value["path"], serde_json::json!([1, 2, 4, 6]));
        assert_eq!(value["statistics"]["total_nodes"], 7);
    }

    #[test]
    fn test_generate_text() {
        let output = ReportGenerator::new().generate(&path_report(), "TEXT").unwrap();
        assert!(output.contains("Path (3 hops): 1 -> 2 -> 4 -> 6"));
        assert!(output.contains("- Vertices: 7"));
    }

    #[test]
    fn test_generate_markdown_ancestor() {
        let graph = fixtures::sample_graph().unwrap();
        let mut report = TraversalReport::new(ReportKind::Ancestor, graph.statistics());
        report.start = Some(3);
        report.ancestor = Some(10);
        report.generations.insert(1, 1);
        report.generations.insert(10, 2);

        let output = ReportGenerator::new().generate(&report, "markdown").unwrap();
        assert!(output.contains("## Earliest Ancestor"));
        assert!(output.contains("**10**"));
        assert!(output.contains("| 10 | 2 |"));
    }

    #[test]
    fn test_missing_path_and_ancestor() {
        let graph = fixtures::sample_graph().unwrap();
        let mut report = TraversalReport::new(ReportKind::Path, graph.statistics());
        report.path = None;
        let output = ReportGenerator::new().generate(&report, "text").unwrap();
        assert!(output.contains("Path: none"));

        report.kind = ReportKind::Ancestor;
        let output = ReportGenerator::new().generate(&report, "markdown").unwrap();
        assert!(output.contains("**none**"));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(ReportGenerator::new().generate(&path_report(), "xml").is_err());
    }
}
