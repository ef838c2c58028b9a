//! Core data documents and report types for the lineage tool

use crate::error::{GraphError, Result};
use crate::lineage::graph::{GraphStatistics, LineageGraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Graph input: explicit vertices plus directed edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<i64>,
    #[serde(default)]
    pub edges: Vec<(i64, i64)>,
}

impl GraphDocument {
    /// Build a graph. Vertices mentioned only by edges are added as well.
    pub fn into_graph(self) -> Result<LineageGraph<i64>> {
        if self.vertices.is_empty() && self.edges.is_empty() {
            return Err(GraphError::InvalidInput(
                "graph document has no vertices or edges".to_string(),
            ));
        }

        let mut graph = LineageGraph::new();
        for &vertex in &self.vertices {
            graph.add_vertex(vertex);
        }
        for &(from, to) in &self.edges {
            // add_vertex would wipe edges already recorded for a known vertex
            graph.ensure_vertex(from);
            graph.ensure_vertex(to);
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }
}

/// Family tree input as `(parent, child)` pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AncestryDocument {
    pub pairs: Vec<(i64, i64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Traversal,
    Path,
    Ancestor,
    Statistics,
}

/// Outcome of a single command, rendered by the report formatters
#[derive(Debug, Clone, Serialize)]
pub struct TraversalReport {
    pub kind: ReportKind,
    pub start: Option<i64>,
    pub goal: Option<i64>,
    pub order: Option<String>,
    pub visited: Vec<i64>,
    pub path: Option<Vec<i64>>,
    pub ancestor: Option<i64>,
    pub generations: BTreeMap<i64, usize>,
    pub statistics: GraphStatistics,
    pub generated_at: DateTime<Utc>,
}

impl TraversalReport {
    pub fn new(kind: ReportKind, statistics: GraphStatistics) -> Self {
        Self {
            kind,
            start: None,
            goal: None,
            order: None,
            visited: Vec::new(),
            path: None,
            ancestor: None,
            generations: BTreeMap::new(),
            statistics,
            generated_at: Utc::now(),
        }
    }

    /// Number of edges on the found path
    pub fn hops(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Render a vertex sequence as `1 -> 2 -> 3`
pub fn format_sequence(vertices: &[i64], separator: &str) -> String {
    vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_document_adds_edge_endpoints() {
        let doc = GraphDocument {
            vertices: vec![1],
            edges: vec![(1, 2), (2, 3), (1, 3)],
        };
        let graph = doc.into_graph().unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.get_neighbors(1).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_empty_graph_document_is_rejected() {
        let err = GraphDocument::default().into_graph().unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
    }

    #[test]
    fn test_graph_document_from_json() {
        let doc: GraphDocument =
            serde_json::from_str(r#"{"edges": [[1, 2], [2, 3]]}"#).unwrap();
        assert!(doc.vertices.is_empty());
        assert_eq!(doc.edges, vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_report_hops() {
        let stats = LineageGraph::<i64>::new().statistics();
        let mut report = TraversalReport::new(ReportKind::Path, stats);
        assert_eq!(report.hops(), None);
        report.path = Some(vec![1, 2, 4, 6]);
        assert_eq!(report.hops(), Some(3));
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&[1, 2, 4], " -> "), "1 -> 2 -> 4");
        assert_eq!(format_sequence(&[], ", "), "");
    }
}
