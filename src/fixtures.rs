//! Reference data used by the `demo` command and the test suites.

use crate::error::Result;
use crate::lineage::graph::LineageGraph;

/// Edges of the sample graph, in the order they are added
pub const SAMPLE_EDGES: [(i64, i64); 10] = [
    (5, 3),
    (6, 3),
    (7, 1),
    (4, 7),
    (1, 2),
    (7, 6),
    (2, 4),
    (3, 5),
    (2, 3),
    (4, 6),
];

/// `(parent, child)` pairs of the sample family tree
pub const SAMPLE_ANCESTORS: [(i64, i64); 10] = [
    (1, 3),
    (2, 3),
    (3, 6),
    (5, 6),
    (5, 7),
    (4, 5),
    (4, 8),
    (8, 9),
    (11, 8),
    (10, 1),
];

/// Seven-vertex sample graph with a few cycles (7 -> 1, 3 <-> 5)
pub fn sample_graph() -> Result<LineageGraph<i64>> {
    LineageGraph::from_edges(1..=7, SAMPLE_EDGES)
}
