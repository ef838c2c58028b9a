pub mod ancestry;
pub mod graph;
pub mod traversal;

pub use ancestry::{earliest_ancestor, earliest_ancestor_of, AncestorResolver, NO_ANCESTOR};
pub use graph::{GraphStatistics, LineageGraph, Vertex};
pub use traversal::{Bft, Dft, GraphTraversal, TraversalOrder};
