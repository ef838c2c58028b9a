use crate::error::{GraphError, Result};
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use petgraph::Direction;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::debug;

/// Marker bound for vertex identifiers: petgraph's node requirements plus Debug for errors
pub trait Vertex: NodeTrait + Debug {}

impl<T: NodeTrait + Debug> Vertex for T {}

/// Directed graph of opaque vertex ids, backed by a petgraph `DiGraphMap`.
///
/// Successors are kept in edge insertion order, so every traversal over the
/// same graph visits vertices in the same order.
#[derive(Debug, Clone)]
pub struct LineageGraph<V: Vertex> {
    graph: DiGraphMap<V, ()>,
}

impl<V: Vertex> Default for LineageGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> LineageGraph<V> {
    pub fn new() -> Self {
        Self {
            graph: DiGraphMap::new(),
        }
    }

    /// Build a graph from explicit vertices and edges. Edge endpoints must be listed as vertices.
    pub fn from_edges<I, E>(vertices: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        E: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Insert a vertex with no successors.
    ///
    /// Re-adding an existing vertex drops its outgoing edges. Edges pointing
    /// at it from other vertices are left alone, and every other vertex keeps
    /// its successor order.
    pub fn add_vertex(&mut self, id: V) {
        if !self.graph.contains_node(id) {
            self.graph.add_node(id);
            return;
        }

        let cleared = self.graph.neighbors(id).count();
        if cleared == 0 {
            return;
        }
        debug!("Re-adding vertex {:?} clears {} outgoing edges", id, cleared);

        // petgraph's remove_edge swap-removes from the target's adjacency
        // list, so rebuild the map instead to keep every successor order.
        let mut rebuilt = DiGraphMap::with_capacity(
            self.graph.node_count(),
            self.graph.edge_count() - cleared,
        );
        for vertex in self.graph.nodes() {
            rebuilt.add_node(vertex);
        }
        for vertex in self.graph.nodes() {
            if vertex == id {
                continue;
            }
            for successor in self.graph.neighbors(vertex) {
                rebuilt.add_edge(vertex, successor, ());
            }
        }
        self.graph = rebuilt;
    }

    /// Add `id` unless it is already present. Never touches existing edges.
    pub(crate) fn ensure_vertex(&mut self, id: V) {
        if !self.graph.contains_node(id) {
            self.graph.add_node(id);
        }
    }

    /// Add an edge, creating missing endpoints.
    pub(crate) fn insert_edge(&mut self, from: V, to: V) {
        self.graph.add_edge(from, to, ());
    }

    /// Add a directed edge `from -> to`. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: V, to: V) -> Result<()> {
        if !self.graph.contains_node(from) {
            return Err(GraphError::missing_vertex(from));
        }
        if !self.graph.contains_node(to) {
            return Err(GraphError::missing_vertex(to));
        }
        self.graph.add_edge(from, to, ());
        Ok(())
    }

    /// Direct successors of `id`, in edge insertion order
    pub fn get_neighbors(&self, id: V) -> Result<Vec<V>> {
        if !self.graph.contains_node(id) {
            return Err(GraphError::missing_vertex(id));
        }
        Ok(self.graph.neighbors(id).collect())
    }

    /// Successors of a vertex already known to be present.
    pub(crate) fn successors(&self, id: V) -> impl Iterator<Item = V> + '_ {
        self.graph.neighbors(id)
    }

    pub fn contains_vertex(&self, id: V) -> bool {
        self.graph.contains_node(id)
    }

    pub fn contains_edge(&self, from: V, to: V) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Get the number of vertices in the graph
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.graph.nodes()
    }

    /// Sorted view of the adjacency relation, suitable for printing
    pub fn adjacency(&self) -> BTreeMap<V, Vec<V>> {
        self.graph
            .nodes()
            .map(|vertex| {
                let mut successors: Vec<V> = self.graph.neighbors(vertex).collect();
                successors.sort();
                (vertex, successors)
            })
            .collect()
    }

    /// Vertices with no outgoing edges
    pub fn leaf_nodes(&self) -> Vec<V> {
        self.graph
            .nodes()
            .filter(|&v| self.graph.neighbors_directed(v, Direction::Outgoing).next().is_none())
            .collect()
    }

    /// Vertices with no incoming edges
    pub fn root_nodes(&self) -> Vec<V> {
        self.graph
            .nodes()
            .filter(|&v| self.graph.neighbors_directed(v, Direction::Incoming).next().is_none())
            .collect()
    }

    /// Get graph statistics
    pub fn statistics(&self) -> GraphStatistics {
        let total_nodes = self.vertex_count();
        let total_edges = self.edge_count();

        // Each edge contributes one out-degree and one in-degree
        let average_degree = if total_nodes > 0 {
            (2 * total_edges) as f64 / total_nodes as f64
        } else {
            0.0
        };

        GraphStatistics {
            total_nodes,
            total_edges,
            leaf_nodes: self.leaf_nodes().len(),
            root_nodes: self.root_nodes().len(),
            average_degree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub leaf_nodes: usize,
    pub root_nodes: usize,
    pub average_degree: f64,
}
