use crate::error::{GraphError, Result};
use crate::lineage::graph::{LineageGraph, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Search discipline used by the enumeration and path-finding entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    #[default]
    BreadthFirst,
    DepthFirst,
    DepthFirstRecursive,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::BreadthFirst => "breadth-first",
            TraversalOrder::DepthFirst => "depth-first",
            TraversalOrder::DepthFirstRecursive => "depth-first-recursive",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bfs" | "bft" | "breadth-first" => Ok(TraversalOrder::BreadthFirst),
            "dfs" | "dft" | "depth-first" => Ok(TraversalOrder::DepthFirst),
            "dfs-recursive" | "dft-recursive" | "depth-first-recursive" => {
                Ok(TraversalOrder::DepthFirstRecursive)
            }
            other => Err(GraphError::InvalidInput(format!(
                "unknown traversal order: {} (expected: bfs, dfs, or dfs-recursive)",
                other
            ))),
        }
    }
}

/// Lazy breadth-first walk. A vertex is emitted the first time it is dequeued.
pub struct Bft<'g, V: Vertex> {
    graph: &'g LineageGraph<V>,
    queue: VecDeque<V>,
    visited: HashSet<V>,
}

impl<'g, V: Vertex> Bft<'g, V> {
    pub fn new(graph: &'g LineageGraph<V>, start: V) -> Result<Self> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }
        Ok(Self {
            graph,
            queue: VecDeque::from([start]),
            visited: HashSet::new(),
        })
    }
}

impl<V: Vertex> Iterator for Bft<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        while let Some(vertex) = self.queue.pop_front() {
            if self.visited.insert(vertex) {
                self.queue.extend(self.graph.successors(vertex));
                return Some(vertex);
            }
        }
        None
    }
}

/// Lazy depth-first walk over an explicit stack, same visit-on-pop rule as [`Bft`].
pub struct Dft<'g, V: Vertex> {
    graph: &'g LineageGraph<V>,
    stack: Vec<V>,
    visited: HashSet<V>,
}

impl<'g, V: Vertex> Dft<'g, V> {
    pub fn new(graph: &'g LineageGraph<V>, start: V) -> Result<Self> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }
        Ok(Self {
            graph,
            stack: vec![start],
            visited: HashSet::new(),
        })
    }
}

impl<V: Vertex> Iterator for Dft<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        while let Some(vertex) = self.stack.pop() {
            if self.visited.insert(vertex) {
                self.stack.extend(self.graph.successors(vertex));
                return Some(vertex);
            }
        }
        None
    }
}

/// Graph traversal utilities over a [`LineageGraph`]
pub struct GraphTraversal;

impl GraphTraversal {
    /// Every vertex reachable from `start`, in breadth-first order
    pub fn breadth_first_enumerate<V: Vertex>(graph: &LineageGraph<V>, start: V) -> Result<Vec<V>> {
        let order: Vec<V> = Bft::new(graph, start)?.collect();
        debug!("Breadth-first walk from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Every vertex reachable from `start`, in stack-based depth-first order
    pub fn depth_first_enumerate<V: Vertex>(graph: &LineageGraph<V>, start: V) -> Result<Vec<V>> {
        let order: Vec<V> = Dft::new(graph, start)?.collect();
        debug!("Depth-first walk from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Depth-first enumeration by recursive descent
    pub fn depth_first_enumerate_recursive<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
    ) -> Result<Vec<V>> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }

        let mut visited = HashSet::new();
        let mut order = Vec::new();
        Self::dft_recursive(graph, start, &mut visited, &mut order);

        debug!("Recursive depth-first walk from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Recursive DFT helper
    fn dft_recursive<V: Vertex>(
        graph: &LineageGraph<V>,
        current: V,
        visited: &mut HashSet<V>,
        order: &mut Vec<V>,
    ) {
        visited.insert(current);
        order.push(current);

        for neighbor in graph.successors(current) {
            if !visited.contains(&neighbor) {
                Self::dft_recursive(graph, neighbor, visited, order);
            }
        }
    }

    /// Shortest path (in edge count) from `start` to `goal`, or `None` if unreachable
    pub fn breadth_first_path<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
        goal: V,
    ) -> Result<Option<Vec<V>>> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([vec![start]]);

        while let Some(path) = queue.pop_front() {
            let Some(&vertex) = path.last() else { continue };
            if !visited.insert(vertex) {
                continue;
            }
            if vertex == goal {
                debug!("Breadth-first search reached {:?} in {} hops", goal, path.len() - 1);
                return Ok(Some(path));
            }

            for neighbor in graph.successors(vertex) {
                if !visited.contains(&neighbor) {
                    let mut next = path.clone();
                    next.push(neighbor);
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }

    /// Some path from `start` to `goal` in depth-first discovery order, not necessarily the shortest
    pub fn depth_first_path<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
        goal: V,
    ) -> Result<Option<Vec<V>>> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }

        let mut visited = HashSet::new();
        let mut stack = vec![vec![start]];

        while let Some(path) = stack.pop() {
            let Some(&vertex) = path.last() else { continue };
            if !visited.insert(vertex) {
                continue;
            }
            if vertex == goal {
                debug!("Depth-first search reached {:?} in {} hops", goal, path.len() - 1);
                return Ok(Some(path));
            }

            for neighbor in graph.successors(vertex) {
                if !visited.contains(&neighbor) {
                    let mut next = path.clone();
                    next.push(neighbor);
                    stack.push(next);
                }
            }
        }

        Ok(None)
    }

    /// Depth-first path search by recursive descent
    pub fn depth_first_path_recursive<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
        goal: V,
    ) -> Result<Option<Vec<V>>> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::missing_vertex(start));
        }

        let mut visited = HashSet::new();
        Ok(Self::dfs_recursive(graph, start, goal, &mut visited, &[]))
    }

    /// Recursive DFS helper. Each call owns its extended path, so siblings never see each other's vertices.
    fn dfs_recursive<V: Vertex>(
        graph: &LineageGraph<V>,
        current: V,
        goal: V,
        visited: &mut HashSet<V>,
        path: &[V],
    ) -> Option<Vec<V>> {
        visited.insert(current);

        let mut path = path.to_vec();
        path.push(current);

        if current == goal {
            return Some(path);
        }

        for neighbor in graph.successors(current) {
            if !visited.contains(&neighbor) {
                if let Some(found) = Self::dfs_recursive(graph, neighbor, goal, visited, &path) {
                    return Some(found);
                }
            }
        }

        None
    }

    /// Enumerate reachable vertices using the requested discipline
    pub fn enumerate<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
        order: TraversalOrder,
    ) -> Result<Vec<V>> {
        match order {
            TraversalOrder::BreadthFirst => Self::breadth_first_enumerate(graph, start),
            TraversalOrder::DepthFirst => Self::depth_first_enumerate(graph, start),
            TraversalOrder::DepthFirstRecursive => Self::depth_first_enumerate_recursive(graph, start),
        }
    }

    /// Find a path using the requested discipline. Only breadth-first guarantees a shortest path.
    pub fn find_path<V: Vertex>(
        graph: &LineageGraph<V>,
        start: V,
        goal: V,
        order: TraversalOrder,
    ) -> Result<Option<Vec<V>>> {
        match order {
            TraversalOrder::BreadthFirst => Self::breadth_first_path(graph, start, goal),
            TraversalOrder::DepthFirst => Self::depth_first_path(graph, start, goal),
            TraversalOrder::DepthFirstRecursive => {
                Self::depth_first_path_recursive(graph, start, goal)
            }
        }
    }

    /// Set of vertices reachable from `start`, including `start`
    pub fn reachable<V: Vertex>(graph: &LineageGraph<V>, start: V) -> Result<HashSet<V>> {
        Ok(Bft::new(graph, start)?.collect())
    }
}
