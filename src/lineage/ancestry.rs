use crate::lineage::graph::{LineageGraph, Vertex};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Returned by [`earliest_ancestor`] when the starting individual has no recorded parents.
///
/// The sentinel is indistinguishable from a real individual with id `-1`;
/// callers that use negative ids should go through [`earliest_ancestor_of`].
pub const NO_ANCESTOR: i64 = -1;

/// Resolves ancestors from `(parent, child)` pairs.
///
/// Edges are stored child -> parent, so walking forward from a vertex moves
/// up the family tree.
#[derive(Debug, Clone)]
pub struct AncestorResolver<V: Vertex> {
    graph: LineageGraph<V>,
}

impl<V: Vertex> AncestorResolver<V> {
    /// Build the child -> parent graph from `(parent, child)` pairs
    pub fn from_pairs(pairs: &[(V, V)]) -> Self {
        let mut graph = LineageGraph::new();

        // First pass: every id mentioned as parent or child
        for &(parent, child) in pairs {
            graph.ensure_vertex(parent);
            graph.ensure_vertex(child);
        }

        // Second pass: reversed edges, both endpoints exist by now
        for &(parent, child) in pairs {
            graph.insert_edge(child, parent);
        }

        info!(
            "Ancestry graph built with {} individuals and {} parent links",
            graph.vertex_count(),
            graph.edge_count()
        );

        Self { graph }
    }

    pub fn graph(&self) -> &LineageGraph<V> {
        &self.graph
    }

    /// Most distant ancestor of `start`, ties broken by the smallest id
    pub fn earliest_ancestor(&self, start: V) -> Option<V> {
        self.earliest_ancestor_by(start, V::cmp)
    }

    /// Most distant ancestor of `start`, ties broken by the smallest id under `compare`.
    ///
    /// Returns `None` when `start` has no parents, including when it never
    /// appeared in any pair.
    pub fn earliest_ancestor_by<F>(&self, start: V, compare: F) -> Option<V>
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let generations = self.ancestor_generations(start);
        let earliest = pick_earliest(&generations, compare);
        debug!("Earliest ancestor of {:?} is {:?}", start, earliest);
        earliest
    }

    /// Earliest ancestor and the generation map from a single walk
    pub fn resolve(&self, start: V) -> (Option<V>, BTreeMap<V, usize>) {
        let generations = self.ancestor_generations(start);
        (pick_earliest(&generations, V::cmp), generations)
    }

    /// Every ancestor of `start` with the number of generations on its longest line.
    ///
    /// Runs in O(V + E). A depth-first pass from `start` numbers vertices in
    /// postorder; walking that order backwards and relaxing only edges that
    /// point to a lower postorder number gives longest distances over an
    /// acyclic view of the graph. On cyclic input the edges closing a cycle
    /// are ignored.
    pub fn ancestor_generations(&self, start: V) -> BTreeMap<V, usize> {
        if !self.graph.contains_vertex(start) {
            return BTreeMap::new();
        }

        let postorder = self.postorder(start);
        let rank: HashMap<V, usize> = postorder
            .iter()
            .enumerate()
            .map(|(index, &vertex)| (vertex, index))
            .collect();

        let mut depth: HashMap<V, usize> = HashMap::from([(start, 0)]);
        for &vertex in postorder.iter().rev() {
            let Some(&current) = depth.get(&vertex) else { continue };
            let vertex_rank = rank[&vertex];

            for parent in self.graph.successors(vertex) {
                if rank.get(&parent).is_some_and(|&r| r < vertex_rank) {
                    let entry = depth.entry(parent).or_insert(0);
                    *entry = (*entry).max(current + 1);
                }
            }
        }

        depth.remove(&start);
        debug!("Ancestry walk from {:?} reached {} ancestors", start, depth.len());
        depth.into_iter().collect()
    }

    /// Vertices reachable from `start` in depth-first postorder
    fn postorder(&self, start: V) -> Vec<V> {
        let mut discovered = HashSet::from([start]);
        let mut finished = Vec::new();
        let mut stack = vec![(start, self.parents_of(start))];

        while let Some((vertex, parents)) = stack.last_mut() {
            match parents.next() {
                Some(parent) => {
                    if discovered.insert(parent) {
                        let next = self.parents_of(parent);
                        stack.push((parent, next));
                    }
                }
                None => {
                    let done = *vertex;
                    stack.pop();
                    finished.push(done);
                }
            }
        }

        finished
    }

    fn parents_of(&self, vertex: V) -> std::vec::IntoIter<V> {
        self.graph.successors(vertex).collect::<Vec<_>>().into_iter()
    }
}

/// Deepest entry of a generation map, ties broken by the smallest under `compare`
fn pick_earliest<V, F>(generations: &BTreeMap<V, usize>, mut compare: F) -> Option<V>
where
    V: Vertex,
    F: FnMut(&V, &V) -> Ordering,
{
    let mut best: Option<(V, usize)> = None;

    for (&vertex, &depth) in generations {
        let replace = match best {
            None => true,
            Some((current, best_depth)) => {
                depth > best_depth
                    || (depth == best_depth && compare(&vertex, &current) == Ordering::Less)
            }
        };
        if replace {
            best = Some((vertex, depth));
        }
    }

    best.map(|(vertex, _)| vertex)
}

/// Generic convenience wrapper over [`AncestorResolver`]
pub fn earliest_ancestor_of<V: Vertex>(pairs: &[(V, V)], start: V) -> Option<V> {
    AncestorResolver::from_pairs(pairs).earliest_ancestor(start)
}

/// Earliest ancestor of `start` over integer ids, or [`NO_ANCESTOR`] when there is none
pub fn earliest_ancestor(pairs: &[(i64, i64)], start: i64) -> i64 {
    earliest_ancestor_of(pairs, start).unwrap_or(NO_ANCESTOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SAMPLE_ANCESTORS;

    #[test]
    fn test_reference_family_tree() {
        let expected = [
            (1, 10),
            (2, NO_ANCESTOR),
            (3, 10),
            (4, NO_ANCESTOR),
            (5, 4),
            (6, 10),
            (7, 4),
            (8, 4),
            (9, 4),
            (10, NO_ANCESTOR),
            (11, NO_ANCESTOR),
        ];

        for (start, ancestor) in expected {
            assert_eq!(
                earliest_ancestor(&SAMPLE_ANCESTORS, start),
                ancestor,
                "earliest ancestor of {}",
                start
            );
        }
    }

    #[test]
    fn test_unknown_start_has_no_ancestor() {
        assert_eq!(earliest_ancestor(&SAMPLE_ANCESTORS, 100), NO_ANCESTOR);
        assert_eq!(earliest_ancestor(&[], 1), NO_ANCESTOR);
    }

    #[test]
    fn test_edges_point_from_child_to_parent() {
        let resolver = AncestorResolver::from_pairs(&SAMPLE_ANCESTORS);
        let graph = resolver.graph();
        assert_eq!(graph.vertex_count(), 11);
        assert_eq!(graph.edge_count(), 10);
        assert!(graph.contains_edge(3, 1));
        assert!(!graph.contains_edge(1, 3));
    }

    #[test]
    fn test_tie_break_prefers_smaller_id() {
        let pairs = [(9, 1), (4, 1), (7, 1)];
        assert_eq!(earliest_ancestor(&pairs, 1), 4);
    }

    #[test]
    fn test_longer_line_beats_smaller_id() {
        // 1 <- 2 and 1 <- 50 <- 60
        let pairs = [(2, 1), (50, 1), (60, 50)];
        assert_eq!(earliest_ancestor(&pairs, 1), 60);
    }

    #[test]
    fn test_longest_line_not_shortest() {
        // 4 is a parent of 1 and also a great-grandparent through 2 -> 3
        let pairs = [(4, 1), (2, 1), (3, 2), (4, 3), (5, 1)];
        let resolver = AncestorResolver::from_pairs(&pairs);
        assert_eq!(resolver.earliest_ancestor(1), Some(4));
        assert_eq!(resolver.ancestor_generations(1)[&4], 3);
    }

    #[test]
    fn test_custom_comparator() {
        let pairs = [(9, 1), (4, 1), (7, 1)];
        let resolver = AncestorResolver::from_pairs(&pairs);
        assert_eq!(resolver.earliest_ancestor_by(1, |a, b| b.cmp(a)), Some(9));
    }

    #[test]
    fn test_string_identifiers() {
        let pairs = [("grandma", "mom"), ("mom", "me"), ("dad", "me")];
        assert_eq!(earliest_ancestor_of(&pairs, "me"), Some("grandma"));
        assert_eq!(earliest_ancestor_of(&pairs, "grandma"), None);
    }

    #[test]
    fn test_cycles_terminate() {
        let pairs = [(1, 2), (2, 1), (3, 1)];
        assert_eq!(earliest_ancestor(&pairs, 2), 3);
    }

    #[test]
    fn test_ancestor_generations() {
        let resolver = AncestorResolver::from_pairs(&SAMPLE_ANCESTORS);
        let generations = resolver.ancestor_generations(6);

        assert_eq!(generations.get(&3), Some(&1));
        assert_eq!(generations.get(&5), Some(&1));
        assert_eq!(generations.get(&1), Some(&2));
        assert_eq!(generations.get(&4), Some(&2));
        assert_eq!(generations.get(&10), Some(&3));
        assert!(!generations.contains_key(&6));
        assert!(resolver.ancestor_generations(10).is_empty());
    }

    #[test]
    fn test_deep_diamond_lattice_is_linear() {
        // 65 layers of two individuals; both members of layer k + 1 are
        // parents of both members of layer k, giving 2^64 distinct lines.
        let mut pairs = Vec::new();
        for layer in 0..64i64 {
            for child in [2 * layer, 2 * layer + 1] {
                for parent in [2 * layer + 2, 2 * layer + 3] {
                    pairs.push((parent, child));
                }
            }
        }

        let resolver = AncestorResolver::from_pairs(&pairs);
        let (ancestor, generations) = resolver.resolve(0);
        assert_eq!(ancestor, Some(128));
        assert_eq!(generations[&128], 64);
        assert_eq!(generations[&129], 64);
        assert_eq!(generations[&2], 1);
        assert_eq!(generations.len(), 128);
        assert_eq!(earliest_ancestor(&pairs, 1), 128);
    }

    #[test]
    fn test_resolve_matches_separate_calls() {
        let resolver = AncestorResolver::from_pairs(&SAMPLE_ANCESTORS);
        for start in 1..=11 {
            let (ancestor, generations) = resolver.resolve(start);
            assert_eq!(ancestor, resolver.earliest_ancestor(start));
            assert_eq!(generations, resolver.ancestor_generations(start));
        }
    }

    #[test]
    fn test_self_parent_is_ignored() {
        let pairs = [(1, 1), (2, 1)];
        assert_eq!(earliest_ancestor(&pairs, 1), 2);
        assert_eq!(earliest_ancestor(&[(5, 5)], 5), NO_ANCESTOR);
    }

    #[test]
    fn test_sentinel_collides_with_negative_id() {
        let pairs = [(-1, 0)];
        assert_eq!(earliest_ancestor(&pairs, 0), NO_ANCESTOR);
        assert_eq!(earliest_ancestor_of(&pairs, 0), Some(-1));
        assert_eq!(earliest_ancestor_of(&[(3, 0)], 3), None);
    }
}
