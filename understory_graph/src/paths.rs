// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enumeration of root-to-leaf paths and cycles.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use crate::descending::{Traversal, Visit};
use crate::graph::Graph;
use crate::intern::NodeId;
use crate::order::{NaturalOrder, Tiebreak};

/// An ordered sequence of nodes, each one a child of the previous one.
pub type Path<N> = Vec<N>;

/// Enumerates paths of `graph`, returning `(acyclic, cyclic)`.
///
/// Children are visited in natural order. This is shorthand for
/// `PathFinder::new().include_subtree(include_subtree).find(graph)`; see
/// [`PathFinder`] for what ends up in each list.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, get_paths};
///
/// let graph = Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])]);
/// let (acyclic, cyclic) = get_paths(&graph, false);
/// assert_eq!(acyclic, [vec![1, 3, 2]]);
/// assert_eq!(cyclic, [vec![2, 3, 2]]);
/// ```
#[must_use]
pub fn get_paths<N>(graph: &Graph<N>, include_subtree: bool) -> (Vec<Path<N>>, Vec<Path<N>>)
where
    N: Clone + Eq + Hash + Ord,
{
    PathFinder::new()
        .include_subtree(include_subtree)
        .find(graph)
}

/// Builder for path enumeration.
///
/// Nodes are processed in [descending order](crate::DescendingSort), so every
/// child is done before its parent (cycles aside). Each key with children
/// gets a list of paths starting at it, built from its children's lists:
///
/// - A child with no list of its own (a leaf, or a node whose walk is still
///   open higher up a cycle) contributes the single path `[child]`.
/// - A child path that already contains the node closes a cycle. The node,
///   followed by that path up to and including the node's second occurrence,
///   is recorded as a cyclic path.
/// - If the child itself closed a cycle, the node's path through it stops
///   there: `[node, child]`.
/// - Otherwise the node is prepended to the child path.
///
/// The acyclic result holds the paths of the *elder* nodes, the keys that no
/// key processed after them lists as a child, newest first. With
/// [`include_subtree`](Self::include_subtree) it instead holds the paths of
/// every key with children, in processing order. Cyclic paths are listed in
/// the order they were found.
///
/// The number of paths can grow exponentially with the depth of the graph.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, GraphOrder, PathFinder};
///
/// let graph = Graph::from([(1, vec![3, 2]), (2, vec![4])]);
///
/// let (acyclic, cyclic) = PathFinder::new().find(&graph);
/// assert_eq!(acyclic, [vec![1, 2, 4], vec![1, 3]]);
/// assert!(cyclic.is_empty());
///
/// let (acyclic, _) = PathFinder::new()
///     .include_subtree(true)
///     .tiebreak(GraphOrder)
///     .find(&graph);
/// assert_eq!(acyclic, [vec![2, 4], vec![1, 3], vec![1, 2, 4]]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct PathFinder<T = NaturalOrder> {
    include_subtree: bool,
    tiebreak: T,
}

impl PathFinder {
    /// Creates a path finder that reports elder paths only, visiting children
    /// in natural order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> PathFinder<T> {
    /// Sets whether paths starting below the elder nodes are reported too.
    #[must_use]
    pub fn include_subtree(mut self, include_subtree: bool) -> Self {
        self.include_subtree = include_subtree;
        self
    }

    /// Replaces the order in which children are visited.
    #[must_use]
    pub fn tiebreak<U>(self, tiebreak: U) -> PathFinder<U> {
        PathFinder {
            include_subtree: self.include_subtree,
            tiebreak,
        }
    }

    /// Enumerates paths of `graph`, returning `(acyclic, cyclic)`.
    #[must_use]
    pub fn find<N>(&self, graph: &Graph<N>) -> (Vec<Path<N>>, Vec<Path<N>>)
    where
        N: Clone + Eq + Hash,
        T: Tiebreak<N>,
    {
        if graph.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let count = graph.id_bound();
        // Paths starting at each processed node.
        let mut memo: Vec<Option<Vec<Vec<NodeId>>>> = vec![None; count];
        let mut closes_cycle = vec![false; count];
        let mut elders = VecDeque::new();
        let mut processed = Vec::new();
        let mut cyclic = Vec::new();

        let mut traversal = Traversal::new(graph, &self.tiebreak);
        while let Some(visit) = traversal.next_visit() {
            let Visit::Node { id, children } = visit else {
                continue;
            };
            if children.is_empty() {
                continue;
            }

            elders.push_front(id);
            let mut paths = Vec::new();
            for &child in &children {
                if let Some(at) = elders.iter().position(|&elder| elder == child) {
                    elders.remove(at);
                }

                let leaf;
                let child_paths = match &memo[child.index()] {
                    Some(child_paths) => child_paths.as_slice(),
                    None => {
                        leaf = [vec![child]];
                        &leaf[..]
                    }
                };

                let mut stopped = false;
                for path in child_paths {
                    if let Some(at) = path.iter().position(|&n| n == id) {
                        let mut cycle = Vec::with_capacity(at + 2);
                        cycle.push(id);
                        cycle.extend_from_slice(&path[..=at]);
                        cyclic.push(cycle);
                        closes_cycle[id.index()] = true;
                    } else if closes_cycle[child.index()] {
                        if !stopped {
                            paths.push(vec![id, child]);
                            stopped = true;
                        }
                    } else {
                        let mut extended = Vec::with_capacity(path.len() + 1);
                        extended.push(id);
                        extended.extend_from_slice(path);
                        paths.push(extended);
                    }
                }
            }
            memo[id.index()] = Some(paths);
            processed.push(id);
        }

        let starts: Vec<NodeId> = if self.include_subtree {
            processed
        } else {
            elders.into_iter().collect()
        };
        let to_nodes = |path: &Vec<NodeId>| -> Path<N> {
            path.iter().map(|&id| graph[id].clone()).collect()
        };
        let acyclic: Vec<Path<N>> = starts
            .iter()
            .filter_map(|start| memo[start.index()].as_ref())
            .flatten()
            .map(to_nodes)
            .collect();
        let cyclic: Vec<Path<N>> = cyclic.iter().map(to_nodes).collect();

        tracing::trace!(
            acyclic = acyclic.len(),
            cyclic = cyclic.len(),
            include_subtree = self.include_subtree,
            "path enumeration complete"
        );
        (acyclic, cyclic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::GraphOrder;
    use alloc::vec;

    fn layered() -> Graph<u32> {
        Graph::from([
            (7, vec![5, 4]),
            (5, vec![3, 2]),
            (8, vec![5, 1]),
            (6, vec![5]),
            (4, vec![3, 1]),
        ])
    }

    #[test]
    fn empty_graph_has_no_paths() {
        for include_subtree in [false, true] {
            let (acyclic, cyclic) = get_paths(&Graph::<u32>::new(), include_subtree);
            assert!(acyclic.is_empty(), "no acyclic paths");
            assert!(cyclic.is_empty(), "no cyclic paths");
        }
    }

    #[test]
    fn leaves_have_no_paths() {
        let graph = Graph::from([(1, vec![]), (2, vec![]), (3, vec![])]);
        for include_subtree in [false, true] {
            let (acyclic, cyclic) = get_paths(&graph, include_subtree);
            assert!(acyclic.is_empty(), "no acyclic paths");
            assert!(cyclic.is_empty(), "no cyclic paths");
        }
    }

    #[test]
    fn single_relations_newest_elder_first() {
        let graph = Graph::from([(4, vec![1]), (5, vec![2]), (6, vec![3])]);
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert_eq!(acyclic, vec![vec![6, 3], vec![5, 2], vec![4, 1]]);
        assert!(cyclic.is_empty());
    }

    #[test]
    fn elder_paths_of_a_layered_graph() {
        let (acyclic, cyclic) = get_paths(&layered(), false);
        assert_eq!(
            acyclic,
            vec![
                vec![6, 5, 2],
                vec![6, 5, 3],
                vec![8, 1],
                vec![8, 5, 2],
                vec![8, 5, 3],
                vec![7, 4, 1],
                vec![7, 4, 3],
                vec![7, 5, 2],
                vec![7, 5, 3],
            ]
        );
        assert!(cyclic.is_empty());
    }

    #[test]
    fn subtree_paths_follow_processing_order() {
        let (acyclic, cyclic) = get_paths(&layered(), true);
        assert_eq!(
            acyclic,
            vec![
                vec![4, 1],
                vec![4, 3],
                vec![5, 2],
                vec![5, 3],
                vec![7, 4, 1],
                vec![7, 4, 3],
                vec![7, 5, 2],
                vec![7, 5, 3],
                vec![8, 1],
                vec![8, 5, 2],
                vec![8, 5, 3],
                vec![6, 5, 2],
                vec![6, 5, 3],
            ]
        );
        assert!(cyclic.is_empty());
    }

    #[test]
    fn direct_cycle() {
        let graph = Graph::from([(1, vec![2]), (2, vec![1])]);
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert!(acyclic.is_empty());
        assert_eq!(cyclic, vec![vec![1, 2, 1]]);
    }

    #[test]
    fn transitive_cycle_beside_acyclic_subtree() {
        let graph = Graph::from([
            (1, vec![2]),
            (2, vec![3]),
            (3, vec![1]),
            (5, vec![4]),
            (4, vec![6]),
        ]);
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert_eq!(acyclic, vec![vec![5, 4, 6]]);
        assert_eq!(cyclic, vec![vec![1, 2, 3, 1]]);
    }

    #[test]
    fn cycle_below_a_root() {
        let graph = Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])]);
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert_eq!(acyclic, vec![vec![1, 3, 2]]);
        assert_eq!(cyclic, vec![vec![2, 3, 2]]);

        let (acyclic, cyclic) = get_paths(&graph, true);
        assert_eq!(acyclic, vec![vec![3, 2], vec![1, 3, 2]]);
        assert_eq!(cyclic, vec![vec![2, 3, 2]]);
    }

    #[test]
    fn several_cycles_through_one_node() {
        let graph = Graph::from([(1, vec![2]), (2, vec![1, 3]), (3, vec![1])]);
        for include_subtree in [false, true] {
            let (_, cyclic) = get_paths(&graph, include_subtree);
            assert_eq!(cyclic, vec![vec![1, 2, 1], vec![1, 2, 3, 1]]);
        }
    }

    #[test]
    fn cycle_beside_unrelated_edge() {
        let graph = Graph::from([(1, vec![2]), (2, vec![1]), (4, vec![20])]);
        let (acyclic, cyclic) = get_paths(&graph, true);
        assert_eq!(acyclic, vec![vec![2, 1], vec![4, 20]]);
        assert_eq!(cyclic, vec![vec![1, 2, 1]]);

        let (acyclic, _) = get_paths(&graph, false);
        assert_eq!(acyclic, vec![vec![4, 20]]);
    }

    #[test]
    fn paths_into_a_cycle_stop_at_its_entry() {
        // 1 closes the cycle 1 -> 2 -> 1 and also reaches the leaf 3.
        let graph = Graph::from([(0, vec![1]), (1, vec![2, 3]), (2, vec![1])]);
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert_eq!(acyclic, vec![vec![0, 1]]);
        assert_eq!(cyclic, vec![vec![1, 2, 1]]);

        let (acyclic, _) = get_paths(&graph, true);
        assert_eq!(acyclic, vec![vec![2, 1], vec![1, 3], vec![0, 1]]);
    }

    #[test]
    fn self_loop_is_a_two_node_cycle() {
        let graph = Graph::from([(1, vec![1, 2])]);
        let (acyclic, cyclic) = get_paths(&graph, true);
        assert_eq!(acyclic, vec![vec![1, 2]]);
        assert_eq!(cyclic, vec![vec![1, 1]]);

        // 1 is its own child, so it is no elder and has no elder paths.
        let (acyclic, cyclic) = get_paths(&graph, false);
        assert!(acyclic.is_empty(), "self-looped node is not an elder");
        assert_eq!(cyclic, vec![vec![1, 1]]);
    }

    #[test]
    fn tiebreak_controls_child_order() {
        let graph = Graph::from([(1, vec![3, 2])]);
        let (natural, _) = PathFinder::new().find(&graph);
        assert_eq!(natural, vec![vec![1, 2], vec![1, 3]]);

        let (inserted, _) = PathFinder::new().tiebreak(GraphOrder).find(&graph);
        assert_eq!(inserted, vec![vec![1, 3], vec![1, 2]]);
    }
}
