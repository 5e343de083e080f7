// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descending (top-down) traversal order.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::graph::{ChildIds, Graph};
use crate::intern::NodeId;
use crate::order::{NaturalOrder, Tiebreak};

/// Where a traversal starts from.
enum Start<N> {
    Known(NodeId),
    /// A starting node the graph has never seen; emitted as a leaf.
    Unknown(N),
}

/// A node finished by a [`Traversal`].
pub(crate) enum Visit<N> {
    Node {
        id: NodeId,
        /// The node's children, arranged in the order they were descended into.
        children: ChildIds,
    },
    Unknown(N),
}

struct Frame {
    node: NodeId,
    children: ChildIds,
    /// Index of the first child not yet considered.
    next: usize,
}

/// Depth-first walk shared by [`DescendingSort`] and the path finder.
pub(crate) struct Traversal<'g, N, T> {
    graph: &'g Graph<N>,
    tiebreak: T,
    starts: vec::IntoIter<Start<N>>,
    visited: Vec<bool>,
    stack: Vec<Frame>,
}

impl<'g, N, T> Traversal<'g, N, T>
where
    N: Eq + Hash,
    T: Tiebreak<N>,
{
    /// Starts from every key in insertion order.
    pub(crate) fn new(graph: &'g Graph<N>, tiebreak: T) -> Self {
        let starts: Vec<_> = graph.key_ids().iter().copied().map(Start::Known).collect();
        Self {
            graph,
            tiebreak,
            starts: starts.into_iter(),
            visited: vec![false; graph.id_bound()],
            stack: Vec::new(),
        }
    }

    fn set_starts<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        let mut starts = Vec::new();
        for node in nodes {
            match self.graph.node_id(&node) {
                Some(id) => starts.push(Start::Known(id)),
                None if starts
                    .iter()
                    .any(|start| matches!(start, Start::Unknown(seen) if *seen == node)) => {}
                None => starts.push(Start::Unknown(node)),
            }
        }
        self.starts = starts.into_iter();
    }

    fn descend(&mut self, id: NodeId) {
        self.visited[id.index()] = true;
        let mut children: ChildIds = self.graph.child_ids(id).iter().copied().collect();
        self.tiebreak.arrange(self.graph, &mut children);
        self.stack.push(Frame {
            node: id,
            children,
            next: 0,
        });
    }

    /// Returns the next finished node.
    ///
    /// A node finishes once none of its children is left unvisited. Children
    /// already visited (finished, or still open further up the walk when the
    /// graph has a cycle) are not entered again.
    pub(crate) fn next_visit(&mut self) -> Option<Visit<N>> {
        loop {
            if let Some(frame) = self.stack.last_mut() {
                let unvisited = frame.children[frame.next..]
                    .iter()
                    .position(|child| !self.visited[child.index()]);
                if let Some(offset) = unvisited {
                    let child = frame.children[frame.next + offset];
                    frame.next += offset + 1;
                    self.descend(child);
                    continue;
                }
                let frame = self.stack.pop()?;
                return Some(Visit::Node {
                    id: frame.node,
                    children: frame.children,
                });
            }

            match self.starts.next()? {
                Start::Known(id) => {
                    if !self.visited[id.index()] {
                        self.descend(id);
                    }
                }
                Start::Unknown(node) => return Some(Visit::Unknown(node)),
            }
        }
    }
}

/// Iterator over the nodes of a graph in descending traversal order.
///
/// The traversal walks from the top of the graph down to its leaves, depth
/// first, and never fails: a node reached again (through another parent, or
/// around a cycle) is not entered twice. Each node is emitted once, as soon
/// as none of its children is left unvisited. For a graph without cycles this
/// means a node's children are always emitted before the node itself.
///
/// # Starting nodes
///
/// By default the traversal starts from every key in insertion order,
/// skipping keys an earlier start already reached. Roots are therefore always
/// starting points, and a component made only of cycles is entered at its
/// first key. Use [`starting_at`](Self::starting_at) to walk only what is
/// reachable from chosen nodes.
///
/// Every iterator owns its own state, so several of them may walk the same
/// graph independently.
///
/// # Example
///
/// ```
/// use understory_graph::{DescendingSort, Graph};
///
/// let graph = Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])]);
///
/// let order: Vec<_> = DescendingSort::new(&graph).collect();
/// assert_eq!(order, [3, 2, 1]);
///
/// let from_two: Vec<_> = DescendingSort::new(&graph).starting_at([2]).collect();
/// assert_eq!(from_two, [3, 2]);
/// ```
pub struct DescendingSort<'g, N, T = NaturalOrder> {
    traversal: Traversal<'g, N, T>,
}

impl<'g, N> DescendingSort<'g, N>
where
    N: Clone + Eq + Hash + Ord,
{
    /// Creates a traversal over `graph` that visits children in natural order.
    #[must_use]
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self::with_tiebreak(graph, NaturalOrder)
    }
}

impl<'g, N, T> DescendingSort<'g, N, T>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
    /// Creates a traversal over `graph` that visits children in the order
    /// chosen by `tiebreak`.
    #[must_use]
    pub fn with_tiebreak(graph: &'g Graph<N>, tiebreak: T) -> Self {
        Self {
            traversal: Traversal::new(graph, tiebreak),
        }
    }

    /// Replaces the starting nodes.
    ///
    /// Starts are taken in the given order. A starting node the graph does not
    /// know is emitted as a leaf (once, however often it is given). An empty
    /// list yields nothing.
    #[must_use]
    pub fn starting_at<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        self.traversal.set_starts(nodes);
        self
    }
}

impl<N, T> Iterator for DescendingSort<'_, N, T>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        match self.traversal.next_visit()? {
            Visit::Node { id, .. } => Some(self.traversal.graph[id].clone()),
            Visit::Unknown(node) => Some(node),
        }
    }
}

impl<N, T> FusedIterator for DescendingSort<'_, N, T>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
}

impl<N, T> fmt::Debug for DescendingSort<'_, N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescendingSort")
            .field("depth", &self.traversal.stack.len())
            .finish_non_exhaustive()
    }
}

/// Collects the descending traversal of `graph`, starting from every key.
///
/// See [`DescendingSort`] for the traversal rules. Never fails, even on a
/// graph with cycles.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, topological_sort_descending};
///
/// let graph = Graph::from([
///     (7, vec![5, 4]),
///     (5, vec![3, 2]),
///     (8, vec![5, 1]),
///     (6, vec![5]),
///     (4, vec![3, 1]),
/// ]);
/// assert_eq!(topological_sort_descending(&graph), [1, 3, 4, 2, 5, 7, 8, 6]);
/// ```
#[must_use]
pub fn topological_sort_descending<N>(graph: &Graph<N>) -> Vec<N>
where
    N: Clone + Eq + Hash + Ord,
{
    collect(DescendingSort::new(graph))
}

/// Collects the descending traversal of everything reachable from
/// `starting_nodes`.
#[must_use]
pub fn topological_sort_descending_from<N, I>(graph: &Graph<N>, starting_nodes: I) -> Vec<N>
where
    N: Clone + Eq + Hash + Ord,
    I: IntoIterator<Item = N>,
{
    collect(DescendingSort::new(graph).starting_at(starting_nodes))
}

/// Collects the descending traversal of `graph`, visiting children in the
/// order chosen by `tiebreak`.
#[must_use]
pub fn topological_sort_descending_with<N, T>(graph: &Graph<N>, tiebreak: &T) -> Vec<N>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N> + ?Sized,
{
    collect(DescendingSort::with_tiebreak(graph, tiebreak))
}

fn collect<N, T>(sort: DescendingSort<'_, N, T>) -> Vec<N>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
    let order: Vec<N> = sort.collect();
    tracing::trace!(nodes = order.len(), "descending topological sort complete");
    order
}
