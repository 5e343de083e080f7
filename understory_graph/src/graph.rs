// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adjacency-mapped directed graph.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::ops::Index;
use core::slice;

use smallvec::SmallVec;

use crate::intern::{Interner, NodeId};

/// Child list of a single key, deduplicated, in first-insertion order.
pub(crate) type ChildIds = SmallVec<[NodeId; 4]>;

/// A directed graph stored as a mapping from node to its set of children.
///
/// An edge `A -> B` reads "A depends on B": ascending order emits `B` before
/// `A`. A node that only ever appears as a child is still a node of the graph
/// (a leaf); it is just not a *key*.
///
/// Keys keep their insertion order and child sets keep the order in which
/// their members were first inserted. Every algorithm in this crate uses that
/// order as its starting point, which is what makes their output reproducible.
///
/// Two graphs compare equal when they have the same keys and, for every key,
/// the same child *set*; neither key order nor child order matters.
///
/// # Type Parameters
///
/// - `N`: The node type. Must be `Eq + Hash` to build or query a graph;
///   algorithms that return owned nodes also need `Clone`.
///
/// # Example
///
/// ```
/// use understory_graph::Graph;
///
/// // 7 depends on 5 and 4, 5 depends on 3 and 2, ...
/// let graph = Graph::from([
///     (7, vec![5, 4]),
///     (5, vec![3, 2]),
///     (8, vec![5, 1]),
///     (6, vec![5]),
///     (4, vec![3, 1]),
/// ]);
///
/// assert_eq!(graph.len(), 5);
/// assert_eq!(graph.node_count(), 8);
/// assert!(graph.contains_key(&7));
/// assert!(!graph.contains_key(&3));
/// assert!(graph.contains_node(&3));
///
/// let roots: Vec<_> = graph.roots().copied().collect();
/// assert_eq!(roots, [7, 8, 6]);
///
/// let children: Vec<_> = graph.children(&7).unwrap().copied().collect();
/// assert_eq!(children, [5, 4]);
/// ```
///
/// # See Also
///
/// - [`topological_sort_ascending`](crate::topological_sort_ascending): Leaves first, fails on cycles.
/// - [`DescendingSort`](crate::DescendingSort): Top-down traversal, tolerates cycles.
/// - [`get_paths`](crate::get_paths): Acyclic and cyclic path enumeration.
#[derive(Clone)]
pub struct Graph<N> {
    interner: Interner<N>,
    /// `children[id]` is `Some` exactly when `id` is a key.
    children: Vec<Option<ChildIds>>,
    /// Keys in insertion order.
    keys: Vec<NodeId>,
    /// Per id: one for being a key, plus one per key listing it as a child.
    /// An id at zero was dropped by a replacing `insert` and is not a node.
    refs: Vec<u32>,
    /// Number of ids with a non-zero count.
    live: usize,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensures `vec` has at least `len` elements, filling with `None`.
#[inline]
fn grow<T>(vec: &mut Vec<Option<T>>, len: usize) {
    if len > vec.len() {
        vec.resize_with(len, || None);
    }
}

impl<N> Graph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            children: Vec::new(),
            keys: Vec::new(),
            refs: Vec::new(),
            live: 0,
        }
    }

    /// Creates an empty graph with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            interner: Interner::with_capacity(capacity),
            children: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            refs: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the graph has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of distinct nodes, keys and children alike.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Returns the node behind `id`, if `id` belongs to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.interner.get(id).filter(|_| self.is_live(id))
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &N> + '_ {
        self.keys.iter().map(|&id| &self[id])
    }

    /// Returns an iterator over every node in first-seen order.
    ///
    /// This includes nodes that only appear as children. Nodes left behind
    /// when [`insert`](Self::insert) replaced a child set are not included.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.interner
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(index, _)| self.refs[index] > 0)
            .map(|(_, node)| node)
    }

    /// Returns an iterator over `(key, children)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, Children<'_, N>)> + '_ {
        self.keys
            .iter()
            .map(|&id| (&self[id], self.children_of(id)))
    }

    /// Returns an iterator over the roots: keys that are no node's child.
    ///
    /// Roots are yielded in key order. A graph made only of cycles has none.
    pub fn roots(&self) -> impl Iterator<Item = &N> + '_ {
        let is_child = self.child_flags();
        self.keys
            .iter()
            .filter(move |id| !is_child[id.index()])
            .map(|&id| &self[id])
    }

    /// Returns an iterator over the leaves: nodes without children.
    ///
    /// Leaves are yielded in first-seen order and include keys whose child set
    /// is empty.
    pub fn leaves(&self) -> impl Iterator<Item = &N> + '_ {
        self.interner
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(index, _)| {
                self.refs[index] > 0 && self.child_ids(NodeId::from_index(index)).is_empty()
            })
            .map(|(_, node)| node)
    }

    /// Upper bound on ids handed out so far, live or not; sizes per-id tables.
    pub(crate) fn id_bound(&self) -> usize {
        self.interner.len()
    }

    /// Returns `true` if `id` is currently a key or some key's child.
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.refs.get(id.index()).is_some_and(|&refs| refs > 0)
    }

    pub(crate) fn key_ids(&self) -> &[NodeId] {
        &self.keys
    }

    pub(crate) fn is_key(&self, id: NodeId) -> bool {
        self.children.get(id.index()).is_some_and(Option::is_some)
    }

    pub(crate) fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id.index())
            .and_then(Option::as_deref)
            .unwrap_or(&[])
    }

    /// Returns, per node id, whether that node is some key's child.
    pub(crate) fn child_flags(&self) -> Vec<bool> {
        let mut flags = vec![false; self.id_bound()];
        for &id in &self.keys {
            for &child in self.child_ids(id) {
                flags[child.index()] = true;
            }
        }
        flags
    }

    fn retain(&mut self, id: NodeId) {
        let refs = &mut self.refs[id.index()];
        if *refs == 0 {
            self.live += 1;
        }
        *refs += 1;
    }

    fn release(&mut self, id: NodeId) {
        let refs = &mut self.refs[id.index()];
        *refs -= 1;
        if *refs == 0 {
            self.live -= 1;
        }
    }

    fn children_of(&self, id: NodeId) -> Children<'_, N> {
        Children {
            nodes: self.interner.as_slice(),
            ids: self.child_ids(id).iter(),
        }
    }
}

impl<N> Graph<N>
where
    N: Eq + Hash,
{
    /// Inserts `node` as a key with the given children.
    ///
    /// Duplicate children are ignored. If `node` is already a key its child set
    /// is replaced, and it keeps its original position in key order. A former
    /// child that is now neither a key nor any key's child stops being a node
    /// of the graph.
    ///
    /// # Returns
    ///
    /// `true` if `node` was not a key before.
    pub fn insert<I>(&mut self, node: N, children: I) -> bool
    where
        I: IntoIterator<Item = N>,
    {
        let id = self.interner.intern(node);
        let mut ids = ChildIds::new();
        for child in children {
            let child = self.interner.intern(child);
            if !ids.contains(&child) {
                ids.push(child);
            }
        }
        grow(&mut self.children, self.interner.len());
        self.refs.resize(self.interner.len(), 0);

        for &child in &ids {
            self.retain(child);
        }
        let previous = self.children[id.index()].replace(ids);
        match previous {
            Some(previous) => {
                for child in previous {
                    self.release(child);
                }
                false
            }
            None => {
                self.keys.push(id);
                self.retain(id);
                true
            }
        }
    }

    /// Returns the id this graph assigned to `node`.
    #[must_use]
    pub fn node_id(&self, node: &N) -> Option<NodeId> {
        self.interner.lookup(node).filter(|&id| self.is_live(id))
    }

    /// Returns `true` if `node` is a key.
    #[must_use]
    pub fn contains_key(&self, node: &N) -> bool {
        self.node_id(node).is_some_and(|id| self.is_key(id))
    }

    /// Returns `true` if `node` appears anywhere, as a key or as a child.
    #[must_use]
    pub fn contains_node(&self, node: &N) -> bool {
        self.node_id(node).is_some()
    }

    /// Returns the children of `node`, or `None` if `node` is not a key.
    #[must_use]
    pub fn children(&self, node: &N) -> Option<Children<'_, N>> {
        let id = self.node_id(node)?;
        self.is_key(id).then(|| self.children_of(id))
    }

    /// Returns the sub-graph over `nodes`.
    ///
    /// Keys not in `nodes` are dropped and every remaining child set is
    /// restricted to `nodes`. Key order and child order are preserved. Nodes
    /// unknown to this graph are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use understory_graph::Graph;
    ///
    /// let graph = Graph::from([(1, vec![2]), (2, vec![3]), (3, vec![1]), (5, vec![4])]);
    /// let cycle = graph.restrict(&[1, 2, 3]);
    ///
    /// assert_eq!(cycle, Graph::from([(1, vec![2]), (2, vec![3]), (3, vec![1])]));
    /// ```
    #[must_use]
    pub fn restrict<'a, I>(&self, nodes: I) -> Self
    where
        N: Clone + 'a,
        I: IntoIterator<Item = &'a N>,
    {
        let mut keep = vec![false; self.id_bound()];
        for node in nodes {
            if let Some(id) = self.node_id(node) {
                keep[id.index()] = true;
            }
        }
        self.restrict_ids(&keep)
    }

    /// Like [`restrict`](Self::restrict), with the subset given as a per-id mask.
    pub(crate) fn restrict_ids(&self, keep: &[bool]) -> Self
    where
        N: Clone,
    {
        let mut out = Self::new();
        for &id in &self.keys {
            if !keep[id.index()] {
                continue;
            }
            let children = self
                .child_ids(id)
                .iter()
                .filter(|child| keep[child.index()])
                .map(|&child| self[child].clone());
            out.insert(self[id].clone(), children);
        }
        out
    }
}

impl<N> Index<NodeId> for Graph<N> {
    type Output = N;

    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    fn index(&self, id: NodeId) -> &N {
        &self.interner.as_slice()[id.index()]
    }
}

impl<N> PartialEq for Graph<N>
where
    N: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.keys.iter().all(|&id| {
                let Some(theirs) = other.node_id(&self[id]).filter(|&o| other.is_key(o)) else {
                    return false;
                };
                let mine = self.child_ids(id);
                let theirs = other.child_ids(theirs);
                mine.len() == theirs.len()
                    && mine.iter().all(|&child| {
                        other
                            .node_id(&self[child])
                            .is_some_and(|c| theirs.contains(&c))
                    })
            })
    }
}

impl<N> Eq for Graph<N> where N: Eq + Hash {}

impl<N: fmt::Debug> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys.iter().map(|&id| (&self[id], self.children_of(id))))
            .finish()
    }
}

impl<N, I> Extend<(N, I)> for Graph<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn extend<T: IntoIterator<Item = (N, I)>>(&mut self, iter: T) {
        for (node, children) in iter {
            self.insert(node, children);
        }
    }
}

impl<N, I> FromIterator<(N, I)> for Graph<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<N, I, const M: usize> From<[(N, I); M]> for Graph<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn from(entries: [(N, I); M]) -> Self {
        entries.into_iter().collect()
    }
}

/// Iterator over the children of one key.
///
/// Created by [`Graph::children`] and [`Graph::iter`].
pub struct Children<'a, N> {
    nodes: &'a [N],
    ids: slice::Iter<'a, NodeId>,
}

impl<'a, N> Iterator for Children<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| &self.nodes[id.index()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<N> ExactSizeIterator for Children<'_, N> {}

impl<N> Clone for Children<'_, N> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            ids: self.ids.clone(),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Children<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.clone()).finish()
    }
}
