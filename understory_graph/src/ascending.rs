// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ascending (leaves first) topological sort.

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use crate::error::CycleDetected;
use crate::graph::Graph;
use crate::intern::NodeId;
use crate::order::{NaturalOrder, Tiebreak};

/// Sorts every node of `graph` so that each node comes after all of its children.
///
/// Ties are broken by natural order; see [`topological_sort_ascending_with`]
/// for the algorithm and for nodes that are not `Ord`.
///
/// # Errors
///
/// Returns [`CycleDetected`] if `graph` contains a cycle. No partial order is
/// returned in that case.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, topological_sort_ascending};
///
/// let graph = Graph::from([
///     (7, vec![5, 4]),
///     (5, vec![3, 2]),
///     (8, vec![5, 1]),
///     (6, vec![5]),
///     (4, vec![3, 1]),
/// ]);
///
/// let order = topological_sort_ascending(&graph).unwrap();
/// assert_eq!(order, [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn topological_sort_ascending<N>(graph: &Graph<N>) -> Result<Vec<N>, CycleDetected<N>>
where
    N: Clone + Eq + Hash + Ord,
{
    topological_sort_ascending_with(graph, &NaturalOrder)
}

/// Sorts every node of `graph` leaves first, breaking ties with `tiebreak`.
///
/// Every key and every child is emitted exactly once, and for every edge
/// `A -> B` the child `B` is emitted before `A`.
///
/// # Algorithm
///
/// Kahn's algorithm, run in layers:
///
/// 1. Count the children of every node. Nodes with none form the first layer.
/// 2. Arrange the current layer with `tiebreak` and emit it. For each emitted
///    node, decrement the count of every parent; parents reaching zero form
///    the next layer.
/// 3. Repeat until a layer comes up empty.
///
/// Nodes still holding a non-zero count at that point sit on a cycle or
/// depend on one.
///
/// # Performance
///
/// - Time complexity: O(V + E), plus the cost of arranging each layer.
/// - Space complexity: O(V + E) for the parent lists.
///
/// # Errors
///
/// Returns [`CycleDetected`] carrying `graph` restricted to the nodes that
/// could not be emitted.
pub fn topological_sort_ascending_with<N, T>(
    graph: &Graph<N>,
    tiebreak: &T,
) -> Result<Vec<N>, CycleDetected<N>>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N> + ?Sized,
{
    let count = graph.id_bound();

    // Unresolved children per node, and the reverse edges used to resolve them.
    let mut pending = vec![0_usize; count];
    let mut parents: Vec<Vec<NodeId>> = vec![Vec::new(); count];
    for &key in graph.key_ids() {
        let children = graph.child_ids(key);
        pending[key.index()] = children.len();
        for &child in children {
            parents[child.index()].push(key);
        }
    }

    let mut layer: Vec<NodeId> = (0..count)
        .map(NodeId::from_index)
        .filter(|&id| pending[id.index()] == 0 && graph.is_live(id))
        .collect();
    let mut next = Vec::new();
    let mut order = Vec::with_capacity(graph.node_count());
    let mut layers = 0_usize;

    while !layer.is_empty() {
        tiebreak.arrange(graph, &mut layer);
        for &id in &layer {
            for &parent in &parents[id.index()] {
                let remaining = &mut pending[parent.index()];
                *remaining -= 1;
                if *remaining == 0 {
                    next.push(parent);
                }
            }
        }
        order.extend(layer.drain(..).map(|id| graph[id].clone()));
        mem::swap(&mut layer, &mut next);
        layers += 1;
    }

    if order.len() < graph.node_count() {
        let unresolved: Vec<bool> = pending.iter().map(|&remaining| remaining > 0).collect();
        let cycle = graph.restrict_ids(&unresolved);
        tracing::debug!(
            sorted = order.len(),
            unresolved = cycle.len(),
            "ascending topological sort stalled on a cycle"
        );
        return Err(CycleDetected::new(cycle));
    }

    tracing::trace!(nodes = order.len(), layers, "ascending topological sort complete");
    Ok(order)
}
