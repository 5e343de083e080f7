// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tie-breaking between mutually unconstrained nodes.
//!
//! Topological orders are rarely unique. Whenever an algorithm in this crate
//! holds a batch of nodes it may visit or emit in any order (a ready layer of
//! the ascending sort, the children of a node about to be descended into), it
//! hands the batch to a [`Tiebreak`] first.
//!
//! Only the selected tiebreak imposes additional trait bounds:
//!
//! - [`NaturalOrder`]: ascending `Ord` order (requires `N: Ord`). This is what
//!   the convenience functions use.
//! - [`GraphOrder`]: the order the graph stores nodes in. Works for nodes that
//!   are hashable but not comparable.

use crate::graph::Graph;
use crate::intern::NodeId;

/// Arranges a batch of nodes that are free to come in any order.
///
/// Implementations must be deterministic: the same graph and the same batch
/// must always produce the same arrangement.
pub trait Tiebreak<N> {
    /// Reorders `batch` in place. Every id in `batch` belongs to `graph`.
    fn arrange(&self, graph: &Graph<N>, batch: &mut [NodeId]);
}

/// Breaks ties by the nodes' natural (`Ord`) order, smallest first.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, NaturalOrder, topological_sort_ascending_with};
///
/// let graph = Graph::from([(4, vec![3, 1]), (5, vec![2])]);
/// let order = topological_sort_ascending_with(&graph, &NaturalOrder).unwrap();
/// assert_eq!(order, [1, 2, 3, 4, 5]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct NaturalOrder;

/// Keeps the order in which the graph stores nodes.
///
/// Children are visited in insertion order. The first ready layer of the
/// ascending sort comes out in first-seen order and every later layer in the
/// order its nodes became ready.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, GraphOrder, topological_sort_ascending_with};
///
/// let graph = Graph::from([(4, vec![3, 1]), (5, vec![2])]);
/// let order = topological_sort_ascending_with(&graph, &GraphOrder).unwrap();
/// assert_eq!(order, [3, 1, 2, 4, 5]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct GraphOrder;

impl<N> Tiebreak<N> for NaturalOrder
where
    N: Ord,
{
    fn arrange(&self, graph: &Graph<N>, batch: &mut [NodeId]) {
        // Ids are unique within a batch, so stability does not matter.
        batch.sort_unstable_by(|&a, &b| graph[a].cmp(&graph[b]));
    }
}

impl<N> Tiebreak<N> for GraphOrder {
    #[inline]
    fn arrange(&self, _graph: &Graph<N>, _batch: &mut [NodeId]) {}
}

impl<N, T> Tiebreak<N> for &T
where
    T: Tiebreak<N> + ?Sized,
{
    #[inline]
    fn arrange(&self, graph: &Graph<N>, batch: &mut [NodeId]) {
        (**self).arrange(graph, batch);
    }
}
