// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort direction as a caller-selected strategy.

use alloc::vec::Vec;
use core::hash::Hash;

use crate::ascending::topological_sort_ascending_with;
use crate::descending::topological_sort_descending_with;
use crate::error::CycleDetected;
use crate::graph::Graph;
use crate::order::{NaturalOrder, Tiebreak};

/// A topological sort over [`Graph`]s.
///
/// Lets code that orders graphs stay generic over the direction, which is
/// then chosen by whoever passes the strategy in. Any function or closure
/// with the matching signature is a strategy too.
///
/// # Example
///
/// ```
/// use understory_graph::{
///     AscendingTopologicalSort, CycleDetected, DescendingTopologicalSort, Graph,
///     TopologicalSort,
/// };
///
/// fn first<S: TopologicalSort<u32>>(sort: &S, graph: &Graph<u32>) -> Option<u32> {
///     sort.sort(graph).ok()?.first().copied()
/// }
///
/// let graph = Graph::from([(1, vec![2]), (2, vec![3])]);
/// assert_eq!(first(&AscendingTopologicalSort::new(), &graph), Some(3));
/// assert_eq!(first(&DescendingTopologicalSort::new(), &graph), Some(3));
///
/// let keys_only = |g: &Graph<u32>| -> Result<Vec<u32>, CycleDetected<u32>> {
///     Ok(g.keys().copied().collect())
/// };
/// assert_eq!(first(&keys_only, &graph), Some(1));
/// ```
pub trait TopologicalSort<N> {
    /// Orders the nodes of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleDetected`] if this strategy cannot order a graph with
    /// cycles.
    fn sort(&self, graph: &Graph<N>) -> Result<Vec<N>, CycleDetected<N>>;
}

/// Leaves-first strategy; see [`topological_sort_ascending`](crate::topological_sort_ascending).
#[derive(Copy, Clone, Debug, Default)]
pub struct AscendingTopologicalSort<T = NaturalOrder> {
    tiebreak: T,
}

impl AscendingTopologicalSort {
    /// Creates the strategy with natural-order tie-breaking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> AscendingTopologicalSort<T> {
    /// Creates the strategy with the given tie-breaking.
    #[must_use]
    pub fn with_tiebreak(tiebreak: T) -> Self {
        Self { tiebreak }
    }
}

impl<N, T> TopologicalSort<N> for AscendingTopologicalSort<T>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
    fn sort(&self, graph: &Graph<N>) -> Result<Vec<N>, CycleDetected<N>> {
        topological_sort_ascending_with(graph, &self.tiebreak)
    }
}

/// Top-down strategy; see [`DescendingSort`](crate::DescendingSort).
///
/// Never returns an error.
#[derive(Copy, Clone, Debug, Default)]
pub struct DescendingTopologicalSort<T = NaturalOrder> {
    tiebreak: T,
}

impl DescendingTopologicalSort {
    /// Creates the strategy with natural-order tie-breaking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> DescendingTopologicalSort<T> {
    /// Creates the strategy with the given tie-breaking.
    #[must_use]
    pub fn with_tiebreak(tiebreak: T) -> Self {
        Self { tiebreak }
    }
}

impl<N, T> TopologicalSort<N> for DescendingTopologicalSort<T>
where
    N: Clone + Eq + Hash,
    T: Tiebreak<N>,
{
    fn sort(&self, graph: &Graph<N>) -> Result<Vec<N>, CycleDetected<N>> {
        Ok(topological_sort_descending_with(graph, &self.tiebreak))
    }
}

impl<N, F> TopologicalSort<N> for F
where
    F: Fn(&Graph<N>) -> Result<Vec<N>, CycleDetected<N>>,
{
    fn sort(&self, graph: &Graph<N>) -> Result<Vec<N>, CycleDetected<N>> {
        self(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::GraphOrder;
    use crate::topological_sort_ascending;
    use alloc::boxed::Box;
    use alloc::vec;

    fn scenario() -> Graph<u32> {
        Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])])
    }

    #[test]
    fn strategies_pick_direction() {
        let graph = Graph::from([(4, vec![3, 1]), (5, vec![2])]);
        assert_eq!(
            AscendingTopologicalSort::new().sort(&graph).unwrap(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            DescendingTopologicalSort::new().sort(&graph).unwrap(),
            vec![1, 3, 4, 2, 5]
        );
    }

    #[test]
    fn only_ascending_fails_on_cycles() {
        let graph = scenario();
        let err = AscendingTopologicalSort::new().sort(&graph).unwrap_err();
        assert_eq!(err.graph, graph);
        assert_eq!(
            DescendingTopologicalSort::new().sort(&graph).unwrap(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn tiebreak_is_carried() {
        let graph = Graph::from([(4, vec![3, 1]), (5, vec![2])]);
        let sort = AscendingTopologicalSort::with_tiebreak(GraphOrder);
        assert_eq!(sort.sort(&graph).unwrap(), vec![3, 1, 2, 4, 5]);
        let sort = DescendingTopologicalSort::with_tiebreak(GraphOrder);
        assert_eq!(sort.sort(&graph).unwrap(), vec![3, 1, 4, 2, 5]);
    }

    #[test]
    fn functions_are_strategies() {
        let graph = Graph::from([(2, vec![1])]);
        let sort = topological_sort_ascending::<u32>;
        assert_eq!(sort.sort(&graph).unwrap(), vec![1, 2]);
    }

    #[test]
    fn strategies_as_trait_objects() {
        let graph = scenario();
        let strategies: [Box<dyn TopologicalSort<u32>>; 2] = [
            Box::new(AscendingTopologicalSort::new()),
            Box::new(DescendingTopologicalSort::new()),
        ];
        let results: Vec<bool> = strategies.iter().map(|s| s.sort(&graph).is_ok()).collect();
        assert_eq!(results, vec![false, true]);
    }
}
