// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cycle detection error.

use core::fmt;
use core::hash::Hash;

use crate::graph::Graph;

/// Error returned when an ascending topological sort runs into a cycle.
///
/// The error carries the part of the input that could not be ordered: every
/// key that sits on a cycle or (transitively) depends on one, with its child
/// set restricted to that same part. It has the same shape as the input, so
/// it can be handed straight to [`get_paths`](crate::get_paths) to show the
/// offending cycles.
///
/// # Example
///
/// ```
/// use understory_graph::{Graph, get_paths, topological_sort_ascending};
///
/// let graph = Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])]);
/// let err = topological_sort_ascending(&graph).unwrap_err();
/// assert_eq!(err.code(), 1);
/// assert_eq!(err.graph, graph);
///
/// let (_, cyclic) = get_paths(&err.graph, false);
/// assert_eq!(cyclic, [vec![2, 3, 2]]);
/// ```
pub struct CycleDetected<N> {
    /// The sub-graph that could not be ordered.
    pub graph: Graph<N>,
}

impl<N> CycleDetected<N> {
    /// Numeric code identifying this error kind.
    pub const CODE: u32 = 1;

    /// Creates an error carrying `graph` as the unresolved part.
    #[must_use]
    pub fn new(graph: Graph<N>) -> Self {
        Self { graph }
    }

    /// Returns [`CycleDetected::CODE`].
    #[must_use]
    pub const fn code(&self) -> u32 {
        Self::CODE
    }

    /// Returns the sub-graph that could not be ordered.
    #[must_use]
    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    /// Consumes the error, returning the sub-graph that could not be ordered.
    #[must_use]
    pub fn into_graph(self) -> Graph<N> {
        self.graph
    }
}

impl<N: Clone> Clone for CycleDetected<N> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<N> PartialEq for CycleDetected<N>
where
    N: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph
    }
}

impl<N> Eq for CycleDetected<N> where N: Eq + Hash {}

impl<N: fmt::Debug> fmt::Debug for CycleDetected<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CycleDetected {{ code: {}, graph: {:?} }}",
            Self::CODE,
            self.graph
        )
    }
}

impl<N> fmt::Display for CycleDetected<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to perform topological sort, graph contains a cycle ({} unresolved keys)",
            self.graph.len()
        )
    }
}

impl<N: fmt::Debug> core::error::Error for CycleDetected<N> {}
