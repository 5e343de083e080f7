// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Graph: topological ordering and path enumeration over
//! adjacency-mapped graphs.
//!
//! A [`Graph`] maps each node to the set of nodes it depends on (its
//! children). On top of it this crate provides:
//!
//! - **Ascending sort** ([`topological_sort_ascending`]): leaves first. Fails
//!   with [`CycleDetected`] when the graph has a cycle, carrying the part of
//!   the graph that could not be ordered.
//! - **Descending sort** ([`DescendingSort`], [`topological_sort_descending`]):
//!   a depth-first walk from the top of the graph. Never fails; cycles are
//!   walked once and left behind.
//! - **Path enumeration** ([`get_paths`], [`PathFinder`]): every path from the
//!   top of the graph down to a leaf, split into acyclic paths and paths that
//!   close a cycle.
//! - **Sort strategies** ([`TopologicalSort`]): direction as a value, for code
//!   that should not care which way it orders.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_graph::{Graph, get_paths, topological_sort_ascending, topological_sort_descending};
//!
//! // 1 depends on 2 and 3, which depend on each other.
//! let graph = Graph::from([(1, vec![2, 3]), (2, vec![3]), (3, vec![2])]);
//!
//! // Ascending order is impossible...
//! let err = topological_sort_ascending(&graph).unwrap_err();
//!
//! // ...and the error says where the trouble is.
//! let (_, cycles) = get_paths(&err.graph, false);
//! assert_eq!(cycles, [vec![2, 3, 2]]);
//!
//! // Descending order still visits everything once.
//! assert_eq!(topological_sort_descending(&graph), [3, 2, 1]);
//! ```
//!
//! ## Determinism
//!
//! Every operation is a pure function of the graph, including the order in
//! which its keys and children were inserted. Where several orders are valid
//! a [`Tiebreak`] picks one: [`NaturalOrder`] (the default, requires
//! `N: Ord`) or [`GraphOrder`] for nodes that are only `Eq + Hash`. The
//! `_with` functions and the `with_tiebreak`/`tiebreak` builders take either.
//!
//! ## Logging
//!
//! Runs are summarised through [`tracing`] at `trace` level; a detected cycle
//! is reported at `debug` level. Nothing is emitted unless a subscriber is
//! installed.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ## Features
//!
//! - `std` (default): forwards to `tracing/std`.

#![no_std]

extern crate alloc;

mod ascending;
mod descending;
mod error;
mod graph;
mod intern;
mod order;
mod paths;
mod sort;

pub use ascending::{topological_sort_ascending, topological_sort_ascending_with};
pub use descending::{
    DescendingSort, topological_sort_descending, topological_sort_descending_from,
    topological_sort_descending_with,
};
pub use error::CycleDetected;
pub use graph::{Children, Graph};
pub use intern::NodeId;
pub use order::{GraphOrder, NaturalOrder, Tiebreak};
pub use paths::{Path, PathFinder, get_paths};
pub use sort::{AscendingTopologicalSort, DescendingTopologicalSort, TopologicalSort};
