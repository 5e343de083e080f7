// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense node identifiers.
//!
//! Every node a [`Graph`](crate::Graph) sees, as a key or as a child, is
//! interned once into a [`NodeId`]. The algorithms in this crate run over
//! those ids so their bookkeeping is plain `Vec` indexing rather than hashing.

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// A compact identifier for a node of one particular [`Graph`](crate::Graph).
///
/// Ids are assigned in first-seen order, starting at zero. They are only
/// meaningful for the graph that produced them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("too many nodes for NodeId (u32)"))
    }

    /// Returns this id as a `usize` index.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Maps owned nodes to [`NodeId`]s without storing each node twice.
///
/// Lookups go through a hash-bucket index (hash -> candidate ids).
#[derive(Debug, Clone)]
pub(crate) struct Interner<N> {
    nodes: Vec<N>,
    buckets: HashMap<u64, SmallVec<[NodeId; 1]>>,
    build_hasher: DefaultHashBuilder,
}

impl<N> Interner<N> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            buckets: HashMap::new(),
            build_hasher: DefaultHashBuilder::default(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            buckets: HashMap::with_capacity(capacity),
            build_hasher: DefaultHashBuilder::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.index())
    }

    pub(crate) fn as_slice(&self) -> &[N] {
        &self.nodes
    }
}

impl<N> Interner<N>
where
    N: Eq + Hash,
{
    /// Returns the id of `node`, assigning the next free id if it is new.
    pub(crate) fn intern(&mut self, node: N) -> NodeId {
        let hash = self.build_hasher.hash_one(&node);
        if let Some(id) = self.find(hash, &node) {
            return id;
        }

        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        self.buckets.entry(hash).or_default().push(id);
        id
    }

    /// Returns the id of `node` if it was interned before.
    pub(crate) fn lookup(&self, node: &N) -> Option<NodeId> {
        self.find(self.build_hasher.hash_one(node), node)
    }

    fn find(&self, hash: u64, node: &N) -> Option<NodeId> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| self.nodes[id.index()] == *node)
    }
}
