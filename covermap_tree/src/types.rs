// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the coverage tree: node identifiers, leaf statistics, and mutation counts.

use core::ops::Add;

/// Identifier for a node in the tree.
///
/// Nodes are never removed once inserted, so an id stays valid for the
/// lifetime of the [`Tree`](crate::Tree) that issued it. Ids from a different
/// tree are treated as unknown by every query.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Per-class statistics as reported by the upstream mutation-testing run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeafStats {
    /// Size metric used for rectangle area (line count).
    pub lines: u64,
    /// Coverage percentage reported upstream. Carried for reference only;
    /// the rendered coverage is derived from `detected / mutations`.
    pub coverage: f64,
    /// Total number of mutations generated for the class.
    pub mutations: u64,
    /// Number of mutations detected (killed) by the test suite.
    pub detected: u64,
}

impl LeafStats {
    /// Mutation counts of this leaf.
    pub const fn counts(&self) -> Mutations {
        Mutations {
            total: self.mutations,
            detected: self.detected,
        }
    }
}

/// Total and detected mutation counts of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mutations {
    /// Number of mutations.
    pub total: u64,
    /// Number of detected mutations; never exceeds `total` in a consistent tree.
    pub detected: u64,
}

impl Mutations {
    /// Whether `detected <= total`.
    pub const fn is_consistent(&self) -> bool {
        self.detected <= self.total
    }

    /// Detected mutations as a percentage of the total.
    ///
    /// Returns `None` when there are no mutations at all: that is "unknown"
    /// coverage, which is distinct from 0%.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.detected as f64 / (self.total as f64 / 100.0))
    }
}

impl Add for Mutations {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total.saturating_add(rhs.total),
            detected: self.detected.saturating_add(rhs.detected),
        }
    }
}

/// What a node is: a class with its own statistics, or a package grouping children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// A class (terminal path segment).
    Leaf(LeafStats),
    /// A package (or the root).
    Inner,
}

impl NodeKind {
    /// Whether this is a [`NodeKind::Leaf`].
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}
