// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covermap Tree: the package/class hierarchy behind a mutation-coverage treemap.
//!
//! A mutation-testing report arrives as a flat list of per-class results, each
//! keyed by a dotted path such as `com.example.Parser`. This crate turns that
//! list into a tree and rolls the numbers up:
//!
//! - Ingests records in any order. Packages shared by several classes are
//!   created once and reused, so the input does not need to be sorted or grouped.
//! - Aggregates line counts and mutation counts bottom-up in a single pass and
//!   derives a coverage percentage for every package.
//! - Keeps "no mutations" as unknown coverage (`None`) rather than 0%.
//! - Stores per-node layout geometry so a treemap layout can annotate the tree
//!   in place.
//!
//! It does not compute coverage itself and does not lay anything out; see
//! `covermap_layout` for the squarified layout and `covermap_view` for colors
//! and navigation.
//!
//! ## API overview
//!
//! - [`Tree`]: arena of nodes addressed by [`NodeId`].
//! - [`CoverageRecord`]: one row of the report, deserializable with `serde`.
//! - [`LeafStats`] / [`Mutations`] / [`NodeKind`]: per-node data.
//! - [`TreeError`]: record-level failures ([`TreeError::MalformedPath`],
//!   [`TreeError::InconsistentLeaf`]).
//!
//! Key operations:
//! - [`Tree::insert_path`] / [`Tree::insert_record`] → [`NodeId`]
//! - [`Tree::aggregate`] / [`Tree::aggregate_all`] → [`Mutations`] plus any inconsistent leaves
//! - [`Tree::from_records`]: both of the above over a whole dataset, skipping bad records.
//! - [`Tree::breadcrumb`], [`Tree::parent_of`], [`Tree::children_of`], [`Tree::child_toward`].
//!
//! ## Example
//!
//! ```rust
//! use covermap_tree::{CoverageRecord, Tree};
//!
//! let records: Vec<CoverageRecord> = serde_json::from_str(r#"[
//!     {"dottedPath": "a.B", "lines": 10, "coverage": 50, "mutations": 4, "detected": 2},
//!     {"dottedPath": "a.C", "lines": 30, "coverage": 100, "mutations": 2, "detected": 2},
//!     {"dottedPath": "d.E", "lines": 5, "coverage": 0, "mutations": 0, "detected": 0}
//! ]"#).unwrap();
//!
//! let (tree, rejected) = Tree::from_records(&records);
//! assert!(rejected.is_empty());
//!
//! let a = tree.find_child(tree.root(), "a").unwrap();
//! assert_eq!(tree.value(a), Some(40));
//! assert!((tree.coverage(a).unwrap() - 66.666).abs() < 0.01);
//!
//! // No mutations at all: coverage is unknown, not zero.
//! let d = tree.find_child(tree.root(), "d").unwrap();
//! assert_eq!(tree.coverage(d), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod record;
mod tree;
mod types;

pub use error::TreeError;
pub use record::CoverageRecord;
pub use tree::Tree;
pub use types::{LeafStats, Mutations, NodeId, NodeKind};
