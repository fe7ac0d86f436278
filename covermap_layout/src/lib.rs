// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covermap Layout: squarified treemap layout over a [`covermap_tree::Tree`].
//!
//! Each level of the tree is laid out as a set of rectangles filling the
//! parent's rectangle, with areas proportional to the children's size metric.
//! Rows are grown greedily from the largest child while that keeps the worst
//! aspect ratio of the row from getting worse, which keeps rectangles close
//! to a target aspect ratio (the golden ratio by default).
//!
//! - [`LayoutEngine::partition`]: the raw algorithm over a list of weights.
//! - [`LayoutEngine::layout`]: one level of a tree; writes each child's
//!   rectangle back into the tree.
//!
//! Layout is deliberately one level deep. A zoomable view only shows the
//! children of the focused node, so grandchildren are laid out when their
//! parent becomes the focus.
//!
//! ## Example
//!
//! ```rust
//! use covermap_layout::LayoutEngine;
//! use kurbo::Rect;
//!
//! let bounds = Rect::new(0.0, 0.0, 400.0, 200.0);
//! let rects = LayoutEngine::new().partition(&[6.0, 2.0, 2.0], bounds);
//!
//! let total: f64 = rects.iter().map(Rect::area).sum();
//! assert!((total - bounds.area()).abs() < 1e-6);
//! assert!((rects[0].area() - 48_000.0).abs() < 1e-6);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod squarify;

pub use engine::{GOLDEN_RATIO, LayoutEngine};
