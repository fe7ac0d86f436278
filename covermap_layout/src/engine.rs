// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use covermap_tree::{NodeId, Tree};
use kurbo::Rect;
use tracing::trace;

use crate::squarify::squarify;

/// The golden ratio, the default aspect bias of [`LayoutEngine`].
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Squarified treemap layout.
///
/// The engine is a small, copyable configuration. It lays out one level at a
/// time: [`LayoutEngine::layout`] sizes the immediate children of a node and
/// leaves deeper descendants untouched until they are laid out in turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEngine {
    aspect_ratio: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Create an engine aiming for golden-ratio rectangles.
    pub const fn new() -> Self {
        Self {
            aspect_ratio: GOLDEN_RATIO,
        }
    }

    /// Set the width:height ratio rows should aim for.
    ///
    /// Values that are not finite and positive are ignored.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
        self
    }

    /// The width:height ratio rows aim for.
    pub const fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Partition `bounds` among items proportionally to `weights`.
    ///
    /// Rectangles are returned in the order of `weights`. For positive
    /// weights they tile `bounds` exactly, up to floating-point rounding.
    /// Weights that are negative or not finite count as zero; if nothing has
    /// weight, or `bounds` is empty, every item gets an empty rectangle at the
    /// origin of `bounds`.
    pub fn partition(&self, weights: &[f64], bounds: Rect) -> Vec<Rect> {
        squarify(weights, bounds, self.aspect_ratio)
    }

    /// Assign `bounds` to `node` and lay its immediate children out inside it.
    ///
    /// Children are weighted by their aggregated `value` (see
    /// [`Tree::aggregate`]), so aggregate before laying out. The new child
    /// rectangles are written back with [`Tree::set_bounds`] and also returned.
    pub fn layout(&self, tree: &mut Tree, node: NodeId, bounds: Rect) -> Vec<(NodeId, Rect)> {
        if !tree.contains(node) {
            return Vec::new();
        }
        tree.set_bounds(node, bounds);

        let children: Vec<NodeId> = tree.children_of(node).to_vec();
        let weights: Vec<f64> = children
            .iter()
            .map(|&c| tree.value(c).unwrap_or(0) as f64)
            .collect();
        let rects = self.partition(&weights, bounds);

        for (&child, &rect) in children.iter().zip(&rects) {
            tree.set_bounds(child, rect);
        }
        trace!(?node, ?bounds, children = children.len(), "laid out level");
        children.into_iter().zip(rects).collect()
    }
}
