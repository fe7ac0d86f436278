// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready snapshots of one treemap level.

use alloc::{format, string::String, vec::Vec};
use covermap_tree::{NodeId, Tree};
use kurbo::{Point, Rect};

use crate::color::{Rgb, map_to_color, round_half_up};
use crate::config::ViewConfig;
use crate::navigation::ClickTarget;

/// One child cell of the focused node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// The child this tile draws.
    pub node: NodeId,
    /// Its rectangle on the surface.
    pub rect: Rect,
    /// Fill derived from the child's coverage.
    pub fill: Rgb,
    /// Caption, see [`label`].
    pub label: String,
    /// Whether clicking the tile can drill into it.
    pub drillable: bool,
}

/// Everything a renderer needs to draw one focus level.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// The node whose children are shown.
    pub focus: NodeId,
    /// Dotted ancestry of the focus, shown in the header.
    pub breadcrumb: String,
    /// The header bar.
    pub header: Rect,
    /// The treemap body.
    pub body: Rect,
    /// Fill derived from the focus's own coverage.
    pub fill: Rgb,
    /// One tile per child of the focus, in child order.
    pub tiles: Vec<Tile>,
}

impl View {
    /// Snapshot `focus` and its children with their current bounds.
    ///
    /// This reads geometry from the tree; lay `focus` out first.
    pub fn capture(tree: &Tree, focus: NodeId, config: &ViewConfig) -> Self {
        let tiles = tree
            .children_of(focus)
            .iter()
            .map(|&node| {
                let coverage = tree.coverage(node);
                Tile {
                    node,
                    rect: tree.bounds(node).unwrap_or(Rect::ZERO),
                    fill: map_to_color(coverage),
                    label: label(tree.name(node).unwrap_or_default(), coverage),
                    drillable: tree.has_children(node),
                }
            })
            .collect();
        Self {
            focus,
            breadcrumb: tree.breadcrumb(focus),
            header: config.header(),
            body: config.body(),
            fill: map_to_color(tree.coverage(focus)),
            tiles,
        }
    }

    /// The tile drawing `node`, if it is a child of the focus.
    pub fn tile(&self, node: NodeId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.node == node)
    }

    /// What a click at `point` lands on.
    pub fn hit_test(&self, point: Point) -> Option<ClickTarget> {
        if self.header.contains(point) {
            return Some(ClickTarget::Breadcrumb);
        }
        self.tiles
            .iter()
            .find(|t| t.rect.contains(point))
            .map(|t| ClickTarget::Node(t.node))
    }
}

/// Caption for a node: its name and rounded coverage.
///
/// ```
/// use covermap_view::view::label;
///
/// assert_eq!(label("parser", Some(66.6)), "parser 67%");
/// assert_eq!(label("util", None), "util n/a");
/// ```
pub fn label(name: &str, coverage: Option<f64>) -> String {
    match coverage {
        Some(c) if c.is_finite() => format!("{name} {}%", round_half_up(c)),
        _ => format!("{name} n/a"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covermap_tree::LeafStats;

    fn stats(lines: u64, mutations: u64, detected: u64) -> LeafStats {
        LeafStats {
            lines,
            coverage: 0.0,
            mutations,
            detected,
        }
    }

    fn sample() -> (Tree, ViewConfig) {
        let mut tree = Tree::new();
        tree.insert_path(&["a", "B"], stats(10, 4, 3)).unwrap();
        tree.insert_path(&["a", "C"], stats(30, 4, 1)).unwrap();
        tree.insert_path(&["D"], stats(20, 0, 0)).unwrap();
        assert!(tree.aggregate_all().1.is_empty());
        let config = ViewConfig::new(200.0, 120.0);
        let root = tree.root();
        config.layout_engine().layout(&mut tree, root, config.body());
        (tree, config)
    }

    #[test]
    fn labels_round_coverage() {
        assert_eq!(label("x", Some(0.0)), "x 0%");
        assert_eq!(label("x", Some(49.5)), "x 50%");
        assert_eq!(label("x", Some(100.0)), "x 100%");
        assert_eq!(label("x", Some(f64::NAN)), "x n/a");
    }

    #[test]
    fn capture_root_level() {
        let (tree, config) = sample();
        let view = View::capture(&tree, tree.root(), &config);

        assert_eq!(view.breadcrumb, "");
        assert_eq!(view.body, config.body());
        assert_eq!(view.tiles.len(), 2);

        let a = tree.find_child(tree.root(), "a").unwrap();
        let tile = view.tile(a).unwrap();
        assert_eq!(tile.label, "a 50%");
        assert_eq!(tile.fill, Rgb::new(255, 255, 0));
        assert!(tile.drillable);
        assert_eq!(Some(tile.rect), tree.bounds(a));

        let d = tree.find_child(tree.root(), "D").unwrap();
        let tile = view.tile(d).unwrap();
        assert_eq!(tile.label, "D n/a");
        assert_eq!(tile.fill, Rgb::UNKNOWN);
        assert!(!tile.drillable);
    }

    #[test]
    fn hit_test_finds_header_and_tiles() {
        let (tree, config) = sample();
        let view = View::capture(&tree, tree.root(), &config);

        assert_eq!(
            view.hit_test(Point::new(5.0, 5.0)),
            Some(ClickTarget::Breadcrumb)
        );
        for tile in &view.tiles {
            assert_eq!(
                view.hit_test(tile.rect.center()),
                Some(ClickTarget::Node(tile.node))
            );
        }
        assert_eq!(view.hit_test(Point::new(-1.0, 50.0)), None);
    }
}
