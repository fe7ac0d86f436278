// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drill-in/drill-out navigation between treemap levels.
//!
//! The controller owns the focus: the node whose children are on screen. A
//! drill request lays the newly visible level out, captures a [`View`] of the
//! level being left and one of the level being entered, and hands both to the
//! renderer as a [`Transition`]. The focus only moves once the renderer
//! reports the animation finished with
//! [`NavigationController::finish_transition`].
//!
//! ## Transition rules
//!
//! 1. **Drill in**: only from idle, only into a child of the focus that itself
//!    has children.
//! 2. **Drill out**: only from idle, only when the focus has a parent.
//! 3. **One at a time**: requests arriving while a transition is in flight are
//!    dropped, not queued.
//! 4. **No cancellation**: a transition ends only through
//!    [`NavigationController::finish_transition`].
//!
//! ```
//! use covermap_tree::{LeafStats, Tree};
//! use covermap_view::{NavigationController, ViewConfig};
//!
//! let stats = LeafStats { lines: 10, coverage: 0.0, mutations: 2, detected: 1 };
//! let mut tree = Tree::new();
//! tree.insert_path(&["a", "B"], stats).unwrap();
//! assert!(tree.aggregate_all().1.is_empty());
//!
//! let mut nav = NavigationController::new(&mut tree, ViewConfig::new(400.0, 300.0));
//! let a = tree.find_child(tree.root(), "a").unwrap();
//!
//! assert!(nav.drill_into(&mut tree, a).is_some());
//! // A second request while the first is animating is dropped.
//! assert!(nav.drill_into(&mut tree, a).is_none());
//! assert_eq!(nav.focus(), tree.root());
//!
//! assert_eq!(nav.finish_transition(), Some(a));
//! assert_eq!(nav.current_view(&tree).breadcrumb, "a");
//! ```

use covermap_layout::LayoutEngine;
use covermap_tree::{NodeId, Tree};
use kurbo::{Point, Rect};
use tracing::{debug, trace};

use crate::config::ViewConfig;
use crate::view::View;

/// Something a user can click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// The header bar; navigates out.
    Breadcrumb,
    /// A cell belonging to this node or one of its descendants.
    Node(NodeId),
}

/// Which way a transition zooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From a node into one of its children.
    In,
    /// From a node out to its parent.
    Out,
}

/// A zoom between two levels, in flight until the renderer finishes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Focus before the transition.
    pub from: NodeId,
    /// Focus after the transition.
    pub to: NodeId,
    /// Zoom direction.
    pub direction: Direction,
    /// The level being left.
    pub outgoing: View,
    /// The level being entered.
    pub incoming: View,
    /// Where the finer level sits inside the coarser one.
    ///
    /// Drilling in, this is the child's tile in `outgoing`; drilling out, it
    /// is the old focus's tile in `incoming`. Interpolating between `zoom`
    /// and the body rect animates the zoom.
    pub zoom: Rect,
    /// Suggested animation duration in milliseconds.
    pub duration_ms: u64,
}

/// Navigation state.
#[derive(Clone, Debug, PartialEq)]
pub enum NavState {
    /// Accepting drill requests.
    Idle,
    /// Waiting for the renderer to finish a transition.
    Transitioning(Transition),
}

/// Owns the focus and serializes every change to it.
#[derive(Clone, Debug)]
pub struct NavigationController {
    focus: NodeId,
    state: NavState,
    config: ViewConfig,
    engine: LayoutEngine,
}

impl NavigationController {
    /// Focus the root of `tree` and lay it out over the body rect.
    ///
    /// The tree should already be aggregated.
    pub fn new(tree: &mut Tree, config: ViewConfig) -> Self {
        let engine = config.layout_engine();
        let root = tree.root();
        engine.layout(tree, root, config.body());
        Self {
            focus: root,
            state: NavState::Idle,
            config,
            engine,
        }
    }

    /// The node whose children are on screen.
    pub const fn focus(&self) -> NodeId {
        self.focus
    }

    /// Current state.
    pub const fn state(&self) -> &NavState {
        &self.state
    }

    /// Whether a transition is in flight.
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.state, NavState::Transitioning(_))
    }

    /// The transition in flight, if any.
    pub const fn transition(&self) -> Option<&Transition> {
        match &self.state {
            NavState::Transitioning(t) => Some(t),
            NavState::Idle => None,
        }
    }

    /// The surface configuration.
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Snapshot of the focused level.
    ///
    /// While a transition is in flight the focus has not moved yet, so this is
    /// the transition's outgoing view. The tree itself already holds the
    /// incoming level's geometry by then and is not read.
    pub fn current_view(&self, tree: &Tree) -> View {
        match &self.state {
            NavState::Transitioning(t) => t.outgoing.clone(),
            NavState::Idle => View::capture(tree, self.focus, &self.config),
        }
    }

    /// Start zooming into `child`, a child of the focus with children.
    ///
    /// Returns `None`, changing nothing, if a transition is already in
    /// flight or `child` is not a drillable child of the focus.
    pub fn drill_into(&mut self, tree: &mut Tree, child: NodeId) -> Option<&Transition> {
        if self.is_transitioning() {
            trace!(?child, "transition in flight, dropping drill-in");
            return None;
        }
        if tree.parent_of(child) != Some(self.focus) || !tree.has_children(child) {
            trace!(?child, focus = ?self.focus, "not a drillable child of the focus");
            return None;
        }

        let outgoing = self.current_view(tree);
        let zoom = tree.bounds(child).unwrap_or(Rect::ZERO);
        self.engine.layout(tree, child, self.config.body());
        let incoming = View::capture(tree, child, &self.config);

        self.begin(Transition {
            from: self.focus,
            to: child,
            direction: Direction::In,
            outgoing,
            incoming,
            zoom,
            duration_ms: self.config.transition_ms,
        })
    }

    /// Start zooming out to the parent of the focus.
    ///
    /// Returns `None`, changing nothing, if a transition is already in
    /// flight or the focus is the root.
    pub fn drill_out(&mut self, tree: &mut Tree) -> Option<&Transition> {
        if self.is_transitioning() {
            trace!("transition in flight, dropping drill-out");
            return None;
        }
        let Some(parent) = tree.parent_of(self.focus) else {
            trace!("already at the root");
            return None;
        };

        let outgoing = self.current_view(tree);
        self.engine.layout(tree, parent, self.config.body());
        let incoming = View::capture(tree, parent, &self.config);
        let zoom = tree.bounds(self.focus).unwrap_or(Rect::ZERO);

        self.begin(Transition {
            from: self.focus,
            to: parent,
            direction: Direction::Out,
            outgoing,
            incoming,
            zoom,
            duration_ms: self.config.transition_ms,
        })
    }

    /// Route a click.
    ///
    /// The breadcrumb drills out. A node drills into the child of the focus
    /// that is, or contains, that node.
    pub fn on_click(&mut self, tree: &mut Tree, target: ClickTarget) -> Option<&Transition> {
        match target {
            ClickTarget::Breadcrumb => self.drill_out(tree),
            ClickTarget::Node(node) => {
                let Some(child) = tree.child_toward(self.focus, node) else {
                    trace!(?node, "click outside the focused level");
                    return None;
                };
                self.drill_into(tree, child)
            }
        }
    }

    /// Route a click at a surface point on the focused level.
    pub fn click_at(&mut self, tree: &mut Tree, point: Point) -> Option<&Transition> {
        if self.is_transitioning() {
            trace!(?point, "transition in flight, dropping click");
            return None;
        }
        let target = self.current_view(tree).hit_test(point)?;
        self.on_click(tree, target)
    }

    /// The renderer finished animating: commit the new focus.
    ///
    /// Returns the new focus, or `None` if nothing was in flight.
    pub fn finish_transition(&mut self) -> Option<NodeId> {
        match core::mem::replace(&mut self.state, NavState::Idle) {
            NavState::Transitioning(t) => {
                debug!(from = ?t.from, to = ?t.to, "transition finished");
                self.focus = t.to;
                Some(t.to)
            }
            NavState::Idle => None,
        }
    }

    fn begin(&mut self, transition: Transition) -> Option<&Transition> {
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            direction = ?transition.direction,
            "transition started"
        );
        self.state = NavState::Transitioning(transition);
        self.transition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covermap_tree::LeafStats;

    fn stats(lines: u64) -> LeafStats {
        LeafStats {
            lines,
            coverage: 0.0,
            mutations: 2,
            detected: 1,
        }
    }

    fn sample() -> Tree {
        let mut tree = Tree::new();
        for (path, lines) in [
            ("a.b.C", 10),
            ("a.b.D", 20),
            ("a.E", 30),
            ("f.G", 40),
            ("H", 5),
        ] {
            let segments: alloc::vec::Vec<&str> = path.split('.').collect();
            tree.insert_path(&segments, stats(lines)).unwrap();
        }
        assert!(tree.aggregate_all().1.is_empty());
        tree
    }

    fn child(tree: &Tree, parent: NodeId, name: &str) -> NodeId {
        tree.find_child(parent, name).unwrap()
    }

    fn controller(tree: &mut Tree) -> NavigationController {
        NavigationController::new(tree, ViewConfig::new(400.0, 320.0))
    }

    #[test]
    fn starts_idle_at_the_root() {
        let mut tree = sample();
        let nav = controller(&mut tree);
        assert_eq!(nav.focus(), tree.root());
        assert_eq!(nav.state(), &NavState::Idle);

        let view = nav.current_view(&tree);
        assert_eq!(view.tiles.len(), 3);
        assert_eq!(tree.bounds(tree.root()), Some(nav.config().body()));
    }

    #[test]
    fn drill_in_commits_on_finish() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let a = child(&tree, root, "a");
        let a_tile = tree.bounds(a).unwrap();

        let t = nav.drill_into(&mut tree, a).unwrap();
        assert_eq!((t.from, t.to, t.direction), (root, a, Direction::In));
        assert_eq!(t.outgoing.focus, root);
        assert_eq!(t.incoming.focus, a);
        assert_eq!(t.zoom, a_tile);
        assert_eq!(t.duration_ms, 750);
        assert_eq!(t.incoming.tiles.len(), 2);

        // Focus holds until the renderer is done.
        assert_eq!(nav.focus(), root);
        assert!(nav.is_transitioning());

        assert_eq!(nav.finish_transition(), Some(a));
        assert_eq!(nav.focus(), a);
        assert!(!nav.is_transitioning());
        assert_eq!(tree.bounds(a), Some(nav.config().body()));
        assert_eq!(nav.current_view(&tree).breadcrumb, "a");
    }

    #[test]
    fn second_drill_while_transitioning_is_dropped() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let a = child(&tree, root, "a");
        let f = child(&tree, root, "f");

        assert!(nav.drill_into(&mut tree, a).is_some());
        assert!(nav.drill_into(&mut tree, f).is_none());
        assert!(nav.drill_out(&mut tree).is_none());
        assert_eq!(nav.transition().map(|t| t.to), Some(a));
        assert_eq!(nav.focus(), root);

        assert_eq!(nav.finish_transition(), Some(a));
        assert_eq!(nav.finish_transition(), None);
        assert_eq!(nav.focus(), a);
    }

    #[test]
    fn current_view_holds_still_while_transitioning() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let a = child(&tree, root, "a");
        let before = nav.current_view(&tree);

        assert!(nav.drill_into(&mut tree, a).is_some());
        let during = nav.current_view(&tree);
        assert_eq!(during, before);
        for (i, x) in during.tiles.iter().enumerate() {
            for y in &during.tiles[i + 1..] {
                assert!(x.rect.intersect(y.rect).area() < 1e-9, "{x:?} overlaps {y:?}");
            }
        }

        nav.finish_transition();
        let inside = nav.current_view(&tree);
        assert_eq!(inside.focus, a);

        assert!(nav.drill_out(&mut tree).is_some());
        assert_eq!(nav.current_view(&tree), inside);
        nav.finish_transition();
        assert_eq!(nav.current_view(&tree), before);
    }

    #[test]
    fn leaves_and_strangers_are_not_drillable() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let h = child(&tree, root, "H");
        let a = child(&tree, root, "a");
        let b = child(&tree, a, "b");

        assert!(nav.drill_into(&mut tree, h).is_none());
        // Grandchildren must be reached through their parent.
        assert!(nav.drill_into(&mut tree, b).is_none());
        assert!(nav.drill_into(&mut tree, root).is_none());
        assert_eq!(nav.state(), &NavState::Idle);
    }

    #[test]
    fn drill_out_at_root_is_a_no_op() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        assert!(nav.drill_out(&mut tree).is_none());
        assert_eq!(nav.focus(), tree.root());
        assert_eq!(nav.finish_transition(), None);
    }

    #[test]
    fn drill_out_restores_the_parent_level() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let a = child(&tree, root, "a");
        let before = nav.current_view(&tree);

        nav.drill_into(&mut tree, a);
        nav.finish_transition();

        let t = nav.drill_out(&mut tree).unwrap();
        assert_eq!((t.from, t.to, t.direction), (a, root, Direction::Out));
        assert_eq!(t.outgoing.focus, a);
        assert_eq!(t.incoming, before);
        assert_eq!(Some(t.zoom), before.tile(a).map(|tile| tile.rect));

        assert_eq!(nav.finish_transition(), Some(root));
        assert_eq!(nav.current_view(&tree), before);
    }

    #[test]
    fn clicks_route_to_the_focus_child() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let a = child(&tree, root, "a");
        let b = child(&tree, a, "b");
        let c = child(&tree, b, "C");

        // A click on a deep descendant drills into the child containing it.
        let t = nav.on_click(&mut tree, ClickTarget::Node(c)).unwrap();
        assert_eq!(t.to, a);
        nav.finish_transition();

        let t = nav.on_click(&mut tree, ClickTarget::Node(c)).unwrap();
        assert_eq!(t.to, b);
        nav.finish_transition();
        assert_eq!(nav.current_view(&tree).breadcrumb, "a.b");

        let t = nav.on_click(&mut tree, ClickTarget::Breadcrumb).unwrap();
        assert_eq!(t.to, a);
    }

    #[test]
    fn click_at_hit_tests_the_focused_level() {
        let mut tree = sample();
        let mut nav = controller(&mut tree);
        let root = tree.root();
        let f = child(&tree, root, "f");
        let center = tree.bounds(f).unwrap().center();

        assert_eq!(nav.click_at(&mut tree, center).map(|t| t.to), Some(f));
        assert!(nav.click_at(&mut tree, center).is_none());
        nav.finish_transition();

        let header = nav.config().header().center();
        assert_eq!(nav.click_at(&mut tree, header).map(|t| t.to), Some(root));
    }
}
