// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covermap View: colors, snapshots and navigation for a zoomable coverage treemap.
//!
//! This crate sits between an aggregated [`covermap_tree::Tree`] and whatever
//! draws it. It shows one level of the tree at a time, the children of the
//! *focus*, and moves the focus in response to clicks:
//!
//! - [`color`]: coverage percentage to fill color, red through yellow to green,
//!   with a neutral gray for unknown coverage.
//! - [`View`] / [`Tile`]: everything needed to draw one level, from tile
//!   rectangles and fills to labels and the breadcrumb, plus hit testing.
//! - [`NavigationController`]: a small state machine that drills into children
//!   and back out, laying out each newly visible level with
//!   [`covermap_layout::LayoutEngine`] and exposing both the outgoing and
//!   incoming levels while the renderer animates between them.
//! - [`ViewConfig`]: surface size and presentation constants, loadable with `serde`.
//!
//! Rendering, animation timing and input handling stay with the host: the
//! controller is told about clicks ([`ClickTarget`]) and about finished
//! animations ([`NavigationController::finish_transition`]).
//!
//! ## Example
//!
//! ```rust
//! use covermap_tree::{CoverageRecord, Tree};
//! use covermap_view::{ClickTarget, NavigationController, ViewConfig};
//!
//! let records: Vec<CoverageRecord> = serde_json::from_str(r#"[
//!     {"dottedPath": "app.core.Parser", "lines": 120, "coverage": 80, "mutations": 10, "detected": 8},
//!     {"dottedPath": "app.core.Lexer", "lines": 60, "coverage": 90, "mutations": 10, "detected": 9},
//!     {"dottedPath": "app.Main", "lines": 20, "coverage": 0, "mutations": 0, "detected": 0}
//! ]"#).unwrap();
//! let (mut tree, _) = Tree::from_records(&records);
//!
//! let mut nav = NavigationController::new(&mut tree, ViewConfig::new(800.0, 600.0));
//! let app = tree.find_child(tree.root(), "app").unwrap();
//! let core = tree.find_child(app, "core").unwrap();
//!
//! // Clicking a cell inside `app` drills into `app`.
//! let transition = nav.on_click(&mut tree, ClickTarget::Node(core)).unwrap();
//! assert_eq!(transition.to, app);
//! nav.finish_transition();
//!
//! let view = nav.current_view(&tree);
//! assert_eq!(view.breadcrumb, "app");
//! let labels: Vec<&str> = view.tiles.iter().map(|t| t.label.as_str()).collect();
//! assert_eq!(labels, ["core 85%", "Main n/a"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod color;
mod config;
pub mod navigation;
pub mod view;

pub use color::{ColorError, Rgb, map_to_color, try_map_to_color};
pub use config::ViewConfig;
pub use navigation::{ClickTarget, Direction, NavState, NavigationController, Transition};
pub use view::{Tile, View};
