// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load a mutation-testing report and walk the treemap from the console.
//!
//! This example shows the whole pipeline:
//! - `covermap_tree` to ingest the records and roll the numbers up,
//! - `covermap_view` to lay out, color and label each level,
//! - a scripted sequence of clicks driving the `NavigationController`, with
//!   the renderer's "animation finished" signal sent right away.
//!
//! Run:
//! - `cargo run -p covermap_demos --example treemap_walk`
//! - `RUST_LOG=covermap=trace cargo run -p covermap_demos --example treemap_walk -- path/to/report.json`

use std::error::Error;

use covermap_tree::{CoverageRecord, NodeId, Tree};
use covermap_view::{ClickTarget, NavigationController, Transition, View, ViewConfig};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = include_str!("../data/report.json");

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_owned(),
    };
    let records: Vec<CoverageRecord> = serde_json::from_str(&json)?;
    let (mut tree, rejected) = Tree::from_records(&records);
    for error in &rejected {
        tracing::warn!(%error, "record rejected");
    }
    tracing::info!(
        records = records.len(),
        rejected = rejected.len(),
        nodes = tree.node_count(),
        "report loaded"
    );

    let mut nav = NavigationController::new(&mut tree, ViewConfig::new(120.0, 40.0));
    print_view(&nav.current_view(&tree));

    // Click the biggest cell until we reach a level with nothing to drill into.
    loop {
        let view = nav.current_view(&tree);
        let Some(target) = biggest_drillable(&view) else {
            break;
        };
        // Clicks land on the deepest cell under the pointer; aim for a grandchild.
        let deep = tree.children_of(target).first().copied().unwrap_or(target);
        let Some(transition) = nav.on_click(&mut tree, ClickTarget::Node(deep)) else {
            break;
        };
        print_transition(transition);
        nav.finish_transition();
        print_view(&nav.current_view(&tree));
    }

    // And back out through the header until the root.
    while let Some(transition) = nav.on_click(&mut tree, ClickTarget::Breadcrumb) {
        print_transition(transition);
        nav.finish_transition();
    }
    print_view(&nav.current_view(&tree));
    Ok(())
}

fn biggest_drillable(view: &View) -> Option<NodeId> {
    view.tiles
        .iter()
        .filter(|t| t.drillable)
        .max_by(|a, b| a.rect.area().total_cmp(&b.rect.area()))
        .map(|t| t.node)
}

fn print_transition(t: &Transition) {
    println!(
        "-- zoom {:?}: {:?} -> {:?} over {} ms, window {:?}",
        t.direction, t.outgoing.breadcrumb, t.incoming.breadcrumb, t.duration_ms, t.zoom
    );
}

fn print_view(view: &View) {
    let crumb = if view.breadcrumb.is_empty() {
        "(root)"
    } else {
        view.breadcrumb.as_str()
    };
    println!("[{crumb}] {}", view.fill.to_css());
    for tile in &view.tiles {
        let r = tile.rect;
        println!(
            "  {:<24} {:<18} {:>6.1},{:>5.1} {:>6.1}x{:<5.1}{}",
            tile.label,
            tile.fill.to_css(),
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            if tile.drillable { " +" } else { "" }
        );
    }
}
