// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render one treemap level as an SVG document on stdout.
//!
//! The core crates produce geometry, fills and labels; drawing is up to the
//! host. This example is about the smallest possible host: it writes the
//! header bar and one `<rect>` per tile, drilling down the dotted path given
//! on the command line first.
//!
//! Run:
//! - `cargo run -p covermap_demos --example svg_snapshot > root.svg`
//! - `cargo run -p covermap_demos --example svg_snapshot -- org.example.parser > parser.svg`

use std::error::Error;
use std::fmt::Write as _;

use covermap_tree::{CoverageRecord, Tree};
use covermap_view::{NavigationController, View, ViewConfig};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = include_str!("../data/report.json");

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let records: Vec<CoverageRecord> = serde_json::from_str(SAMPLE)?;
    let (mut tree, _rejected) = Tree::from_records(&records);
    let config = ViewConfig::new(960.0, 500.0);
    let mut nav = NavigationController::new(&mut tree, config);

    if let Some(path) = std::env::args().nth(1) {
        for name in path.split('.') {
            let Some(child) = tree.find_child(nav.focus(), name) else {
                return Err(format!("no package `{name}` under `{}`", tree.breadcrumb(nav.focus())).into());
            };
            if nav.drill_into(&mut tree, child).is_none() {
                return Err(format!("`{name}` has nothing to drill into").into());
            }
            nav.finish_transition();
        }
    }

    print!("{}", to_svg(&nav.current_view(&tree), &config)?);
    Ok(())
}

fn to_svg(view: &View, config: &ViewConfig) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif" font-size="11">"#,
        config.width, config.height
    )?;
    let h = view.header;
    writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        h.x0,
        h.y0,
        h.width(),
        h.height(),
        view.fill.to_css()
    )?;
    writeln!(
        out,
        r#"  <text x="6" y="{}">{}</text>"#,
        h.y1 - 6.0,
        escape(&view.breadcrumb)
    )?;
    for tile in &view.tiles {
        let r = tile.rect;
        writeln!(
            out,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="white"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            tile.fill.to_css()
        )?;
        writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}">{}</text>"#,
            r.x0 + 6.0,
            r.y0 + 14.0,
            escape(&tile.label)
        )?;
    }
    writeln!(out, "</svg>")?;
    Ok(out)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
