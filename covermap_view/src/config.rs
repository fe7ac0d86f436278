// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface configuration.

use covermap_layout::{GOLDEN_RATIO, LayoutEngine};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface and presentation constants.
///
/// The surface is split into a header bar along the top, which shows the
/// breadcrumb and navigates back out, and the treemap body below it.
///
/// Missing fields take their [`Default`] values when deserializing:
///
/// ```
/// use covermap_view::ViewConfig;
///
/// let config: ViewConfig = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
/// assert_eq!(config.header_height, 20.0);
/// assert_eq!(config.transition_ms, 750);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    /// Surface width.
    pub width: f64,
    /// Surface height, header included.
    pub height: f64,
    /// Height of the header bar.
    pub header_height: f64,
    /// Width:height ratio the layout aims for.
    pub aspect_ratio: f64,
    /// Suggested duration of a zoom transition, in milliseconds.
    pub transition_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            header_height: 20.0,
            aspect_ratio: GOLDEN_RATIO,
            transition_ms: 750,
        }
    }
}

impl ViewConfig {
    /// Default presentation on a surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// The header bar, clipped to the surface.
    pub fn header(&self) -> Rect {
        let width = self.width.max(0.0);
        Rect::new(0.0, 0.0, width, self.header_height.clamp(0.0, self.height.max(0.0)))
    }

    /// The treemap body: everything below the header.
    pub fn body(&self) -> Rect {
        let header = self.header();
        Rect::new(0.0, header.y1, header.x1, self.height.max(header.y1))
    }

    /// A layout engine using this configuration's aspect ratio.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new().with_aspect_ratio(self.aspect_ratio)
    }
}
