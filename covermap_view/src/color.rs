// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation coverage to fill color.
//!
//! Coverage runs from red (0%) through yellow (50%) to green (100%). Each
//! channel ramps at double speed and saturates, so the midpoint is a full
//! yellow rather than a muddy brown. Unknown coverage is a neutral gray.
//!
//! ```
//! use covermap_view::color::{Rgb, map_to_color};
//!
//! assert_eq!(map_to_color(Some(0.0)), Rgb::new(255, 0, 0));
//! assert_eq!(map_to_color(Some(50.0)), Rgb::new(255, 255, 0));
//! assert_eq!(map_to_color(Some(100.0)), Rgb::new(0, 255, 0));
//! assert_eq!(map_to_color(None), Rgb::UNKNOWN);
//! ```

use alloc::{format, string::String};
use core::fmt;
use tracing::warn;

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Fill for nodes whose coverage is unknown.
    pub const UNKNOWN: Self = Self::new(225, 225, 225);

    /// Create a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS functional notation, `rgb(r,g,b)`.
    pub fn to_css(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

/// Coverage that cannot be turned into a color.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// The coverage value was NaN or infinite.
    #[error("coverage {0} is not a finite number")]
    InvalidInput(f64),
}

/// Map a coverage percentage to its fill color.
///
/// `None` means unknown coverage and maps to [`Rgb::UNKNOWN`]. Values outside
/// `0..=100` are not rejected; the channels simply saturate.
///
/// # Errors
///
/// Returns [`ColorError::InvalidInput`] when `coverage` is NaN or infinite.
pub fn try_map_to_color(coverage: Option<f64>) -> Result<Rgb, ColorError> {
    let Some(coverage) = coverage else {
        return Ok(Rgb::UNKNOWN);
    };
    if !coverage.is_finite() {
        return Err(ColorError::InvalidInput(coverage));
    }
    let missed = (100.0 - coverage) / 100.0;
    Ok(Rgb {
        red: channel(missed * 255.0 * 2.0),
        green: channel((255.0 - missed * 255.0) * 2.0),
        blue: 0,
    })
}

/// Map a coverage percentage to its fill color, never failing.
///
/// Like [`try_map_to_color`], but invalid input is logged and rendered as
/// unknown coverage.
pub fn map_to_color(coverage: Option<f64>) -> Rgb {
    try_map_to_color(coverage).unwrap_or_else(|err| {
        warn!(%err, "falling back to unknown coverage color");
        Rgb::UNKNOWN
    })
}

/// Round half up, the way a browser's `Math.round` does.
#[allow(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate; callers pass bounded values"
)]
pub(crate) fn round_half_up(v: f64) -> i64 {
    let shifted = v + 0.5;
    let truncated = shifted as i64;
    if (truncated as f64) > shifted {
        truncated - 1
    } else {
        truncated
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to 0..=255 before the cast"
)]
fn channel(v: f64) -> u8 {
    round_half_up(v.clamp(0.0, 255.0)) as u8
}
