// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the coverage color ramp.

use covermap_view::{ColorError, Rgb, map_to_color, try_map_to_color};
use proptest::prelude::*;

proptest! {
    #[test]
    fn in_range_coverage_is_red_to_green(c in 0.0..=100.0_f64) {
        let color = map_to_color(Some(c));
        prop_assert_eq!(color.blue, 0);
        // Below 50% red saturates, above it green does.
        if c <= 50.0 {
            prop_assert_eq!(color.red, 255);
        }
        if c >= 50.0 {
            prop_assert_eq!(color.green, 255);
        }
    }

    #[test]
    fn any_finite_coverage_maps(c in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let color = try_map_to_color(Some(c));
        prop_assert!(color.is_ok());
        prop_assert_eq!(color.map(|rgb| rgb.blue), Ok(0));
    }

    #[test]
    fn more_coverage_is_greener(a in 0.0..=100.0_f64, b in 0.0..=100.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (lo, hi) = (map_to_color(Some(lo)), map_to_color(Some(hi)));
        prop_assert!(hi.green >= lo.green);
        prop_assert!(hi.red <= lo.red);
    }
}

#[test]
fn unknown_and_invalid_coverage() {
    assert_eq!(map_to_color(None), Rgb::new(225, 225, 225));
    assert!(matches!(
        try_map_to_color(Some(f64::NAN)),
        Err(ColorError::InvalidInput(_))
    ));
    assert_eq!(map_to_color(Some(f64::NAN)), Rgb::UNKNOWN);
}
