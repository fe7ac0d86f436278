// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified strip partitioning of a rectangle.
//!
//! The layout is computed in the unit square and then stretched onto the
//! target rectangle. The aspect bias passed to the row heuristic is scaled by
//! the target's height/width so that rows aim for the requested aspect ratio
//! in target space, not in unit space.

use alloc::{vec, vec::Vec};
use kurbo::{Rect, Size};

/// Axis-aligned cell in unit space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Cell {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

impl Cell {
    const UNIT: Self = Self {
        x: 0.0,
        y: 0.0,
        dx: 1.0,
        dy: 1.0,
    };

    fn short_side(&self) -> f64 {
        self.dx.min(self.dy)
    }

    fn project(&self, bounds: Rect) -> Rect {
        let (w, h) = (bounds.width(), bounds.height());
        Rect::new(
            bounds.x0 + self.x * w,
            bounds.y0 + self.y * h,
            bounds.x0 + (self.x + self.dx) * w,
            bounds.y0 + (self.y + self.dy) * h,
        )
    }
}

/// Items of the row currently being filled.
#[derive(Debug, Default)]
struct Row {
    items: Vec<usize>,
    area: f64,
}

impl Row {
    fn push(&mut self, item: usize, area: f64) {
        self.items.push(item);
        self.area += area;
    }

    fn pop(&mut self, area: f64) {
        self.items.pop();
        self.area -= area;
    }

    fn clear(&mut self) {
        self.items.clear();
        self.area = 0.0;
    }
}

/// Partition `bounds` into one rectangle per weight, returned in input order.
///
/// Weights that are negative, NaN or infinite count as zero. If no weight is
/// positive, or `bounds` has no area, every item gets an empty rectangle at
/// the origin of `bounds`.
pub(crate) fn squarify(weights: &[f64], bounds: Rect, aspect_ratio: f64) -> Vec<Rect> {
    let empty = Rect::from_origin_size(bounds.origin(), Size::ZERO);
    let mut out = vec![empty; weights.len()];

    let weights: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();
    let (width, height) = (bounds.width(), bounds.height());
    if total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return out;
    }

    let ratio = height / width * aspect_ratio;
    let areas: Vec<f64> = weights.iter().map(|w| w / total).collect();

    // Ascending by weight; rows are filled from the back, largest first.
    // The sort is stable so equal weights keep their input order.
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    remaining.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));

    let mut cells = vec![Cell::default(); weights.len()];
    let mut frame = Cell::UNIT;
    let mut row = Row::default();
    let mut best = f64::INFINITY;
    let mut side = frame.short_side();

    while let Some(&next) = remaining.last() {
        row.push(next, areas[next]);
        let score = worst(&row, side, ratio, &areas);
        if score <= best || row.items.len() == 1 {
            remaining.pop();
            best = score;
        } else {
            row.pop(areas[next]);
            position(&row, side, &mut frame, false, &areas, &mut cells);
            side = frame.short_side();
            row.clear();
            best = f64::INFINITY;
        }
    }
    if !row.items.is_empty() {
        position(&row, side, &mut frame, true, &areas, &mut cells);
    }

    for (rect, cell) in out.iter_mut().zip(&cells) {
        *rect = cell.project(bounds);
    }
    out
}

/// Worst aspect ratio of the row if laid along a side of length `side`.
fn worst(row: &Row, side: f64, ratio: f64, areas: &[f64]) -> f64 {
    let mut max = 0.0_f64;
    let mut min = f64::INFINITY;
    for &i in &row.items {
        let a = areas[i];
        if a <= 0.0 {
            continue;
        }
        min = min.min(a);
        max = max.max(a);
    }
    let s = row.area * row.area;
    if s <= 0.0 {
        return f64::INFINITY;
    }
    let u = side * side;
    ((u * max * ratio) / s).max(s / (u * min * ratio))
}

/// Lay the row along the short side of `frame` and shrink the frame past it.
///
/// The last item of the row absorbs any rounding slack so rows tile the frame
/// exactly. A `flush` row takes the whole remaining frame.
fn position(
    row: &Row,
    side: f64,
    frame: &mut Cell,
    flush: bool,
    areas: &[f64],
    cells: &mut [Cell],
) {
    let Some(&last) = row.items.last() else {
        return;
    };
    let mut thickness = if side > 0.0 { row.area / side } else { 0.0 };

    if frame.dx <= frame.dy {
        // Row spans the full width, stacked from the top.
        if flush || thickness > frame.dy {
            thickness = frame.dy;
        }
        let right = frame.x + frame.dx;
        let mut x = frame.x;
        for &i in &row.items {
            let extent = if thickness > 0.0 {
                areas[i] / thickness
            } else {
                0.0
            };
            let dx = (right - x).min(extent);
            cells[i] = Cell {
                x,
                y: frame.y,
                dx,
                dy: thickness,
            };
            x += dx;
        }
        cells[last].dx += right - x;
        frame.y += thickness;
        frame.dy -= thickness;
    } else {
        // Row spans the full height, stacked from the left.
        if flush || thickness > frame.dx {
            thickness = frame.dx;
        }
        let bottom = frame.y + frame.dy;
        let mut y = frame.y;
        for &i in &row.items {
            let extent = if thickness > 0.0 {
                areas[i] / thickness
            } else {
                0.0
            };
            let dy = (bottom - y).min(extent);
            cells[i] = Cell {
                x: frame.x,
                y,
                dx: thickness,
                dy,
            };
            y += dy;
        }
        cells[last].dy += bottom - y;
        frame.x += thickness;
        frame.dx -= thickness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: f64 = 1.618_033_988_749_895;

    fn area_sum(rects: &[Rect]) -> f64 {
        rects.iter().map(Rect::area).sum()
    }

    fn close(a: f64, b: f64) -> bool {
        let diff = if a > b { a - b } else { b - a };
        diff <= 1e-9 * b.max(1.0)
    }

    fn inside(outer: Rect, inner: Rect) -> bool {
        const EPS: f64 = 1e-9;
        inner.x0 >= outer.x0 - EPS
            && inner.y0 >= outer.y0 - EPS
            && inner.x1 <= outer.x1 + EPS
            && inner.y1 <= outer.y1 + EPS
    }

    #[test]
    fn single_item_fills_bounds() {
        let bounds = Rect::new(10.0, 20.0, 110.0, 70.0);
        let rects = squarify(&[3.0], bounds, GOLDEN);
        assert_eq!(rects, vec![bounds]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(squarify(&[], Rect::new(0.0, 0.0, 10.0, 10.0), GOLDEN).is_empty());
    }

    #[test]
    fn areas_are_proportional() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
        let weights = [1.0, 2.0, 3.0, 6.0];
        let rects = squarify(&weights, bounds, GOLDEN);
        let total: f64 = weights.iter().sum();
        for (rect, w) in rects.iter().zip(weights) {
            assert!(
                close(rect.area(), bounds.area() * w / total),
                "area of {rect:?} should match weight {w}"
            );
            assert!(inside(bounds, *rect), "{rect:?} escapes {bounds:?}");
        }
        assert!(close(area_sum(&rects), bounds.area()));
    }

    #[test]
    fn largest_item_is_placed_first() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rects = squarify(&[1.0, 10.0, 2.0], bounds, 1.0);
        assert_eq!(rects[1].origin(), bounds.origin());
    }

    #[test]
    fn zero_total_collapses_to_origin() {
        let bounds = Rect::new(5.0, 5.0, 50.0, 50.0);
        let rects = squarify(&[0.0, 0.0], bounds, GOLDEN);
        for rect in rects {
            assert_eq!(rect, Rect::new(5.0, 5.0, 5.0, 5.0));
        }
    }

    #[test]
    fn zero_area_bounds_collapse_to_origin() {
        let bounds = Rect::new(0.0, 0.0, 0.0, 50.0);
        let rects = squarify(&[1.0, 2.0], bounds, GOLDEN);
        assert!(rects.iter().all(|r| r.area() == 0.0));
    }

    #[test]
    fn bad_weights_count_as_zero() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let rects = squarify(&[f64::NAN, -4.0, 2.0, f64::INFINITY], bounds, GOLDEN);
        assert_eq!(rects[0].area(), 0.0);
        assert_eq!(rects[1].area(), 0.0);
        assert_eq!(rects[3].area(), 0.0);
        assert!(close(rects[2].area(), bounds.area()));
    }

    #[test]
    fn equal_weights_in_a_square_form_a_grid() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rects = squarify(&[1.0; 4], bounds, 1.0);
        for rect in &rects {
            assert!(close(rect.width(), 50.0), "{rect:?}");
            assert!(close(rect.height(), 50.0), "{rect:?}");
        }
    }
}
