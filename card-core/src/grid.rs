//! Canvas bounds enforcement and grid snapping for element geometry.

use crate::element::finite_or_zero;
use crate::{CanvasGrid, LayoutRect};

/// Round `value` to the nearest multiple of `step`.
///
/// A non-positive step leaves the value unchanged.
#[must_use]
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Largest multiple of `step` not exceeding `value`.
fn floor_to_step(value: f64, step: f64) -> f64 {
    (value / step).floor() * step
}

/// Clamp one axis so the element fits: length in `[1, extent]`, position in
/// `[0, extent - length]`.
fn bound_axis(position: f64, length: f64, extent: f64) -> (f64, f64) {
    let length = length.min(extent).max(1.0);
    let position = position.clamp(0.0, (extent - length).max(0.0));
    (position, length)
}

/// Snap one axis to whole cells, keeping the element inside `extent`.
fn snap_axis(position: f64, length: f64, extent: f64, step: f64) -> (f64, f64) {
    let length = snap_to_step(length, step).max(step);
    let max_position = floor_to_step(extent - step, step).max(0.0);
    let position = snap_to_step(position, step).clamp(0.0, max_position);
    let max_length = floor_to_step(extent - position, step).max(step);
    (position, length.clamp(step, max_length))
}

/// Clamp geometry to the canvas without snapping.
#[must_use]
pub fn enforce_bounds(rect: LayoutRect, canvas_width: f64, canvas_height: f64) -> LayoutRect {
    let canvas_width = finite_or_zero(canvas_width);
    let canvas_height = finite_or_zero(canvas_height);
    let (x, width) = bound_axis(finite_or_zero(rect.x), finite_or_zero(rect.width), canvas_width);
    let (y, height) = bound_axis(
        finite_or_zero(rect.y),
        finite_or_zero(rect.height),
        canvas_height,
    );
    LayoutRect {
        x,
        y,
        width,
        height,
    }
}

/// Clamp geometry to the canvas, snap it to the grid, and clamp again.
///
/// With snapping enabled and a canvas at least one cell wide, the result is
/// cell-aligned and `x + width <= canvas_width` (likewise vertically).
#[must_use]
pub fn snap_to_canvas(
    rect: LayoutRect,
    canvas_width: f64,
    canvas_height: f64,
    grid: &CanvasGrid,
) -> LayoutRect {
    let mut next = enforce_bounds(rect, canvas_width, canvas_height);

    if grid.snap {
        if grid.size.x > 0.0 {
            (next.x, next.width) = snap_axis(next.x, next.width, canvas_width, grid.size.x);
        }
        if grid.size.y > 0.0 {
            (next.y, next.height) = snap_axis(next.y, next.height, canvas_height, grid.size.y);
        }
    }

    enforce_bounds(next, canvas_width, canvas_height)
}
