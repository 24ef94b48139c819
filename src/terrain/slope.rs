//! Finite-difference slope.

use crate::grid::{CoordGrid, Field, GridError};
use crate::noise::CM_PER_KM;

/// Gradient magnitude from a central difference with half-width `h` (cm).
///
/// `f` is evaluated at the four stencil points; the result is in elevation
/// units per kilometer.
pub fn central_difference_slope(f: impl Fn(f64, f64) -> f64, x: f64, y: f64, h: f64) -> f64 {
    let gx = (f(x + h, y) - f(x - h, y)) / (2.0 * h);
    let gy = (f(x, y + h) - f(x, y - h)) / (2.0 * h);
    (gx * gx + gy * gy).sqrt() * CM_PER_KM
}

/// Slope of a sampled field, using the physical distance between samples.
///
/// Interior cells use central differences and border cells one-sided ones.
/// An axis with a single sample contributes no gradient.
pub fn slope_from_field(grid: &CoordGrid, field: &Field<f32>) -> Result<Field<f32>, GridError> {
    grid.ensure_matches(field, "bedrock")?;
    let (w, h) = field.shape();
    let xs = grid.x();
    let ys = grid.y();

    let partial = |lo: f32, hi: f32, from: f64, to: f64| -> f64 {
        let run = to - from;
        if run == 0.0 {
            0.0
        } else {
            (hi as f64 - lo as f64) / run
        }
    };

    Ok(Field::from_fn(w, h, |col, row| {
        let gx = if w < 2 {
            0.0
        } else {
            let (c0, c1) = (col.saturating_sub(1), (col + 1).min(w - 1));
            partial(field.get(c0, row), field.get(c1, row), xs.get(c0, row), xs.get(c1, row))
        };
        let gy = if h < 2 {
            0.0
        } else {
            let (r0, r1) = (row.saturating_sub(1), (row + 1).min(h - 1));
            partial(field.get(col, r0), field.get(col, r1), ys.get(col, r0), ys.get(col, r1))
        };
        ((gx * gx + gy * gy).sqrt() * CM_PER_KM) as f32
    }))
}
