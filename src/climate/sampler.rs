//! Elevation lookups backed by a precomputed field.

use crate::grid::{CoordGrid, Field, GridSpacing};
use crate::terrain::ElevationSource;

/// Reads elevation from a supplied field where it covers the query point
/// and from `fallback` everywhere else.
///
/// Inside the field, values are bilinearly interpolated, so edits made to
/// the field are what the moisture search sees.
pub struct FieldElevation<'a, S: ?Sized> {
    spacing: Option<GridSpacing>,
    field: &'a Field<f32>,
    fallback: &'a S,
}

impl<'a, S: ElevationSource + ?Sized> FieldElevation<'a, S> {
    /// `field` must already match `grid`'s shape.
    pub fn new(grid: &CoordGrid, field: &'a Field<f32>, fallback: &'a S) -> Self {
        let (w, h) = field.shape();
        let spacing = grid
            .spacing()
            .filter(|s| w >= 2 && h >= 2 && s.dx != 0.0 && s.dy != 0.0);
        Self { spacing, field, fallback }
    }

    fn interpolate(&self, s: &GridSpacing, x: f64, y: f64) -> Option<f64> {
        let (w, h) = self.field.shape();
        let fc = (x - s.origin_x) / s.dx;
        let fr = (y - s.origin_y) / s.dy;
        if !(0.0..=(w - 1) as f64).contains(&fc) || !(0.0..=(h - 1) as f64).contains(&fr) {
            return None;
        }
        let c0 = (fc.floor() as usize).min(w - 2);
        let r0 = (fr.floor() as usize).min(h - 2);
        let tx = fc - c0 as f64;
        let ty = fr - r0 as f64;

        let v = |c: usize, r: usize| self.field.get(c, r) as f64;
        let top = v(c0, r0) + (v(c0 + 1, r0) - v(c0, r0)) * tx;
        let bottom = v(c0, r0 + 1) + (v(c0 + 1, r0 + 1) - v(c0, r0 + 1)) * tx;
        Some(top + (bottom - top) * ty)
    }
}

impl<S: ElevationSource + ?Sized> ElevationSource for FieldElevation<'_, S> {
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        self.spacing
            .as_ref()
            .and_then(|s| self.interpolate(s, x, y))
            .unwrap_or_else(|| self.fallback.elevation_at(x, y))
    }
}
