//! Boundary proximity profile.

use std::f64::consts::PI;

/// Approximate distance to the Voronoi edge between the two nearest plates.
///
/// Exact on the segment joining the two seeds, a close underestimate elsewhere.
pub fn boundary_distance(nearest_dist: f64, second_dist: f64) -> f64 {
    ((second_dist - nearest_dist) * 0.5).max(0.0)
}

/// Maps a boundary distance to a proximity in `[0, 1]`.
///
/// 1 on the boundary, 0 at or beyond `radius`, with a cosine ease in between
/// so uplift ridges have rounded shoulders.
pub fn boundary_influence(distance: f64, radius: f64) -> f64 {
    if !distance.is_finite() {
        return 0.0;
    }
    let linear = 1.0 - (distance / radius).clamp(0.0, 1.0);
    ((1.0 - (linear * PI).cos()) * 0.5).clamp(0.0, 1.0)
}
