//! Prevailing wind and the search directions used for moisture transport.

use std::f64::consts::TAU;

use glam::DVec2;

/// Unit vector pointing toward where the wind comes from.
///
/// Degrees follow the compass-free math convention: 0 = East, 90 = North,
/// 180 = West, 270 = South.
pub fn upwind_direction(wind_from_degrees: f64) -> DVec2 {
    let theta = wind_from_degrees.to_radians();
    DVec2::new(theta.cos(), theta.sin())
}

/// One direction searched for water, with its distance multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindRay {
    pub direction: DVec2,
    /// `>= 1`; exactly 1 straight upwind, largest straight downwind.
    pub weight: f64,
}

/// `count` evenly spaced directions starting upwind, sorted by weight.
///
/// Water found off the upwind axis counts as farther away by
/// `1 + crosswind_penalty * (1 - cos(angle)) / 2`.
pub fn search_rays(count: usize, wind_from_degrees: f64, crosswind_penalty: f64) -> Vec<WindRay> {
    let base = wind_from_degrees.to_radians();
    let mut rays: Vec<WindRay> = (0..count)
        .map(|k| {
            let offset = TAU * k as f64 / count as f64;
            let theta = base + offset;
            WindRay {
                direction: DVec2::new(theta.cos(), theta.sin()),
                weight: 1.0 + crosswind_penalty * (1.0 - offset.cos()) * 0.5,
            }
        })
        .collect();
    rays.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    rays
}
