//! Directional distance to water with rain-shadow occlusion.
//!
//! From each land cell a fixed fan of rays is marched outward through the
//! elevation source. The first water sample along a ray gives its distance,
//! weighted by how far the ray strays from the upwind direction. Terrain
//! that rises well above the starting cell anywhere before the water adds
//! an occlusion penalty, which is what puts lee slopes in a rain shadow.

use glam::DVec2;

use crate::noise::CM_PER_KM;
use crate::terrain::ElevationSource;

use super::wind::WindRay;

/// Bisection steps used to place the coastline between two ray samples.
const COAST_REFINE_STEPS: u32 = 8;

/// Each step is this fraction of the distance already covered, so the
/// march is fine next to the cell and coarser far away.
const STEP_GROWTH: f64 = 0.25;

/// Ray-march tuning, all distances in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoastSearch {
    pub sea_level: f32,
    pub max_distance_km: f64,
    /// First and smallest step.
    pub min_step_km: f64,
    /// Largest step; water or ridges narrower than this may be stepped over.
    pub max_step_km: f64,
    pub shadow_strength: f64,
    pub mountain_threshold: f64,
}

impl CoastSearch {
    /// Normalized blocking height of `elevation` seen from `start`.
    fn occlusion(&self, start: f64, elevation: f64) -> f64 {
        let headroom = 1.0 - self.mountain_threshold;
        if headroom <= 0.0 {
            return 0.0;
        }
        ((elevation - start - self.mountain_threshold) / headroom).clamp(0.0, 1.0)
    }

    /// Sample distances (km) along every ray, ending at `max_distance_km`.
    pub fn march_distances(&self) -> impl Iterator<Item = f64> + '_ {
        let (min, max) = (self.min_step_km, self.max_step_km.max(self.min_step_km));
        let mut km = 0.0f64;
        std::iter::from_fn(move || {
            if km >= self.max_distance_km {
                return None;
            }
            km = (km + (km * STEP_GROWTH).clamp(min, max)).min(self.max_distance_km);
            Some(km)
        })
    }

    /// Effective distance from `origin` to water along the search rays.
    ///
    /// Every ray is marched outward until it meets water or leaves reach; the
    /// crossing is refined by bisection. A ray's distance is the crossing
    /// distance times the ray weight, plus the rain-shadow penalty for the
    /// highest terrain passed on the way. The smallest ray distance wins.
    ///
    /// # Arguments
    /// * `source` - Elevation along the rays
    /// * `rays` - Search directions and weights (see `search_rays`)
    /// * `origin` - World position in centimeters
    /// * `start_elevation` - Elevation of the origin cell itself
    ///
    /// # Returns
    /// Distance in km. Zero when the origin is at or below sea level,
    /// `f64::INFINITY` when no ray reaches water within `max_distance_km`.
    pub fn effective_distance_km<S>(&self, source: &S, rays: &[WindRay], origin: DVec2, start_elevation: f64) -> f64
    where
        S: ElevationSource + ?Sized,
    {
        let sea = self.sea_level as f64;
        if start_elevation <= sea {
            return 0.0;
        }

        let shadow_scale = self.shadow_strength * self.max_distance_km;
        let mut best = f64::INFINITY;

        for ray in rays {
            let at = |km: f64| origin + ray.direction * (km * CM_PER_KM);
            let mut occlusion = 0.0f64;
            let mut prev_km = 0.0;

            for km in self.march_distances() {
                // Water found in (prev_km, km] costs at least this much.
                if prev_km * ray.weight + shadow_scale * occlusion >= best {
                    break;
                }
                let p = at(km);
                let e = source.elevation_at(p.x, p.y);
                if e <= sea {
                    let hit_km = self.refine(source, &at, prev_km, km, start_elevation, &mut occlusion);
                    best = best.min(hit_km * ray.weight + shadow_scale * occlusion);
                    break;
                }
                occlusion = occlusion.max(self.occlusion(start_elevation, e));
                prev_km = km;
            }
        }

        best
    }

    /// Bisects the land-to-water transition on `(land_km, water_km]`.
    fn refine<S, F>(&self, source: &S, at: &F, mut land_km: f64, mut water_km: f64, start: f64, occlusion: &mut f64) -> f64
    where
        S: ElevationSource + ?Sized,
        F: Fn(f64) -> DVec2,
    {
        let sea = self.sea_level as f64;
        for _ in 0..COAST_REFINE_STEPS {
            let mid = 0.5 * (land_km + water_km);
            let p = at(mid);
            let e = source.elevation_at(p.x, p.y);
            if e <= sea {
                water_km = mid;
            } else {
                *occlusion = occlusion.max(self.occlusion(start, e));
                land_km = mid;
            }
        }
        water_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::wind::search_rays;

    fn search() -> CoastSearch {
        CoastSearch {
            sea_level: 0.1,
            max_distance_km: 150.0,
            min_step_km: 0.05,
            max_step_km: 2.5,
            shadow_strength: 0.8,
            mountain_threshold: 0.3,
        }
    }

    /// Ocean for x < 0, flat lowland east of it.
    fn west_coast(x: f64, _y: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            0.2
        }
    }

    #[test]
    fn water_cells_are_distance_zero() {
        let rays = search_rays(8, 180.0, 1.0);
        assert_eq!(search().effective_distance_km(&west_coast, &rays, DVec2::new(-10.0, 0.0), 0.0), 0.0);
    }

    #[test]
    fn upwind_coast_distance_is_close_to_geometric() {
        let rays = search_rays(8, 180.0, 1.0);
        let origin = DVec2::new(20.0 * CM_PER_KM, 0.0);
        let d = search().effective_distance_km(&west_coast, &rays, origin, 0.2);
        assert!((d - 20.0).abs() < 0.1, "distance {}", d);
    }

    #[test]
    fn downwind_coast_counts_farther() {
        let east_coast = |x: f64, _y: f64| if x > 0.0 { 0.0 } else { 0.2 };
        let rays = search_rays(8, 180.0, 1.0);
        let origin = DVec2::new(-20.0 * CM_PER_KM, 0.0);
        let d = search().effective_distance_km(&east_coast, &rays, origin, 0.2);
        assert!((d - 40.0).abs() < 0.2, "distance {}", d);
    }

    #[test]
    fn no_water_in_reach_is_infinite() {
        let land = |_x: f64, _y: f64| 0.5;
        let rays = search_rays(8, 180.0, 1.0);
        assert!(search().effective_distance_km(&land, &rays, DVec2::ZERO, 0.5).is_infinite());
    }

    #[test]
    fn ridge_adds_shadow_penalty() {
        let ridge = |x: f64, _y: f64| {
            if x < 0.0 {
                0.0
            } else if (5.0 * CM_PER_KM..10.0 * CM_PER_KM).contains(&x) {
                0.9
            } else {
                0.2
            }
        };
        let rays = search_rays(8, 180.0, 1.0);
        let origin = DVec2::new(20.0 * CM_PER_KM, 0.0);
        let open = search().effective_distance_km(&west_coast, &rays, origin, 0.2);
        let shadowed = search().effective_distance_km(&ridge, &rays, origin, 0.2);
        assert!(shadowed > open, "shadowed {} vs open {}", shadowed, open);
    }

    fn best_single_ray(
        search: &CoastSearch,
        source: &dyn ElevationSource,
        rays: &[WindRay],
        origin: DVec2,
        start: f64,
    ) -> f64 {
        rays.iter()
            .map(|ray| search.effective_distance_km(source, std::slice::from_ref(ray), origin, start))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn near_downwind_shore_beats_far_upwind_shore() {
        let two_shores = |x: f64, _y: f64| {
            if x < -3.0 * CM_PER_KM || x > 0.1 * CM_PER_KM {
                0.0
            } else {
                0.2
            }
        };
        let rays = search_rays(8, 180.0, 1.0);
        let d = search().effective_distance_km(&two_shores, &rays, DVec2::ZERO, 0.2);
        assert!((d - 0.2).abs() < 0.01, "distance {}", d);
        assert_eq!(d, best_single_ray(&search(), &two_shores, &rays, DVec2::ZERO, 0.2));
    }

    #[test]
    fn crosswind_water_is_found() {
        let north_bay = |_x: f64, y: f64| if y > 0.3 * CM_PER_KM { 0.0 } else { 0.2 };
        let rays = search_rays(8, 180.0, 1.0);
        let d = search().effective_distance_km(&north_bay, &rays, DVec2::ZERO, 0.2);
        // straight north has weight 1.5
        assert!((d - 0.45).abs() < 0.01, "distance {}", d);
    }

    #[test]
    fn narrow_lake_next_to_cell_is_seen() {
        let lake = |x: f64, _y: f64| {
            if (-2.5 * CM_PER_KM..=-0.5 * CM_PER_KM).contains(&x) {
                0.0
            } else {
                0.2
            }
        };
        let rays = search_rays(8, 180.0, 1.0);
        let d = search().effective_distance_km(&lake, &rays, DVec2::ZERO, 0.2);
        assert!((d - 0.5).abs() < 0.01, "distance {}", d);
    }

    #[test]
    fn march_starts_small_and_caps_its_steps() {
        let s = search();
        let distances: Vec<f64> = s.march_distances().collect();
        assert_eq!(distances[0], s.min_step_km);
        assert_eq!(*distances.last().unwrap(), s.max_distance_km);
        let mut prev = 0.0;
        for &km in &distances {
            assert!(km > prev);
            assert!(km - prev <= s.max_step_km + 1e-9);
            prev = km;
        }
    }

    #[test]
    fn combined_search_equals_best_single_ray() {
        let islands = |x: f64, y: f64| {
            let km = DVec2::new(x, y) / CM_PER_KM;
            if km.distance(DVec2::new(4.0, 3.0)) < 1.0 || km.distance(DVec2::new(-1.5, -6.0)) < 0.7 {
                0.0
            } else {
                0.3
            }
        };
        let rays = search_rays(12, 200.0, 1.0);
        for origin in [DVec2::ZERO, DVec2::new(2.0e5, -1.0e5), DVec2::new(-3.0e5, 4.0e5)] {
            let combined = search().effective_distance_km(&islands, &rays, origin, 0.3);
            assert_eq!(combined, best_single_ray(&search(), &islands, &rays, origin, 0.3));
        }
    }
}
