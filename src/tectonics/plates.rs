//! Plate seed points and nearest-plate queries.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distances from a query point to the two closest plate seeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPlates {
    /// Index of the closest seed. Ties resolve to the lowest index.
    pub nearest: usize,
    pub nearest_dist: f64,
    /// `f64::INFINITY` when the set holds a single plate.
    pub second_dist: f64,
}

/// A fixed set of plate seed points in world space (centimeters).
#[derive(Debug, Clone, PartialEq)]
pub struct PlateSet {
    seeds: Vec<DVec2>,
}

impl PlateSet {
    /// Scatters `count` seeds uniformly over `[0, width) x [0, height)`.
    ///
    /// The layout depends only on `seed`, `count` and the extent.
    pub fn generate(count: usize, seed: u64, width_cm: f64, height_cm: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let seeds = (0..count)
            .map(|_| {
                let u: f64 = rng.random();
                let v: f64 = rng.random();
                DVec2::new(u * width_cm, v * height_cm)
            })
            .collect();
        Self { seeds }
    }

    /// Uses caller-supplied seed points as-is.
    pub fn from_points(seeds: Vec<DVec2>) -> Self {
        Self { seeds }
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn seeds(&self) -> &[DVec2] {
        &self.seeds
    }

    /// Brute-force two-nearest search. Plate counts are small, so a linear
    /// scan beats building a spatial index.
    pub fn nearest_two(&self, pos: DVec2) -> Option<NearestPlates> {
        let mut best = (usize::MAX, f64::INFINITY);
        let mut second = f64::INFINITY;

        for (idx, seed) in self.seeds.iter().enumerate() {
            let dist = pos.distance(*seed);
            if dist < best.1 {
                second = best.1;
                best = (idx, dist);
            } else if dist < second {
                second = dist;
            }
        }

        (best.0 != usize::MAX).then_some(NearestPlates {
            nearest: best.0,
            nearest_dist: best.1,
            second_dist: second,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = PlateSet::generate(8, 42, 1.0e6, 5.0e5);
        let b = PlateSet::generate(8, 42, 1.0e6, 5.0e5);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn different_seeds_move_plates() {
        let a = PlateSet::generate(4, 1, 1.0e6, 1.0e6);
        let b = PlateSet::generate(4, 2, 1.0e6, 1.0e6);
        assert_ne!(a, b);
    }

    #[test]
    fn seeds_lie_inside_the_world() {
        let plates = PlateSet::generate(64, 7, 2.0e5, 1.0e5);
        for p in plates.seeds() {
            assert!((0.0..2.0e5).contains(&p.x), "x {} outside world", p.x);
            assert!((0.0..1.0e5).contains(&p.y), "y {} outside world", p.y);
        }
    }

    #[test]
    fn nearest_two_orders_distances() {
        let plates = PlateSet::from_points(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(100.0, 0.0),
        ]);
        let hit = plates.nearest_two(DVec2::new(8.0, 0.0)).unwrap();
        assert_eq!(hit.nearest, 1);
        assert_eq!(hit.nearest_dist, 2.0);
        assert_eq!(hit.second_dist, 8.0);
    }

    #[test]
    fn ties_pick_lowest_index() {
        let plates = PlateSet::from_points(vec![DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0)]);
        let hit = plates.nearest_two(DVec2::ZERO).unwrap();
        assert_eq!(hit.nearest, 0);
        assert_eq!(hit.nearest_dist, hit.second_dist);
    }

    #[test]
    fn single_and_empty_sets() {
        let one = PlateSet::from_points(vec![DVec2::new(3.0, 4.0)]);
        let hit = one.nearest_two(DVec2::ZERO).unwrap();
        assert_eq!(hit.nearest_dist, 5.0);
        assert!(hit.second_dist.is_infinite());

        assert!(PlateSet::from_points(Vec::new()).nearest_two(DVec2::ZERO).is_none());
    }
}
