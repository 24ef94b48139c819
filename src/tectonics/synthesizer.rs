//! Plate layout plus the boundary proximity and uplift fields derived from it.

use glam::DVec2;
use tracing::debug;

use crate::grid::{CoordGrid, Field};
use crate::noise::CM_PER_KM;

use super::boundary::{boundary_distance, boundary_influence};
use super::{PlateSet, TectonicConfig};

/// Read-only tectonic state, fixed when the generator is built.
#[derive(Debug, Clone)]
pub struct TectonicSynthesizer {
    plates: PlateSet,
    influence_radius_cm: f64,
    uplift_strength: f32,
}

impl TectonicSynthesizer {
    /// Places `config.num_tectonic_plates` seeds over the world extent.
    pub fn new(config: &TectonicConfig, seed: u64, world_width_cm: f64, world_height_cm: f64) -> Self {
        let plates = PlateSet::generate(config.num_tectonic_plates, seed, world_width_cm, world_height_cm);
        debug!(plates = plates.len(), seed, "placed tectonic plates");
        Self::from_plates(plates, config)
    }

    /// Uses an explicit plate layout.
    pub fn from_plates(plates: PlateSet, config: &TectonicConfig) -> Self {
        Self {
            plates,
            influence_radius_cm: config.mountain_influence_radius_km * CM_PER_KM,
            uplift_strength: config.mountain_uplift_strength,
        }
    }

    pub fn plates(&self) -> &PlateSet {
        &self.plates
    }

    /// Proximity to the nearest plate boundary in `[0, 1]`.
    ///
    /// Zero everywhere when fewer than two plates exist.
    pub fn boundary_proximity_at(&self, x: f64, y: f64) -> f64 {
        if self.plates.len() < 2 {
            return 0.0;
        }
        match self.plates.nearest_two(DVec2::new(x, y)) {
            Some(hit) => boundary_influence(
                boundary_distance(hit.nearest_dist, hit.second_dist),
                self.influence_radius_cm,
            ),
            None => 0.0,
        }
    }

    pub fn boundary_proximity(&self, grid: &CoordGrid) -> Field<f32> {
        grid.map_points(|x, y| self.boundary_proximity_at(x, y) as f32)
    }

    /// Index of the plate owning `(x, y)`; 0 when no plates exist.
    pub fn plate_id_at(&self, x: f64, y: f64) -> u32 {
        self.plates
            .nearest_two(DVec2::new(x, y))
            .map_or(0, |hit| hit.nearest as u32)
    }

    pub fn plate_ids(&self, grid: &CoordGrid) -> Field<u32> {
        grid.map_points(|x, y| self.plate_id_at(x, y))
    }

    /// The additive bedrock term `mountain_uplift_strength * proximity`.
    pub fn uplift_at(&self, x: f64, y: f64) -> f64 {
        self.uplift_strength as f64 * self.boundary_proximity_at(x, y)
    }

    pub fn uplift(&self, grid: &CoordGrid) -> Field<f32> {
        grid.map_points(|x, y| self.uplift_at(x, y) as f32)
    }
}
