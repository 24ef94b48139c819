//! Bedrock, slope, soil and final elevation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::grid::{CoordGrid, Field, GridError};
use crate::noise::{FractalNoiseConfig, NoiseChannel, NoiseEngine};
use crate::tectonics::TectonicSynthesizer;

use super::edge::apply_world_edge;
use super::slope::{central_difference_slope, slope_from_field};
use super::soil::{final_elevation, soil_depth};
use super::TerrainConfig;

/// Anything that can report final elevation at a world position.
///
/// The climate layer reads elevation through this seam so it never depends
/// on how terrain is produced.
pub trait ElevationSource {
    fn elevation_at(&self, x: f64, y: f64) -> f64;
}

impl<F> ElevationSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Every terrain quantity at one world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub bedrock: f64,
    pub slope: f64,
    pub soil_depth: f64,
    pub elevation: f64,
}

/// Terrain synthesis bound to one seed and configuration.
///
/// All grid queries are evaluated point by point, so a location yields the
/// same value no matter which grid it is sampled through.
#[derive(Debug, Clone)]
pub struct TerrainLayer {
    config: TerrainConfig,
    noise: Arc<NoiseEngine>,
    tectonics: Arc<TectonicSynthesizer>,
    continental: FractalNoiseConfig,
    detail: FractalNoiseConfig,
    world_width_cm: f64,
    world_height_cm: f64,
}

impl TerrainLayer {
    pub fn new(
        config: TerrainConfig,
        noise: Arc<NoiseEngine>,
        tectonics: Arc<TectonicSynthesizer>,
        world_width_cm: f64,
        world_height_cm: f64,
    ) -> Self {
        let continental = config.continental_noise();
        let detail = config.detail_noise();
        Self {
            config,
            noise,
            tectonics,
            continental,
            detail,
            world_width_cm,
            world_height_cm,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn tectonics(&self) -> &TectonicSynthesizer {
        &self.tectonics
    }

    pub fn sea_level(&self) -> f32 {
        self.config.sea_level()
    }

    /// Unclamped mix of the continental, detail and uplift terms.
    fn bedrock_mix(&self, x: f64, y: f64) -> f64 {
        let weight = self.config.detail_noise_weight as f64;
        let continental = self.noise.sample_unit_at(NoiseChannel::Continental, x, y, &self.continental);
        let detail = self.noise.sample_unit_at(NoiseChannel::Detail, x, y, &self.detail);
        let uplift = self.tectonics.uplift_at(x, y);
        (continental + weight * detail + uplift) / (1.0 + weight)
    }

    fn shape_bedrock(&self, mix: f64, x: f64, y: f64) -> f64 {
        let shaped = mix.clamp(0.0, 1.0).powf(self.config.terrain_amplitude as f64);
        let edged = apply_world_edge(
            self.config.world_edge_mode,
            shaped,
            x,
            y,
            self.world_width_cm,
            self.world_height_cm,
            self.config.world_edge_blend_distance,
        );
        edged.clamp(0.0, 1.0)
    }

    /// Normalized bedrock height in `[0, 1]`.
    pub fn bedrock_at(&self, x: f64, y: f64) -> f64 {
        self.shape_bedrock(self.bedrock_mix(x, y), x, y)
    }

    fn bedrock_counted(&self, x: f64, y: f64, counts: &mut ClampCounts) -> f64 {
        let mix = self.bedrock_mix(x, y);
        counts.bedrock(mix);
        self.shape_bedrock(mix, x, y)
    }

    pub fn bedrock(&self, grid: &CoordGrid) -> Field<f32> {
        debug!(points = grid.len(), "bedrock");
        let mut counts = ClampCounts::default();
        let field = grid.map_points(|x, y| self.bedrock_counted(x, y, &mut counts) as f32);
        counts.report();
        field
    }

    /// Bedrock slope in elevation units per km, from a fixed-width stencil.
    pub fn slope_at(&self, x: f64, y: f64) -> f64 {
        central_difference_slope(
            |sx, sy| self.bedrock_at(sx, sy),
            x,
            y,
            self.config.slope_sample_spacing_cm,
        )
    }

    pub fn slope(&self, grid: &CoordGrid) -> Field<f32> {
        debug!(points = grid.len(), "slope");
        grid.map_points(|x, y| self.slope_at(x, y) as f32)
    }

    pub fn sample_at(&self, x: f64, y: f64) -> TerrainSample {
        self.sample_counted(x, y, &mut ClampCounts::default())
    }

    /// Like [`sample_at`](Self::sample_at), but warns when the bedrock mix
    /// or the final elevation had to be clamped.
    pub fn sample_reported(&self, x: f64, y: f64) -> TerrainSample {
        let mut counts = ClampCounts::default();
        let sample = self.sample_counted(x, y, &mut counts);
        counts.report();
        sample
    }

    fn sample_counted(&self, x: f64, y: f64, counts: &mut ClampCounts) -> TerrainSample {
        let bedrock = self.bedrock_counted(x, y, counts);
        let slope = self.slope_at(x, y);
        let soil = soil_depth(&self.config, bedrock, slope);
        TerrainSample {
            bedrock,
            slope,
            soil_depth: soil,
            elevation: counts.elevation(bedrock, soil),
        }
    }

    pub fn soil_depth_at(&self, x: f64, y: f64) -> f64 {
        self.sample_at(x, y).soil_depth
    }

    pub fn soil_depth(&self, grid: &CoordGrid) -> Field<f32> {
        debug!(points = grid.len(), "soil depth");
        let mut counts = ClampCounts::default();
        let field = grid.map_points(|x, y| self.sample_counted(x, y, &mut counts).soil_depth as f32);
        counts.report();
        field
    }

    pub fn elevation(&self, grid: &CoordGrid) -> Field<f32> {
        debug!(points = grid.len(), "elevation");
        let mut counts = ClampCounts::default();
        let field = grid.map_points(|x, y| self.sample_counted(x, y, &mut counts).elevation as f32);
        counts.report();
        field
    }

    /// Slope of an already-computed bedrock field, at the grid's own spacing.
    pub fn slope_from_bedrock(&self, grid: &CoordGrid, bedrock: &Field<f32>) -> Result<Field<f32>, GridError> {
        slope_from_field(grid, bedrock)
    }

    /// Soil for precomputed slope and bedrock fields.
    pub fn soil_depth_from(&self, slope: &Field<f32>, bedrock: &Field<f32>) -> Result<Field<f32>, GridError> {
        slope.zip_map(bedrock, "bedrock", |s, b| soil_depth(&self.config, b as f64, s as f64) as f32)
    }

    /// Final elevation from a supplied bedrock field.
    ///
    /// Slope comes from the field itself, so results track edits made to
    /// `bedrock` but depend on the grid spacing.
    pub fn elevation_from_bedrock(&self, grid: &CoordGrid, bedrock: &Field<f32>) -> Result<Field<f32>, GridError> {
        let slope = self.slope_from_bedrock(grid, bedrock)?;
        let soil = self.soil_depth_from(&slope, bedrock)?;
        elevation_from_fields(bedrock, &soil)
    }
}

/// Final elevation from matching bedrock and soil fields, warning about
/// cells where bedrock plus soil exceeded 1.
pub fn elevation_from_fields(bedrock: &Field<f32>, soil: &Field<f32>) -> Result<Field<f32>, GridError> {
    let mut counts = ClampCounts::default();
    let field = bedrock.zip_map(soil, "soil depth", |b, s| counts.elevation(b as f64, s as f64) as f32)?;
    counts.report();
    Ok(field)
}

/// Cells whose values left the normalized range and were clamped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ClampCounts {
    bedrock: usize,
    elevation: usize,
}

impl ClampCounts {
    fn bedrock(&mut self, mix: f64) {
        if !(0.0..=1.0).contains(&mix) {
            self.bedrock += 1;
        }
    }

    fn elevation(&mut self, bedrock: f64, soil: f64) -> f64 {
        if bedrock + soil > 1.0 {
            self.elevation += 1;
        }
        final_elevation(bedrock, soil)
    }

    fn report(&self) {
        if self.bedrock > 0 {
            warn!(layer = "bedrock", cells = self.bedrock, "bedrock mix outside [0, 1], clamped");
        }
        if self.elevation > 0 {
            warn!(layer = "elevation", cells = self.elevation, "bedrock plus soil above 1, clamped");
        }
    }
}

impl ElevationSource for TerrainLayer {
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        self.sample_at(x, y).elevation
    }
}
