//! Terrain configuration parameters.

use serde::{Deserialize, Serialize};

use crate::generator::error::{require_non_negative, require_positive, require_unit_interval};
use crate::generator::ConfigError;
use crate::noise::FractalNoiseConfig;

/// Normalized elevation levels that split water, beach, lowland and alpine terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainLevels {
    /// Sea level. Cells at or below are water.
    pub water: f32,
    /// Upper bound of the beach band.
    pub sand: f32,
    /// Lower bound of the alpine band.
    pub dirt: f32,
}

impl Default for TerrainLevels {
    fn default() -> Self {
        Self {
            water: 0.1,
            sand: 0.11,
            dirt: 0.49,
        }
    }
}

/// How terrain behaves toward the border of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldEdgeMode {
    /// Terrain runs to the edge unchanged.
    #[default]
    #[serde(rename = "default")]
    Open,
    /// Bedrock fades down to sea floor near the edges.
    Island,
    /// Bedrock rises to mountain height near the edges.
    Valley,
}

/// Configuration for bedrock, slope and soil synthesis.
///
/// Feature scales are in kilometers; all elevations are normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // Continental (base) layer
    pub terrain_base_feature_scale_km: f64,
    pub base_noise_octaves: u8,
    pub base_noise_persistence: f64,
    pub base_noise_lacunarity: f64,

    // Detail layer
    pub terrain_detail_feature_scale_km: f64,
    pub detail_noise_octaves: u8,
    pub detail_noise_persistence: f64,
    pub detail_noise_lacunarity: f64,
    /// How much the detail layer influences the continental layer.
    pub detail_noise_weight: f32,

    /// Power-curve exponent applied after normalization.
    pub terrain_amplitude: f32,

    // Soil
    /// Soil depth on perfectly flat land.
    pub max_soil_depth_units: f32,
    /// Slope (normalized elevation per km) at which soil vanishes.
    pub max_expected_slope_per_km: f32,
    /// Half-width of the central-difference stencil used for pointwise slope.
    pub slope_sample_spacing_cm: f64,

    pub terrain_levels: TerrainLevels,

    // World edges
    pub world_edge_mode: WorldEdgeMode,
    /// Fraction of the shorter world dimension over which edges blend.
    pub world_edge_blend_distance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            terrain_base_feature_scale_km: 40.0,
            base_noise_octaves: 4,
            base_noise_persistence: 0.5,
            base_noise_lacunarity: 2.0,

            terrain_detail_feature_scale_km: 2.5,
            detail_noise_octaves: 6,
            detail_noise_persistence: 0.5,
            detail_noise_lacunarity: 2.0,
            detail_noise_weight: 0.25,

            terrain_amplitude: 2.5,

            max_soil_depth_units: 0.05,
            max_expected_slope_per_km: 1.0,
            slope_sample_spacing_cm: 100.0,

            terrain_levels: TerrainLevels::default(),

            world_edge_mode: WorldEdgeMode::Open,
            world_edge_blend_distance: 0.1,
        }
    }
}

impl TerrainConfig {
    /// Octave parameters of the continental layer.
    pub fn continental_noise(&self) -> FractalNoiseConfig {
        FractalNoiseConfig::from_feature_scale_km(
            self.terrain_base_feature_scale_km,
            self.base_noise_octaves,
            self.base_noise_persistence,
            self.base_noise_lacunarity,
        )
    }

    /// Octave parameters of the detail layer.
    pub fn detail_noise(&self) -> FractalNoiseConfig {
        FractalNoiseConfig::from_feature_scale_km(
            self.terrain_detail_feature_scale_km,
            self.detail_noise_octaves,
            self.detail_noise_persistence,
            self.detail_noise_lacunarity,
        )
    }

    pub fn sea_level(&self) -> f32 {
        self.terrain_levels.water
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("terrain_base_feature_scale_km", self.terrain_base_feature_scale_km)?;
        require_positive("terrain_detail_feature_scale_km", self.terrain_detail_feature_scale_km)?;
        self.continental_noise().validate("base_noise_octaves")?;
        self.detail_noise().validate("detail_noise_octaves")?;

        require_non_negative("detail_noise_weight", self.detail_noise_weight as f64)?;
        require_non_negative("terrain_amplitude", self.terrain_amplitude as f64)?;
        require_non_negative("max_soil_depth_units", self.max_soil_depth_units as f64)?;
        require_positive("max_expected_slope_per_km", self.max_expected_slope_per_km as f64)?;
        require_positive("slope_sample_spacing_cm", self.slope_sample_spacing_cm)?;
        require_unit_interval("world_edge_blend_distance", self.world_edge_blend_distance)?;

        let levels = &self.terrain_levels;
        require_unit_interval("terrain_levels.water", levels.water as f64)?;
        require_unit_interval("terrain_levels.sand", levels.sand as f64)?;
        require_unit_interval("terrain_levels.dirt", levels.dirt as f64)?;
        if !(levels.water <= levels.sand && levels.sand <= levels.dirt) {
            return Err(ConfigError::MalformedTable {
                table: "terrain_levels",
                reason: format!(
                    "levels must ascend water <= sand <= dirt, got {} / {} / {}",
                    levels.water, levels.sand, levels.dirt
                ),
            });
        }
        Ok(())
    }
}
