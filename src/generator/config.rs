//! Top-level world configuration: defaults, JSON overrides and validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::biomes::BiomeConfig;
use crate::climate::ClimateConfig;
use crate::tectonics::TectonicConfig;
use crate::terrain::TerrainConfig;

use super::error::{require_positive, ConfigError};

/// Complete, validated configuration of one world.
///
/// Section structs are flattened, so overrides address every option by its
/// plain key (`"seed"`, `"terrain_amplitude"`, `"max_coastal_distance_km"`, ...),
/// while `terrain_levels` and `biome_thresholds` stay nested tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Master seed; every noise channel and the plate layout derive from it.
    pub seed: u64,
    pub world_width_chunks: u32,
    pub world_height_chunks: u32,
    /// Physical side length of one chunk, in centimeters.
    pub chunk_size_cm: f64,
    /// Samples per chunk side when rendering.
    pub chunk_resolution: usize,

    #[serde(flatten)]
    pub terrain: TerrainConfig,
    #[serde(flatten)]
    pub tectonics: TectonicConfig,
    #[serde(flatten)]
    pub climate: ClimateConfig,
    #[serde(flatten)]
    pub biomes: BiomeConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            world_width_chunks: 10,
            world_height_chunks: 10,
            chunk_size_cm: 10_000.0,
            chunk_resolution: 100,
            terrain: TerrainConfig::default(),
            tectonics: TectonicConfig::default(),
            climate: ClimateConfig::default(),
            biomes: BiomeConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Default configuration with a different master seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Default::default() }
    }

    /// Overlays a JSON object of user options on top of the defaults.
    ///
    /// Missing keys keep their defaults, nested tables are merged key by key,
    /// unknown keys are logged and ignored. The merged result is validated.
    pub fn from_overrides(overrides: &Value) -> Result<Self, ConfigError> {
        let Value::Object(user) = overrides else {
            return Err(ConfigError::NotAnObject);
        };

        let mut merged = match serde_json::to_value(Self::default())? {
            Value::Object(map) => map,
            _ => return Err(ConfigError::NotAnObject),
        };
        merge_known_keys(&mut merged, user, "");

        let config: Self = serde_json::from_value(Value::Object(merged))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width_chunks == 0 {
            return Err(ConfigError::OutOfRange {
                key: "world_width_chunks",
                value: 0.0,
                expected: "at least one chunk",
            });
        }
        if self.world_height_chunks == 0 {
            return Err(ConfigError::OutOfRange {
                key: "world_height_chunks",
                value: 0.0,
                expected: "at least one chunk",
            });
        }
        require_positive("chunk_size_cm", self.chunk_size_cm)?;
        if self.chunk_resolution == 0 {
            return Err(ConfigError::OutOfRange {
                key: "chunk_resolution",
                value: 0.0,
                expected: "at least one sample per chunk",
            });
        }

        self.terrain.validate()?;
        self.tectonics.validate()?;
        self.climate.validate()?;
        self.biomes.validate()?;
        Ok(())
    }

    /// World extent along x, in centimeters.
    pub fn world_width_cm(&self) -> f64 {
        self.world_width_chunks as f64 * self.chunk_size_cm
    }

    /// World extent along y, in centimeters.
    pub fn world_height_cm(&self) -> f64 {
        self.world_height_chunks as f64 * self.chunk_size_cm
    }

    pub fn total_chunks(&self) -> u64 {
        self.world_width_chunks as u64 * self.world_height_chunks as u64
    }
}

/// Recursively writes `user` into `base`, skipping keys `base` does not know.
fn merge_known_keys(base: &mut Map<String, Value>, user: &Map<String, Value>, prefix: &str) {
    for (key, value) in user {
        match base.get_mut(key) {
            None => {
                warn!(key = %format!("{prefix}{key}"), "ignoring unknown configuration key");
            }
            Some(Value::Object(nested)) if value.is_object() => {
                if let Value::Object(user_nested) = value {
                    merge_known_keys(nested, user_nested, &format!("{prefix}{key}."));
                }
            }
            Some(slot) => *slot = value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_overrides_yield_defaults() {
        let config = WorldConfig::from_overrides(&json!({})).unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn flat_keys_reach_their_sections() {
        let config = WorldConfig::from_overrides(&json!({
            "seed": 42,
            "target_sea_level_temp_c": 100.0,
            "terrain_amplitude": 1,
            "mountain_uplift_strength": 0.5,
            "snow_line_temp_c": -1.5,
            "world_edge_mode": "island",
        }))
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.climate.target_sea_level_temp_c, 100.0);
        assert_eq!(config.terrain.terrain_amplitude, 1.0);
        assert_eq!(config.tectonics.mountain_uplift_strength, 0.5);
        assert_eq!(config.biomes.snow_line_temp_c, -1.5);
        assert_eq!(config.terrain.world_edge_mode, crate::terrain::WorldEdgeMode::Island);
        // untouched keys keep defaults
        assert_eq!(config.climate.max_coastal_distance_km, 150.0);
    }

    #[test]
    fn nested_tables_merge_key_by_key() {
        let config = WorldConfig::from_overrides(&json!({
            "biome_thresholds": { "forest_max_humidity": 20.0 },
            "terrain_levels": { "sand": 0.15 },
        }))
        .unwrap();
        let thresholds = config.biomes.biome_thresholds;
        assert_eq!(thresholds.forest_max_humidity, 20.0);
        assert_eq!(thresholds.desert_max_humidity, 5.0);
        assert_eq!(config.terrain.terrain_levels.sand, 0.15);
        assert_eq!(config.terrain.terrain_levels.water, 0.1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = WorldConfig::from_overrides(&json!({
            "noise_scale": 12.0,
            "biome_thresholds": { "swamp_max_temp": 3.0 },
        }))
        .unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn non_object_overrides_are_rejected() {
        assert!(matches!(WorldConfig::from_overrides(&json!([1, 2])), Err(ConfigError::NotAnObject)));
    }

    #[test]
    fn wrong_types_fail_to_decode() {
        let err = WorldConfig::from_overrides(&json!({ "seed": "forty-two" })).unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = WorldConfig::from_overrides(&json!({ "base_noise_octaves": 0 })).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        let err = WorldConfig::from_overrides(&json!({ "world_width_chunks": 0 })).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "world_width_chunks", .. }));

        let err = WorldConfig::from_overrides(&json!({
            "biome_thresholds": { "tundra_max_temp": 10.0 }
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTable { .. }));
    }

    #[test]
    fn world_size_follows_chunks() {
        let config = WorldConfig { world_width_chunks: 4, world_height_chunks: 3, ..Default::default() };
        assert_eq!(config.world_width_cm(), 40_000.0);
        assert_eq!(config.world_height_cm(), 30_000.0);
        assert_eq!(config.total_chunks(), 12);
    }
}
