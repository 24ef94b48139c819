//! Biome classification configuration.

use serde::{Deserialize, Serialize};

use crate::generator::error::{require_finite, require_non_negative};
use crate::generator::ConfigError;

/// Temperature (°C) and absolute humidity (g/m³) bands of the climate lookup.
///
/// Bands are inclusive on their upper bound: a cell at exactly
/// `tundra_max_temp` is tundra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeThresholds {
    pub tundra_max_temp: f32,
    pub taiga_max_temp: f32,
    pub temperate_max_temp: f32,
    pub desert_max_humidity: f32,
    pub grassland_max_humidity: f32,
    pub forest_max_humidity: f32,
    /// Dry air at or above this temperature is desert up to `grassland_max_humidity`.
    pub hot_desert_min_temp: f32,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            tundra_max_temp: -5.0,
            taiga_max_temp: 3.0,
            temperate_max_temp: 18.0,
            desert_max_humidity: 5.0,
            grassland_max_humidity: 10.0,
            forest_max_humidity: 17.0,
            hot_desert_min_temp: 20.0,
        }
    }
}

impl BiomeThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            ("tundra_max_temp", self.tundra_max_temp),
            ("taiga_max_temp", self.taiga_max_temp),
            ("temperate_max_temp", self.temperate_max_temp),
            ("desert_max_humidity", self.desert_max_humidity),
            ("grassland_max_humidity", self.grassland_max_humidity),
            ("forest_max_humidity", self.forest_max_humidity),
            ("hot_desert_min_temp", self.hot_desert_min_temp),
        ];
        for (key, value) in all {
            require_finite(key, value as f64)?;
        }

        if !(self.tundra_max_temp < self.taiga_max_temp && self.taiga_max_temp < self.temperate_max_temp) {
            return Err(ConfigError::MalformedTable {
                table: "biome_thresholds",
                reason: format!(
                    "temperature bands must ascend (tundra {} < taiga {} < temperate {})",
                    self.tundra_max_temp, self.taiga_max_temp, self.temperate_max_temp
                ),
            });
        }
        if !(0.0 <= self.desert_max_humidity
            && self.desert_max_humidity < self.grassland_max_humidity
            && self.grassland_max_humidity < self.forest_max_humidity)
        {
            return Err(ConfigError::MalformedTable {
                table: "biome_thresholds",
                reason: format!(
                    "humidity bands must ascend from zero (desert {} < grassland {} < forest {})",
                    self.desert_max_humidity, self.grassland_max_humidity, self.forest_max_humidity
                ),
            });
        }
        Ok(())
    }
}

/// Configuration for the ordered biome rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// At or below this temperature land is snow-covered.
    pub snow_line_temp_c: f32,
    /// At or below this temperature water freezes to sea ice.
    pub ice_formation_temp_c: f32,
    /// Land with soil at or below this depth is bare rock.
    pub exposed_rock_soil_threshold: f32,
    pub biome_thresholds: BiomeThresholds,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            snow_line_temp_c: 0.0,
            ice_formation_temp_c: -2.0,
            exposed_rock_soil_threshold: 0.001,
            biome_thresholds: BiomeThresholds::default(),
        }
    }
}

impl BiomeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("snow_line_temp_c", self.snow_line_temp_c as f64)?;
        require_finite("ice_formation_temp_c", self.ice_formation_temp_c as f64)?;
        require_non_negative("exposed_rock_soil_threshold", self.exposed_rock_soil_threshold as f64)?;
        self.biome_thresholds.validate()
    }
}
