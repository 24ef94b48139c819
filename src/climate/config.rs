//! Climate configuration parameters.

use serde::{Deserialize, Serialize};

use crate::generator::error::{require_finite, require_non_negative, require_positive, require_unit_interval};
use crate::generator::ConfigError;
use crate::noise::FractalNoiseConfig;

/// Configuration for the temperature and humidity models.
///
/// Units:
/// - temperatures: °C
/// - elevation: normalized [0, 1]
/// - distances: km
/// - humidity: g/m³
/// - wind direction: degrees, 0 = East, 90 = North, direction the wind blows from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    // Climate noise
    pub climate_feature_scale_km: f64,
    pub climate_noise_octaves: u8,
    pub climate_noise_persistence: f64,
    pub climate_noise_lacunarity: f64,

    // Temperature model
    pub target_sea_level_temp_c: f32,
    /// Peak-to-peak swing of the noise term around the target.
    pub seasonal_variation_c: f32,
    pub lapse_rate_c_per_unit_elevation: f32,
    pub polar_temperature_drop_c: f32,
    /// Equator row as a fraction of world height (0 = south edge).
    pub equator_y_pos_factor: f64,

    // Moisture transport
    pub prevailing_wind_direction_degrees: f64,
    pub humidity_coastal_falloff_rate: f32,
    pub max_coastal_distance_km: f64,
    /// 0 disables rain shadow; 1 adds a full coastal range of distance behind a peak.
    pub rain_shadow_strength: f64,
    /// Height above the receiving cell at which terrain starts to occlude moisture.
    pub rain_shadow_mountain_threshold: f32,
    /// Extra distance factor for water found directly downwind.
    pub crosswind_distance_penalty: f64,
    /// Number of directions searched for water around each land cell.
    pub humidity_ray_count: usize,
    /// First step of the water search; steps then grow with distance.
    pub humidity_min_step_km: f64,
    /// Longest step of the water search.
    pub humidity_max_step_km: f64,

    // Local humidity variation
    pub humidity_noise_feature_scale_km: f64,
    pub humidity_noise_amplitude_g_m3: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            climate_feature_scale_km: 120.0,
            climate_noise_octaves: 4,
            climate_noise_persistence: 0.5,
            climate_noise_lacunarity: 2.0,

            target_sea_level_temp_c: 15.0,
            seasonal_variation_c: 30.0,
            lapse_rate_c_per_unit_elevation: 40.0,
            polar_temperature_drop_c: 30.0,
            equator_y_pos_factor: 0.5,

            prevailing_wind_direction_degrees: 180.0,
            humidity_coastal_falloff_rate: 2.5,
            max_coastal_distance_km: 150.0,
            rain_shadow_strength: 0.8,
            rain_shadow_mountain_threshold: 0.3,
            crosswind_distance_penalty: 1.0,
            humidity_ray_count: 8,
            humidity_min_step_km: 0.05,
            humidity_max_step_km: 2.5,

            humidity_noise_feature_scale_km: 30.0,
            humidity_noise_amplitude_g_m3: 1.5,
        }
    }
}

impl ClimateConfig {
    /// Octave parameters of the sea-level temperature noise.
    pub fn temperature_noise(&self) -> FractalNoiseConfig {
        FractalNoiseConfig::from_feature_scale_km(
            self.climate_feature_scale_km,
            self.climate_noise_octaves,
            self.climate_noise_persistence,
            self.climate_noise_lacunarity,
        )
    }

    /// Octave parameters of the local humidity variation.
    pub fn humidity_noise(&self) -> FractalNoiseConfig {
        FractalNoiseConfig::from_feature_scale_km(
            self.humidity_noise_feature_scale_km,
            self.climate_noise_octaves,
            self.climate_noise_persistence,
            self.climate_noise_lacunarity,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("climate_feature_scale_km", self.climate_feature_scale_km)?;
        require_positive("humidity_noise_feature_scale_km", self.humidity_noise_feature_scale_km)?;
        self.temperature_noise().validate("climate_noise_octaves")?;
        self.humidity_noise().validate("climate_noise_octaves")?;

        require_finite("target_sea_level_temp_c", self.target_sea_level_temp_c as f64)?;
        require_non_negative("seasonal_variation_c", self.seasonal_variation_c as f64)?;
        require_finite("lapse_rate_c_per_unit_elevation", self.lapse_rate_c_per_unit_elevation as f64)?;
        require_finite("polar_temperature_drop_c", self.polar_temperature_drop_c as f64)?;
        require_unit_interval("equator_y_pos_factor", self.equator_y_pos_factor)?;

        require_finite("prevailing_wind_direction_degrees", self.prevailing_wind_direction_degrees)?;
        require_positive("humidity_coastal_falloff_rate", self.humidity_coastal_falloff_rate as f64)?;
        require_positive("max_coastal_distance_km", self.max_coastal_distance_km)?;
        require_non_negative("rain_shadow_strength", self.rain_shadow_strength)?;
        require_unit_interval("rain_shadow_mountain_threshold", self.rain_shadow_mountain_threshold as f64)?;
        require_non_negative("crosswind_distance_penalty", self.crosswind_distance_penalty)?;
        if self.humidity_ray_count == 0 {
            return Err(ConfigError::OutOfRange {
                key: "humidity_ray_count",
                value: 0.0,
                expected: "at least one direction",
            });
        }
        require_positive("humidity_min_step_km", self.humidity_min_step_km)?;
        if !(self.humidity_max_step_km.is_finite() && self.humidity_max_step_km >= self.humidity_min_step_km) {
            return Err(ConfigError::OutOfRange {
                key: "humidity_max_step_km",
                value: self.humidity_max_step_km,
                expected: "a step at least as long as humidity_min_step_km",
            });
        }
        require_non_negative("humidity_noise_amplitude_g_m3", self.humidity_noise_amplitude_g_m3 as f64)?;
        Ok(())
    }
}
