//! Temperature and humidity fields.

use std::sync::Arc;

use glam::DVec2;
use tracing::{debug, warn};

use crate::grid::{CoordGrid, Field, GridError};
use crate::noise::{FractalNoiseConfig, NoiseChannel, NoiseEngine};
use crate::terrain::ElevationSource;

use super::coast::CoastSearch;
use super::humidity::{relative_humidity, saturation_capacity_g_m3, SATURATION_TEMP_RANGE_C};
use super::temperature::{latitude_factor, temperature_c};
use super::wind::{search_rays, WindRay};
use super::ClimateConfig;

/// Breakdown of the humidity computation at one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumiditySample {
    pub water_distance_km: f64,
    pub relative: f64,
    pub saturation_g_m3: f64,
    /// Absolute humidity before clamping to zero.
    pub raw_g_m3: f64,
}

impl HumiditySample {
    pub fn absolute_g_m3(&self) -> f64 {
        self.raw_g_m3.max(0.0)
    }
}

/// Climate synthesis bound to one seed and configuration.
#[derive(Debug, Clone)]
pub struct ClimateLayer {
    config: ClimateConfig,
    noise: Arc<NoiseEngine>,
    temperature_noise: FractalNoiseConfig,
    humidity_noise: FractalNoiseConfig,
    rays: Vec<WindRay>,
    coast: CoastSearch,
    world_height_cm: f64,
}

impl ClimateLayer {
    pub fn new(config: ClimateConfig, noise: Arc<NoiseEngine>, sea_level: f32, world_height_cm: f64) -> Self {
        let rays = search_rays(
            config.humidity_ray_count,
            config.prevailing_wind_direction_degrees,
            config.crosswind_distance_penalty,
        );
        let coast = CoastSearch {
            sea_level,
            max_distance_km: config.max_coastal_distance_km,
            min_step_km: config.humidity_min_step_km,
            max_step_km: config.humidity_max_step_km,
            shadow_strength: config.rain_shadow_strength,
            mountain_threshold: config.rain_shadow_mountain_threshold as f64,
        };
        Self {
            temperature_noise: config.temperature_noise(),
            humidity_noise: config.humidity_noise(),
            config,
            noise,
            rays,
            coast,
            world_height_cm,
        }
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    pub fn sea_level(&self) -> f32 {
        self.coast.sea_level
    }

    /// Temperature (°C) at `(x, y)` for the given final elevation.
    pub fn temperature_at(&self, x: f64, y: f64, elevation: f64) -> f64 {
        let noise = self
            .noise
            .sample_unit_at(NoiseChannel::Temperature, x, y, &self.temperature_noise);
        let latitude = latitude_factor(y, self.world_height_cm, self.config.equator_y_pos_factor);
        temperature_c(&self.config, noise, latitude, elevation)
    }

    pub fn temperature(&self, grid: &CoordGrid, elevation: &Field<f32>) -> Result<Field<f32>, GridError> {
        grid.ensure_matches(elevation, "elevation")?;
        debug!(points = grid.len(), "temperature");
        let mut i = 0;
        Ok(grid.map_points(|x, y| {
            let e = elevation.as_slice()[i];
            i += 1;
            self.temperature_at(x, y, e as f64) as f32
        }))
    }

    /// Effective upwind distance to water in km; infinite when none is in reach.
    pub fn water_distance_km<S>(&self, source: &S, x: f64, y: f64, elevation: f64) -> f64
    where
        S: ElevationSource + ?Sized,
    {
        self.coast
            .effective_distance_km(source, &self.rays, DVec2::new(x, y), elevation)
    }

    pub fn humidity_sample<S>(&self, source: &S, x: f64, y: f64, elevation: f64, temperature: f64) -> HumiditySample
    where
        S: ElevationSource + ?Sized,
    {
        let water_distance_km = self.water_distance_km(source, x, y, elevation);
        let relative = relative_humidity(
            water_distance_km,
            self.config.max_coastal_distance_km,
            self.config.humidity_coastal_falloff_rate as f64,
        );
        let saturation_g_m3 = saturation_capacity_g_m3(temperature);
        let variation = self.noise.sample_at(NoiseChannel::Humidity, x, y, &self.humidity_noise)
            * self.config.humidity_noise_amplitude_g_m3 as f64;
        HumiditySample {
            water_distance_km,
            relative,
            saturation_g_m3,
            raw_g_m3: saturation_g_m3 * relative + variation,
        }
    }

    /// Like [`humidity_sample`](Self::humidity_sample), but warns when the
    /// result is clamped to zero or the temperature is off the saturation curve.
    pub fn humidity_sample_reported<S>(
        &self,
        source: &S,
        x: f64,
        y: f64,
        elevation: f64,
        temperature: f64,
    ) -> HumiditySample
    where
        S: ElevationSource + ?Sized,
    {
        let (lo, hi) = SATURATION_TEMP_RANGE_C;
        if !(lo..=hi).contains(&temperature) {
            warn!(layer = "humidity", cells = 1, x, y, "temperature outside saturation curve range, clamped");
        }
        let sample = self.humidity_sample(source, x, y, elevation, temperature);
        if sample.raw_g_m3 < 0.0 {
            warn!(layer = "humidity", cells = 1, x, y, "negative humidity clamped to zero");
        }
        sample
    }

    /// Absolute humidity (g/m³) for every cell of `grid`.
    ///
    /// `elevation` and `temperature` are the final fields for the grid; the
    /// water search reads terrain beyond the current cell through `source`.
    /// Negative results are clamped to zero and reported.
    pub fn humidity<S>(
        &self,
        grid: &CoordGrid,
        elevation: &Field<f32>,
        temperature: &Field<f32>,
        source: &S,
    ) -> Result<Field<f32>, GridError>
    where
        S: ElevationSource + ?Sized,
    {
        grid.ensure_matches(elevation, "elevation")?;
        grid.ensure_matches(temperature, "temperature")?;

        let (lo, hi) = SATURATION_TEMP_RANGE_C;
        let mut clamped = 0usize;
        let mut out_of_curve = 0usize;
        let mut i = 0;
        let field = grid.map_points(|x, y| {
            let e = elevation.as_slice()[i] as f64;
            let t = temperature.as_slice()[i] as f64;
            i += 1;
            if !(lo..=hi).contains(&t) {
                out_of_curve += 1;
            }
            let sample = self.humidity_sample(source, x, y, e, t);
            if sample.raw_g_m3 < 0.0 {
                clamped += 1;
            }
            sample.absolute_g_m3() as f32
        });

        if clamped > 0 {
            warn!(layer = "humidity", cells = clamped, "negative humidity clamped to zero");
        }
        if out_of_curve > 0 {
            warn!(
                layer = "humidity",
                cells = out_of_curve,
                "temperature outside saturation curve range, clamped"
            );
        }
        debug!(points = grid.len(), "humidity");
        Ok(field)
    }
}
