//! Sea-level temperature, latitude gradient and adiabatic cooling.

use super::ClimateConfig;

/// Distance from the equator row as a fraction of the longer hemisphere.
///
/// 0 on the equator, 1 at the farther pole, clamped outside the world.
pub fn latitude_factor(y: f64, world_height: f64, equator_y_pos_factor: f64) -> f64 {
    let equator_y = world_height * equator_y_pos_factor;
    let half_span = equator_y.max(world_height - equator_y);
    if half_span <= 0.0 {
        return 0.0;
    }
    ((y - equator_y).abs() / half_span).clamp(0.0, 1.0)
}

/// Temperature (°C) from the temperature noise in `[0, 1]`, latitude factor
/// and final elevation.
pub fn temperature_c(cfg: &ClimateConfig, noise_unit: f64, latitude: f64, elevation: f64) -> f64 {
    let sea_level = cfg.target_sea_level_temp_c as f64
        + (noise_unit - 0.5) * cfg.seasonal_variation_c as f64
        - cfg.polar_temperature_drop_c as f64 * latitude;
    sea_level - cfg.lapse_rate_c_per_unit_elevation as f64 * elevation
}
