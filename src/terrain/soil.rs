//! Soil deposition.

use super::TerrainConfig;

/// Soil on a cell of the given bedrock height and slope (per km).
///
/// Flat land holds `max_soil_depth_units`; soil thins linearly to zero at
/// `max_expected_slope_per_km`. Cells at or below sea level hold none.
pub fn soil_depth(config: &TerrainConfig, bedrock: f64, slope_per_km: f64) -> f64 {
    if bedrock <= config.sea_level() as f64 {
        return 0.0;
    }
    let normalized = (slope_per_km / config.max_expected_slope_per_km as f64).clamp(0.0, 1.0);
    config.max_soil_depth_units as f64 * (1.0 - normalized)
}

/// Final elevation: bedrock plus soil, held inside `[0, 1]`.
pub fn final_elevation(bedrock: f64, soil: f64) -> f64 {
    (bedrock + soil).clamp(0.0, 1.0)
}
