//! Moisture capacity and coastal humidity falloff.

/// Temperature range over which the saturation curve is evaluated (°C).
pub const SATURATION_TEMP_RANGE_C: (f64, f64) = (-90.0, 150.0);

/// Water vapour air can hold at saturation, in g/m³.
///
/// Magnus approximation of saturation vapour pressure converted to a density
/// through the ideal gas law. Strictly increasing in temperature.
pub fn saturation_capacity_g_m3(temp_c: f64) -> f64 {
    let t = temp_c.clamp(SATURATION_TEMP_RANGE_C.0, SATURATION_TEMP_RANGE_C.1);
    let vapour_pressure_hpa = 6.112 * (17.67 * t / (t + 243.5)).exp();
    216.7 * vapour_pressure_hpa / (t + 273.15)
}

/// Relative humidity in `[0, 1]` at an effective distance from water.
///
/// 1 at the shore, 0 at or beyond `max_distance_km`, shaped by `falloff`.
pub fn relative_humidity(distance_km: f64, max_distance_km: f64, falloff: f64) -> f64 {
    if !distance_km.is_finite() {
        return 0.0;
    }
    let ratio = (distance_km / max_distance_km).max(0.0);
    (1.0 - ratio.powf(falloff)).max(0.0)
}
