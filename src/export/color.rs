//! Color lookup tables for layer previews.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::biomes::Biome;
use crate::grid::Field;

/// Temperature range covered by the temperature palette (°C).
pub const MIN_GLOBAL_TEMP_C: f32 = -50.0;
pub const MAX_GLOBAL_TEMP_C: f32 = 50.0;

/// Humidity range covered by the humidity palette (g/m³).
pub const MIN_ABSOLUTE_HUMIDITY_G_M3: f32 = 0.0;
pub const MAX_ABSOLUTE_HUMIDITY_G_M3: f32 = 30.0;

/// Discrete humidity levels shown in previews.
pub const HUMIDITY_STEPS: f32 = 100.0;

const TEMP_STOPS: [(f32, [u8; 3]); 5] = [
    (0.0, [0, 0, 100]),
    (0.25, [0, 0, 255]),
    (0.75, [255, 255, 0]),
    (0.95, [255, 0, 0]),
    (1.0, [150, 0, 0]),
];

const HUMIDITY_DRY: [u8; 3] = [210, 180, 140];
const HUMIDITY_WET: [u8; 3] = [70, 130, 180];

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// 256-entry RGB table for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLut {
    entries: Vec<[u8; 3]>,
}

impl ColorLut {
    /// Cold-to-hot gradient through dark blue, blue, yellow, red and dark red.
    pub fn temperature() -> Self {
        let entries = (0..256)
            .map(|i| {
                let t = i as f32 / 255.0;
                let upper = TEMP_STOPS.iter().position(|&(at, _)| t < at).unwrap_or(TEMP_STOPS.len() - 1).max(1);
                let (t0, c0) = TEMP_STOPS[upper - 1];
                let (t1, c1) = TEMP_STOPS[upper];
                lerp_rgb(c0, c1, ((t - t0) / (t1 - t0)).clamp(0.0, 1.0))
            })
            .collect();
        Self { entries }
    }

    /// Linear tan-to-steel-blue gradient.
    pub fn humidity() -> Self {
        let entries = (0..256)
            .map(|i| lerp_rgb(HUMIDITY_DRY, HUMIDITY_WET, i as f32 / 255.0))
            .collect();
        Self { entries }
    }

    pub fn get(&self, index: u8) -> [u8; 3] {
        self.entries[index as usize]
    }

    /// Maps `t` in `[0, 1]` to an entry; values outside are clamped.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.get((t * 255.0) as u8)
    }
}

/// Temperature colors, quantized to whole degrees first.
pub fn temperature_colors(temperature: &Field<f32>, lut: &ColorLut) -> Field<[u8; 3]> {
    let range = MAX_GLOBAL_TEMP_C - MIN_GLOBAL_TEMP_C;
    temperature.map(|t| lut.sample((t.round() - MIN_GLOBAL_TEMP_C) / range))
}

/// Humidity colors, quantized to [`HUMIDITY_STEPS`] levels first.
pub fn humidity_colors(humidity: &Field<f32>, lut: &ColorLut) -> Field<[u8; 3]> {
    let range = MAX_ABSOLUTE_HUMIDITY_G_M3 - MIN_ABSOLUTE_HUMIDITY_G_M3;
    humidity.map(|h| {
        let normalized = (h - MIN_ABSOLUTE_HUMIDITY_G_M3) / range;
        lut.sample((normalized * HUMIDITY_STEPS).round() / HUMIDITY_STEPS)
    })
}

/// Grayscale for values normalized to `[0, 1]`.
pub fn grayscale_colors(values: &Field<f32>) -> Field<[u8; 3]> {
    values.map(|v| {
        let g = (v.clamp(0.0, 1.0) * 255.0) as u8;
        [g, g, g]
    })
}

pub fn biome_colors(biomes: &Field<Biome>) -> Field<[u8; 3]> {
    biomes.map(Biome::preview_rgb)
}

/// One distinct, reproducible color per plate.
///
/// Hues are spread with the golden ratio; saturation and value vary slightly.
pub fn plate_palette(num_plates: usize, seed: u64) -> Vec<[u8; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let golden_ratio = 0.618_034_f32;
    let mut hue = rng.random::<f32>();

    (0..num_plates.max(1))
        .map(|_| {
            hue = (hue + golden_ratio) % 1.0;
            let saturation = 0.5 + rng.random::<f32>() * 0.4;
            let value = 0.6 + rng.random::<f32>() * 0.3;
            hsv_to_rgb(hue, saturation, value)
        })
        .collect()
}

pub fn plate_colors(plate_ids: &Field<u32>, palette: &[[u8; 3]]) -> Field<[u8; 3]> {
    plate_ids.map(|id| palette.get(id as usize).copied().unwrap_or([255, 0, 255]))
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h = h * 6.0;
    let i = h.floor() as i32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}
