//! Multi-octave fractal Brownian motion (fBm) over 2D world coordinates.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::generator::ConfigError;

/// Centimeters per kilometer; world coordinates are in centimeters.
pub const CM_PER_KM: f64 = 100_000.0;

/// Upper bound on octave count. Every [`FractalNoise`] pre-seeds this many layers.
pub const MAX_OCTAVES: u8 = 16;

/// Seed stride between consecutive octaves of one channel.
const OCTAVE_SEED_STRIDE: u32 = 31337;

/// Octave parameters for one fractal noise evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves (1..=16).
    pub octaves: u8,
    /// Frequency of the first octave, in cycles per centimeter.
    pub frequency: f64,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f64,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f64,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self::from_feature_scale_km(40.0, 4, 0.5, 2.0)
    }
}

impl FractalNoiseConfig {
    /// Builds a configuration whose first octave has one cycle per `scale_km`.
    pub fn from_feature_scale_km(scale_km: f64, octaves: u8, persistence: f64, lacunarity: f64) -> Self {
        Self {
            octaves,
            frequency: 1.0 / (scale_km * CM_PER_KM),
            lacunarity,
            persistence,
        }
    }

    /// Sum of all octave amplitudes, `sum(persistence^i)` for `i < octaves`.
    ///
    /// Closed form, so the normalized output range does not depend on how the
    /// octaves were accumulated.
    pub fn amplitude_sum(&self) -> f64 {
        let n = self.octaves as i32;
        if (self.persistence - 1.0).abs() < 1e-12 {
            n as f64
        } else {
            (1.0 - self.persistence.powi(n)) / (1.0 - self.persistence)
        }
    }

    /// Rejects parameter sets the sampler cannot honour.
    pub fn validate(&self, layer: &'static str) -> Result<(), ConfigError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(ConfigError::OutOfRange {
                key: layer,
                value: self.octaves as f64,
                expected: "octaves in 1..=16",
            });
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(ConfigError::OutOfRange {
                key: layer,
                value: self.frequency,
                expected: "a positive base frequency (feature scale must be > 0)",
            });
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(ConfigError::OutOfRange {
                key: layer,
                value: self.lacunarity,
                expected: "lacunarity > 0",
            });
        }
        if !(self.persistence.is_finite() && self.persistence > 0.0) {
            return Err(ConfigError::OutOfRange {
                key: layer,
                value: self.persistence,
                expected: "persistence > 0",
            });
        }
        Ok(())
    }
}

/// A seeded stack of gradient-noise octaves.
///
/// Each octave draws from its own Perlin permutation so octaves do not
/// correlate. The stack is immutable after construction and can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct FractalNoise {
    seed: u32,
    octaves: Vec<Perlin>,
}

impl FractalNoise {
    pub fn new(seed: u32) -> Self {
        let octaves = (0..MAX_OCTAVES as u32)
            .map(|i| Perlin::new(seed.wrapping_add(i.wrapping_mul(OCTAVE_SEED_STRIDE))))
            .collect();
        Self { seed, octaves }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples fractal noise at world position `(x, y)`.
    ///
    /// The result depends only on the position and `config`, never on the grid
    /// the position came from.
    ///
    /// # Arguments
    /// * `x`, `y` - World position in centimeters
    /// * `config` - Octaves, frequency and persistence; octaves beyond the
    ///   ones built for this seed are ignored
    ///
    /// # Returns
    /// A value in `[-1, 1]`, normalized by [`FractalNoiseConfig::amplitude_sum`]
    pub fn sample(&self, x: f64, y: f64, config: &FractalNoiseConfig) -> f64 {
        let octaves = (config.octaves as usize).clamp(1, self.octaves.len());
        let mut total = 0.0f64;
        let mut amplitude = 1.0f64;
        let mut frequency = config.frequency;

        for source in &self.octaves[..octaves] {
            total += source.get([x * frequency, y * frequency]) * amplitude;
            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }

        (total / config.amplitude_sum()).clamp(-1.0, 1.0)
    }

    /// Same as [`sample`](Self::sample) remapped to `[0, 1]`.
    pub fn sample_unit(&self, x: f64, y: f64, config: &FractalNoiseConfig) -> f64 {
        ((self.sample(x, y, config) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FractalNoiseConfig {
        FractalNoiseConfig::from_feature_scale_km(2.0, 6, 0.5, 2.0)
    }

    #[test]
    fn default_config_matches_continental_scale() {
        let cfg = FractalNoiseConfig::default();
        assert_eq!(cfg.octaves, 4);
        assert!((cfg.frequency - 1.0 / 4_000_000.0).abs() < 1e-18);
    }

    #[test]
    fn amplitude_sum_is_closed_form() {
        let cfg = FractalNoiseConfig { octaves: 3, frequency: 1.0, lacunarity: 2.0, persistence: 0.5 };
        assert!((cfg.amplitude_sum() - 1.75).abs() < 1e-12);

        let flat = FractalNoiseConfig { persistence: 1.0, ..cfg };
        assert_eq!(flat.amplitude_sum(), 3.0);
    }

    #[test]
    fn noise_reproducibility() {
        let noise = FractalNoise::new(12345);
        let a = noise.sample(123_456.0, -98_765.0, &config());
        let b = noise.sample(123_456.0, -98_765.0, &config());
        assert_eq!(a.to_bits(), b.to_bits(), "Same seed and position should produce same result");
    }

    #[test]
    fn different_seeds_produce_different_results() {
        let cfg = config();
        let a = FractalNoise::new(1);
        let b = FractalNoise::new(2);
        let differs = (0..32).any(|i| {
            let x = 13_371.0 * i as f64 + 0.5;
            a.sample(x, x * 0.7, &cfg) != b.sample(x, x * 0.7, &cfg)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn noise_stays_in_range_for_negative_coordinates() {
        let noise = FractalNoise::new(7);
        let cfg = config();
        for i in -50..50 {
            let x = i as f64 * 7_919.3;
            let y = -(i as f64) * 3_301.7 - 1.0e7;
            let v = noise.sample(x, y, &cfg);
            assert!((-1.0..=1.0).contains(&v), "noise {} at ({}, {}) out of range", v, x, y);
            let u = noise.sample_unit(x, y, &cfg);
            assert!((0.0..=1.0).contains(&u));
        }
    }

    #[test]
    fn noise_is_continuous() {
        let noise = FractalNoise::new(99);
        let cfg = config();
        let step = 1.0;
        let mut prev = noise.sample(0.0, 0.0, &cfg);
        for i in 1..200 {
            let v = noise.sample(i as f64 * step, 0.0, &cfg);
            assert!((v - prev).abs() < 0.01, "jump of {} between adjacent samples", (v - prev).abs());
            prev = v;
        }
    }

    #[test]
    fn validation_rejects_zero_octaves_and_bad_frequency() {
        let mut cfg = config();
        cfg.octaves = 0;
        assert!(cfg.validate("test").is_err());

        let mut cfg = config();
        cfg.frequency = 0.0;
        assert!(cfg.validate("test").is_err());

        let mut cfg = config();
        cfg.octaves = MAX_OCTAVES + 1;
        assert!(cfg.validate("test").is_err());

        assert!(config().validate("test").is_ok());
    }
}
