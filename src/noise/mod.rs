//! Coherent noise for terrain and climate synthesis.
//!
//! Gradient noise comes from the `noise` crate's Perlin implementation; the
//! octave stacking, normalization and per-channel seeding live here.

mod channel;
mod fractal;

pub use channel::{derive_channel_seed, ChannelSeeds, NoiseChannel, NoiseEngine};
pub use fractal::{FractalNoise, FractalNoiseConfig, CM_PER_KM, MAX_OCTAVES};
