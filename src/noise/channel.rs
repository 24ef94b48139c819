//! Independent, reproducible noise channels derived from one master seed.

use crate::grid::{CoordGrid, Field};

use super::{FractalNoise, FractalNoiseConfig};

/// The noise channels the generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    /// Large-scale landmass shape.
    Continental,
    /// Small-scale ridges and coastline detail.
    Detail,
    /// Plate seed placement.
    Tectonic,
    /// Sea-level temperature variation.
    Temperature,
    /// Local absolute-humidity variation.
    Humidity,
}

impl NoiseChannel {
    pub const ALL: [NoiseChannel; 5] = [
        NoiseChannel::Continental,
        NoiseChannel::Detail,
        NoiseChannel::Tectonic,
        NoiseChannel::Temperature,
        NoiseChannel::Humidity,
    ];

    /// Fixed offset added to the master seed before hashing.
    pub fn seed_offset(self) -> u64 {
        match self {
            NoiseChannel::Continental => 0,
            NoiseChannel::Temperature => 12_347,
            NoiseChannel::Detail => 98_761,
            NoiseChannel::Tectonic => 54_321,
            NoiseChannel::Humidity => 25_391,
        }
    }

    /// Position of this channel in [`NoiseChannel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseChannel::Continental => "continental",
            NoiseChannel::Detail => "detail",
            NoiseChannel::Tectonic => "tectonic",
            NoiseChannel::Temperature => "temperature",
            NoiseChannel::Humidity => "humidity",
        }
    }
}

/// SplitMix64 finalizer.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sub-seed of `channel`: `splitmix64(master + channel.seed_offset())`.
pub fn derive_channel_seed(master: u64, channel: NoiseChannel) -> u64 {
    splitmix64(master.wrapping_add(channel.seed_offset()))
}

/// Every channel's sub-seed for one master seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSeeds {
    pub master: u64,
    pub continental: u64,
    pub detail: u64,
    pub tectonic: u64,
    pub temperature: u64,
    pub humidity: u64,
}

impl ChannelSeeds {
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            continental: derive_channel_seed(master, NoiseChannel::Continental),
            detail: derive_channel_seed(master, NoiseChannel::Detail),
            tectonic: derive_channel_seed(master, NoiseChannel::Tectonic),
            temperature: derive_channel_seed(master, NoiseChannel::Temperature),
            humidity: derive_channel_seed(master, NoiseChannel::Humidity),
        }
    }

    pub fn get(&self, channel: NoiseChannel) -> u64 {
        match channel {
            NoiseChannel::Continental => self.continental,
            NoiseChannel::Detail => self.detail,
            NoiseChannel::Tectonic => self.tectonic,
            NoiseChannel::Temperature => self.temperature,
            NoiseChannel::Humidity => self.humidity,
        }
    }
}

/// Read-only noise sources for every channel, built once per master seed.
#[derive(Debug, Clone)]
pub struct NoiseEngine {
    seeds: ChannelSeeds,
    sources: [FractalNoise; 5],
}

impl NoiseEngine {
    pub fn new(master_seed: u64) -> Self {
        let seeds = ChannelSeeds::from_master(master_seed);
        let sources = NoiseChannel::ALL.map(|channel| FractalNoise::new(seeds.get(channel) as u32));
        Self { seeds, sources }
    }

    pub fn seeds(&self) -> &ChannelSeeds {
        &self.seeds
    }

    pub fn source(&self, channel: NoiseChannel) -> &FractalNoise {
        &self.sources[channel.index()]
    }

    /// Signed fractal noise in `[-1, 1]` at one world position.
    pub fn sample_at(&self, channel: NoiseChannel, x: f64, y: f64, config: &FractalNoiseConfig) -> f64 {
        self.source(channel).sample(x, y, config)
    }

    /// Fractal noise in `[0, 1]` at one world position.
    pub fn sample_unit_at(&self, channel: NoiseChannel, x: f64, y: f64, config: &FractalNoiseConfig) -> f64 {
        self.source(channel).sample_unit(x, y, config)
    }

    /// Samples `channel` over a whole grid, returning signed values in `[-1, 1]`.
    pub fn sample(&self, channel: NoiseChannel, grid: &CoordGrid, config: &FractalNoiseConfig) -> Field<f32> {
        let source = self.source(channel);
        grid.map_points(|x, y| source.sample(x, y, config) as f32)
    }
}
