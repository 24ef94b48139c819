//! Deterministic procedural world generation.
//!
//! A world is a set of raster layers computed on demand for any coordinate
//! grid: bedrock, slope, soil depth, final elevation, temperature, humidity
//! and biomes. Every layer is a pure function of the master seed, the
//! configuration and the queried world coordinates, so chunks generated
//! independently at any resolution line up seamlessly.

pub mod biomes;
pub mod climate;
pub mod export;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod pipeline;
pub mod tectonics;
pub mod terrain;

pub use biomes::{Biome, BiomeConfig, BiomeTable, BiomeThresholds};
pub use climate::ClimateConfig;
pub use generator::{ConfigError, PointSample, WorldConfig, WorldGenError, WorldGenerator};
pub use grid::{CoordGrid, Field, GridError};
pub use crate::noise::{FractalNoiseConfig, NoiseChannel, NoiseEngine};
pub use pipeline::{LayerKind, LayerSet, RenderOptions};
pub use tectonics::TectonicConfig;
pub use terrain::{ElevationSource, TerrainConfig, WorldEdgeMode};
