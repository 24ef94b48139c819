//! Configuration, errors and the [`WorldGenerator`] facade.

mod config;
pub mod error;
mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, WorldGenError};
pub use world::{PointSample, WorldGenerator};
