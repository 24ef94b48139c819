//! Tectonic plate layout and boundary uplift.
//!
//! Plates are a sparse set of seed points scattered over the world. Each
//! location belongs to its nearest seed; proximity to the edge between the
//! two nearest seeds drives mountain uplift in the terrain layer.

mod config;
mod plates;
mod synthesizer;
pub mod boundary;

pub use config::TectonicConfig;
pub use plates::{NearestPlates, PlateSet};
pub use synthesizer::TectonicSynthesizer;
