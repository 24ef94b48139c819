//! Terrain synthesis: bedrock from continental and detail noise plus
//! tectonic uplift, slope, soil deposition and final elevation.

mod config;
mod edge;
mod layer;
mod slope;
mod soil;

pub use config::{TerrainConfig, TerrainLevels, WorldEdgeMode};
pub use edge::apply_world_edge;
pub use layer::{elevation_from_fields, ElevationSource, TerrainLayer, TerrainSample};
pub use slope::{central_difference_slope, slope_from_field};
pub use soil::{final_elevation, soil_depth};
