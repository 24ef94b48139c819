//! Region-level orchestration: every layer for one grid, and whole-world
//! rendering as many small, independent chunk tasks.

mod lattice;
mod layers;
mod render;

pub use lattice::LatticeElevation;
pub use layers::{LayerSet, TerrainFields};
pub use render::{render_chunk, render_world, world_elevation, LayerKind, RenderOptions};
