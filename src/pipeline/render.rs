//! Chunk-by-chunk rendering of whole worlds.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::export::{
    biome_colors, grayscale_colors, humidity_colors, plate_colors, plate_palette, temperature_colors, ColorLut,
};
use crate::generator::{WorldGenError, WorldGenerator};
use crate::grid::{CoordGrid, Field};
use crate::noise::{NoiseChannel, CM_PER_KM};

use super::{LatticeElevation, LayerSet, TerrainFields};

/// A layer that can be rendered as a color preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayerKind {
    Biome,
    Elevation,
    Bedrock,
    Soil,
    Slope,
    Temperature,
    Humidity,
    Tectonic,
    Boundary,
}

impl LayerKind {
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Biome => "biome",
            LayerKind::Elevation => "elevation",
            LayerKind::Bedrock => "bedrock",
            LayerKind::Soil => "soil",
            LayerKind::Slope => "slope",
            LayerKind::Temperature => "temperature",
            LayerKind::Humidity => "humidity",
            LayerKind::Tectonic => "tectonic",
            LayerKind::Boundary => "boundary",
        }
    }
}

/// How to render a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub layer: LayerKind,
    /// Samples per chunk side.
    pub resolution: usize,
    /// Lattice spacing (km) for distant terrain seen by the moisture search.
    /// `None` evaluates terrain exactly, which is far slower.
    pub moisture_lattice_km: Option<f64>,
}

/// Color preview of one chunk, computing only the layers `options.layer` needs.
pub fn render_chunk(
    gen: &WorldGenerator,
    cx: u32,
    cy: u32,
    options: &RenderOptions,
) -> Result<Field<[u8; 3]>, WorldGenError> {
    let grid = CoordGrid::chunk(
        cx as i64,
        cy as i64,
        options.resolution,
        gen.config().chunk_size_cm,
        0,
    );

    let colors = match options.layer {
        LayerKind::Tectonic => {
            let palette = plate_palette(
                gen.config().tectonics.num_tectonic_plates,
                gen.noise().seeds().get(NoiseChannel::Tectonic),
            );
            plate_colors(&gen.plate_ids(&grid), &palette)
        }
        LayerKind::Boundary => grayscale_colors(&gen.boundary_proximity(&grid)),
        LayerKind::Bedrock => grayscale_colors(&gen.bedrock_elevation(&grid)),
        LayerKind::Elevation => grayscale_colors(&gen.elevation(&grid)),
        LayerKind::Slope => {
            let max_slope = gen.config().terrain.max_expected_slope_per_km;
            grayscale_colors(&gen.slope(&grid).map(|s| s / max_slope))
        }
        LayerKind::Soil => {
            let max_depth = gen.config().terrain.max_soil_depth_units;
            let soil = gen.soil_depth(&grid);
            if max_depth > 0.0 {
                grayscale_colors(&soil.map(|d| d / max_depth))
            } else {
                grayscale_colors(&soil.map(|_| 0.0))
            }
        }
        LayerKind::Temperature => {
            let terrain = TerrainFields::generate(gen, &grid)?;
            temperature_colors(&gen.temperature(&grid, Some(&terrain.elevation))?, &ColorLut::temperature())
        }
        LayerKind::Humidity => humidity_colors(&chunk_layers(gen, &grid, options)?.humidity, &ColorLut::humidity()),
        LayerKind::Biome => biome_colors(&chunk_layers(gen, &grid, options)?.biomes),
    };
    Ok(colors)
}

fn chunk_layers(gen: &WorldGenerator, grid: &CoordGrid, options: &RenderOptions) -> Result<LayerSet, WorldGenError> {
    match options.moisture_lattice_km {
        Some(km) => {
            let lattice = LatticeElevation::new(gen.terrain(), km * CM_PER_KM);
            let layers = LayerSet::generate_with_source(gen, grid, &lattice)?;
            debug!(nodes = lattice.cached_nodes(), "moisture lattice");
            Ok(layers)
        }
        None => LayerSet::generate(gen, grid),
    }
}

/// Renders the whole world, one chunk per parallel task.
///
/// Row 0 of the result is the southern edge of the world.
pub fn render_world(gen: &WorldGenerator, options: &RenderOptions) -> Result<Field<[u8; 3]>, WorldGenError> {
    info!(
        layer = options.layer.name(),
        chunks = gen.config().total_chunks(),
        resolution = options.resolution,
        "rendering world"
    );
    stitch_chunks(gen, options.resolution, |cx, cy| render_chunk(gen, cx, cy, options))
}

/// Final elevation of the whole world at `resolution` samples per chunk side.
pub fn world_elevation(gen: &WorldGenerator, resolution: usize) -> Result<Field<f32>, WorldGenError> {
    let size = gen.config().chunk_size_cm;
    info!(chunks = gen.config().total_chunks(), resolution, "sampling world elevation");
    stitch_chunks(gen, resolution, |cx, cy| {
        Ok(gen.elevation(&CoordGrid::chunk(cx as i64, cy as i64, resolution, size, 0)))
    })
}

/// Runs `chunk` for every chunk in parallel and places the results in one
/// world-sized field (world row `cy * resolution + r`).
///
/// Each task holds a single chunk's fields at a time.
fn stitch_chunks<T, F>(gen: &WorldGenerator, resolution: usize, chunk: F) -> Result<Field<T>, WorldGenError>
where
    T: Copy + Default + Send,
    F: Fn(u32, u32) -> Result<Field<T>, WorldGenError> + Sync,
{
    let config = gen.config();
    let (wc, hc) = (config.world_width_chunks, config.world_height_chunks);

    let chunks: Vec<((u32, u32), Field<T>)> = (0..hc)
        .flat_map(|cy| (0..wc).map(move |cx| (cx, cy)))
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(cx, cy)| chunk(cx, cy).map(|field| ((cx, cy), field)))
        .collect::<Result<_, _>>()?;

    let mut world = Field::filled(wc as usize * resolution, hc as usize * resolution, T::default());
    for ((cx, cy), field) in &chunks {
        let (x0, y0) = (*cx as usize * resolution, *cy as usize * resolution);
        for row in 0..resolution {
            for col in 0..resolution {
                world.set(x0 + col, y0 + row, field.get(col, row));
            }
        }
    }
    Ok(world)
}
