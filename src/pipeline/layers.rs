//! All generated layers for one coordinate grid.

use crate::biomes::Biome;
use crate::climate::FieldElevation;
use crate::generator::{WorldGenError, WorldGenerator};
use crate::grid::{CoordGrid, Field};
use crate::terrain::{elevation_from_fields, ElevationSource};

/// Every layer of one region, computed in dependency order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    pub plate_ids: Field<u32>,
    pub boundary_proximity: Field<f32>,
    pub bedrock: Field<f32>,
    pub slope: Field<f32>,
    pub soil_depth: Field<f32>,
    pub elevation: Field<f32>,
    pub temperature: Field<f32>,
    pub humidity: Field<f32>,
    pub biomes: Field<Biome>,
}

impl LayerSet {
    /// Generates every layer for `grid`.
    ///
    /// The moisture search reads this region's own elevation and evaluates
    /// terrain outside it on demand.
    pub fn generate(gen: &WorldGenerator, grid: &CoordGrid) -> Result<Self, WorldGenError> {
        let terrain = TerrainFields::generate(gen, grid)?;
        let temperature = gen.temperature(grid, Some(&terrain.elevation))?;
        let source = FieldElevation::new(grid, &terrain.elevation, gen.terrain());
        let humidity = gen.humidity_with_source(grid, &terrain.elevation, Some(&temperature), &source)?;
        Self::assemble(gen, grid, terrain, temperature, humidity)
    }

    /// Generates every layer, with `source` supplying elevation to the
    /// moisture search beyond each cell.
    pub fn generate_with_source<S>(gen: &WorldGenerator, grid: &CoordGrid, source: &S) -> Result<Self, WorldGenError>
    where
        S: ElevationSource + ?Sized,
    {
        let terrain = TerrainFields::generate(gen, grid)?;
        let temperature = gen.temperature(grid, Some(&terrain.elevation))?;
        let humidity = gen.humidity_with_source(grid, &terrain.elevation, Some(&temperature), source)?;
        Self::assemble(gen, grid, terrain, temperature, humidity)
    }

    fn assemble(
        gen: &WorldGenerator,
        grid: &CoordGrid,
        terrain: TerrainFields,
        temperature: Field<f32>,
        humidity: Field<f32>,
    ) -> Result<Self, WorldGenError> {
        let biomes = gen.classify(&terrain.elevation, &temperature, &humidity, &terrain.soil_depth)?;
        Ok(Self {
            plate_ids: gen.plate_ids(grid),
            boundary_proximity: gen.boundary_proximity(grid),
            bedrock: terrain.bedrock,
            slope: terrain.slope,
            soil_depth: terrain.soil_depth,
            elevation: terrain.elevation,
            temperature,
            humidity,
            biomes,
        })
    }
}

/// Bedrock, slope, soil and elevation of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainFields {
    pub bedrock: Field<f32>,
    pub slope: Field<f32>,
    pub soil_depth: Field<f32>,
    pub elevation: Field<f32>,
}

impl TerrainFields {
    /// Computes each terrain quantity once and derives the rest from it.
    pub fn generate(gen: &WorldGenerator, grid: &CoordGrid) -> Result<Self, WorldGenError> {
        let bedrock = gen.bedrock_elevation(grid);
        let slope = gen.slope(grid);
        let soil_depth = gen.soil_depth_from(&slope, &bedrock)?;
        let elevation = elevation_from_fields(&bedrock, &soil_depth)?;
        Ok(Self { bedrock, slope, soil_depth, elevation })
    }
}
