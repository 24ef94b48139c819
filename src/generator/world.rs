//! The generator facade consumed by editors, bakers and viewers.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::biomes::{Biome, BiomeTable, CellConditions};
use crate::climate::{ClimateLayer, FieldElevation};
use crate::grid::{CoordGrid, Field};
use crate::noise::{NoiseChannel, NoiseEngine};
use crate::tectonics::TectonicSynthesizer;
use crate::terrain::{ElevationSource, TerrainLayer};

use super::{WorldConfig, WorldGenError};

/// Every layer evaluated at a single world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointSample {
    pub x: f64,
    pub y: f64,
    pub plate_id: u32,
    pub boundary_proximity: f64,
    pub bedrock: f64,
    pub slope: f64,
    pub soil_depth: f64,
    pub elevation: f64,
    pub temperature_c: f64,
    pub water_distance_km: f64,
    pub humidity_g_m3: f64,
    pub biome: Biome,
}

/// Deterministic world generator.
///
/// Immutable after construction: every query is a pure function of its
/// inputs, so one generator can be shared across threads.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    config: WorldConfig,
    noise: Arc<NoiseEngine>,
    terrain: TerrainLayer,
    climate: ClimateLayer,
    biomes: BiomeTable,
}

impl WorldGenerator {
    /// Builds a generator for one world.
    ///
    /// Plates, noise channels and layer settings are all derived from
    /// `config.seed`, so two generators built from equal configs agree bit
    /// for bit.
    ///
    /// # Arguments
    /// * `config` - Complete world configuration (see [`WorldConfig::from_overrides`])
    ///
    /// # Returns
    /// The generator, or [`WorldGenError::Config`] when `config` fails validation
    pub fn new(config: WorldConfig) -> Result<Self, WorldGenError> {
        config.validate()?;

        let noise = Arc::new(NoiseEngine::new(config.seed));
        let (width, height) = (config.world_width_cm(), config.world_height_cm());
        let tectonics = Arc::new(TectonicSynthesizer::new(
            &config.tectonics,
            noise.seeds().get(NoiseChannel::Tectonic),
            width,
            height,
        ));
        let terrain = TerrainLayer::new(config.terrain.clone(), noise.clone(), tectonics, width, height);
        let climate = ClimateLayer::new(config.climate.clone(), noise.clone(), config.terrain.sea_level(), height);
        let biomes = BiomeTable::new(config.biomes.clone(), config.terrain.terrain_levels);

        info!(
            seed = config.seed,
            width_cm = width,
            height_cm = height,
            plates = config.tectonics.num_tectonic_plates,
            "world generator initialized"
        );
        Ok(Self { config, noise, terrain, climate, biomes })
    }

    /// Builds a generator from a JSON object of overrides on top of the defaults.
    pub fn from_overrides(overrides: &Value) -> Result<Self, WorldGenError> {
        Self::new(WorldConfig::from_overrides(overrides)?)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn noise(&self) -> &NoiseEngine {
        &self.noise
    }

    pub fn terrain(&self) -> &TerrainLayer {
        &self.terrain
    }

    pub fn climate(&self) -> &ClimateLayer {
        &self.climate
    }

    pub fn biome_table(&self) -> &BiomeTable {
        &self.biomes
    }

    pub fn world_width_cm(&self) -> f64 {
        self.config.world_width_cm()
    }

    pub fn world_height_cm(&self) -> f64 {
        self.config.world_height_cm()
    }

    // ---- tectonics ----

    pub fn boundary_proximity(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.tectonics().boundary_proximity(grid)
    }

    pub fn plate_ids(&self, grid: &CoordGrid) -> Field<u32> {
        self.terrain.tectonics().plate_ids(grid)
    }

    pub fn tectonic_uplift(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.tectonics().uplift(grid)
    }

    // ---- terrain ----

    pub fn bedrock_elevation(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.bedrock(grid)
    }

    pub fn slope(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.slope(grid)
    }

    /// Slope of a supplied bedrock field at the grid's own sample spacing.
    pub fn slope_from_bedrock(&self, grid: &CoordGrid, bedrock: &Field<f32>) -> Result<Field<f32>, WorldGenError> {
        Ok(self.terrain.slope_from_bedrock(grid, bedrock)?)
    }

    pub fn soil_depth(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.soil_depth(grid)
    }

    /// Soil for precomputed slope and bedrock fields.
    pub fn soil_depth_from(&self, slope: &Field<f32>, bedrock: &Field<f32>) -> Result<Field<f32>, WorldGenError> {
        Ok(self.terrain.soil_depth_from(slope, bedrock)?)
    }

    pub fn elevation(&self, grid: &CoordGrid) -> Field<f32> {
        self.terrain.elevation(grid)
    }

    /// Final elevation from an explicitly supplied (possibly edited) bedrock field.
    pub fn elevation_from_bedrock(&self, grid: &CoordGrid, bedrock: &Field<f32>) -> Result<Field<f32>, WorldGenError> {
        Ok(self.terrain.elevation_from_bedrock(grid, bedrock)?)
    }

    // ---- climate ----

    /// Temperature in °C. Computes elevation when none is supplied.
    pub fn temperature(&self, grid: &CoordGrid, elevation: Option<&Field<f32>>) -> Result<Field<f32>, WorldGenError> {
        match elevation {
            Some(elevation) => Ok(self.climate.temperature(grid, elevation)?),
            None => Ok(self.climate.temperature(grid, &self.terrain.elevation(grid))?),
        }
    }

    /// Absolute humidity in g/m³.
    ///
    /// A supplied elevation field is what the moisture search sees inside the
    /// grid; terrain outside it is evaluated on demand. Without one, terrain is
    /// evaluated everywhere and the result does not depend on grid resolution.
    pub fn humidity(
        &self,
        grid: &CoordGrid,
        elevation: Option<&Field<f32>>,
        temperature: Option<&Field<f32>>,
    ) -> Result<Field<f32>, WorldGenError> {
        if let Some(temperature) = temperature {
            grid.ensure_matches(temperature, "temperature")?;
        }
        match elevation {
            Some(elevation) => {
                grid.ensure_matches(elevation, "elevation")?;
                let source = FieldElevation::new(grid, elevation, &self.terrain);
                self.humidity_with_source(grid, elevation, temperature, &source)
            }
            None => {
                let elevation = self.terrain.elevation(grid);
                self.humidity_with_source(grid, &elevation, temperature, &self.terrain)
            }
        }
    }

    /// Humidity with a caller-chosen elevation source for the moisture search.
    pub fn humidity_with_source<S>(
        &self,
        grid: &CoordGrid,
        elevation: &Field<f32>,
        temperature: Option<&Field<f32>>,
        source: &S,
    ) -> Result<Field<f32>, WorldGenError>
    where
        S: ElevationSource + ?Sized,
    {
        grid.ensure_matches(elevation, "elevation")?;
        if let Some(temperature) = temperature {
            grid.ensure_matches(temperature, "temperature")?;
        }
        let computed;
        let temperature = match temperature {
            Some(t) => t,
            None => {
                computed = self.climate.temperature(grid, elevation)?;
                &computed
            }
        };
        Ok(self.climate.humidity(grid, elevation, temperature, source)?)
    }

    // ---- biomes ----

    /// Biome per cell from the four final fields.
    pub fn classify(
        &self,
        elevation: &Field<f32>,
        temperature: &Field<f32>,
        humidity: &Field<f32>,
        soil_depth: &Field<f32>,
    ) -> Result<Field<Biome>, WorldGenError> {
        Ok(self.biomes.classify(elevation, temperature, humidity, soil_depth)?)
    }

    /// Evaluates every layer at one world position.
    pub fn sample_point(&self, x: f64, y: f64) -> PointSample {
        let terrain = self.terrain.sample_reported(x, y);
        let tectonics = self.terrain.tectonics();
        let temperature_c = self.climate.temperature_at(x, y, terrain.elevation);
        let humidity = self
            .climate
            .humidity_sample_reported(&self.terrain, x, y, terrain.elevation, temperature_c);
        let biome = self.biomes.classify_cell(&CellConditions {
            elevation: terrain.elevation as f32,
            temperature: temperature_c as f32,
            humidity: humidity.absolute_g_m3() as f32,
            soil_depth: terrain.soil_depth as f32,
        });
        debug!(x, y, ?biome, "sampled point");

        PointSample {
            x,
            y,
            plate_id: tectonics.plate_id_at(x, y),
            boundary_proximity: tectonics.boundary_proximity_at(x, y),
            bedrock: terrain.bedrock,
            slope: terrain.slope,
            soil_depth: terrain.soil_depth,
            elevation: terrain.elevation,
            temperature_c,
            water_distance_km: humidity.water_distance_km,
            humidity_g_m3: humidity.absolute_g_m3(),
            biome,
        }
    }
}
