//! Ordered first-match biome rules.

use tracing::debug;

use crate::grid::{Field, GridError};
use crate::terrain::TerrainLevels;

use super::{Biome, BiomeConfig};

/// The four inputs the classifier looks at for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellConditions {
    /// Final normalized elevation.
    pub elevation: f32,
    /// °C
    pub temperature: f32,
    /// g/m³
    pub humidity: f32,
    pub soil_depth: f32,
}

/// One entry of the classification table, in priority order.
///
/// Every comparison is inclusive: upper bounds use `<=`, lower bounds `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiomeRule {
    /// Water at or below the ice formation temperature.
    SeaIce,
    /// Any remaining water, split into depth bands.
    OpenWater,
    /// Land whose soil is at or below the exposed-rock threshold.
    ExposedRock,
    /// Land at or below the snow line.
    Snow,
    /// Land at or below the sand level.
    Beach,
    /// Land at or above the dirt level.
    Alpine,
    Tundra,
    Taiga,
    Desert,
    /// Hot air stays desert up to the grassland humidity band.
    HotDesert,
    Grassland,
    Forest,
    /// Catch-all for remaining land.
    Rainforest,
}

impl BiomeRule {
    pub const PRIORITY: [BiomeRule; 13] = [
        BiomeRule::SeaIce,
        BiomeRule::OpenWater,
        BiomeRule::ExposedRock,
        BiomeRule::Snow,
        BiomeRule::Beach,
        BiomeRule::Alpine,
        BiomeRule::Tundra,
        BiomeRule::Taiga,
        BiomeRule::Desert,
        BiomeRule::HotDesert,
        BiomeRule::Grassland,
        BiomeRule::Forest,
        BiomeRule::Rainforest,
    ];
}

/// Immutable classification table built from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeTable {
    config: BiomeConfig,
    levels: TerrainLevels,
    rules: Vec<BiomeRule>,
}

impl BiomeTable {
    pub fn new(config: BiomeConfig, levels: TerrainLevels) -> Self {
        Self {
            config,
            levels,
            rules: BiomeRule::PRIORITY.to_vec(),
        }
    }

    pub fn rules(&self) -> &[BiomeRule] {
        &self.rules
    }

    /// Returns the rule's biome if it applies to `cell`.
    pub fn apply(&self, rule: BiomeRule, cell: &CellConditions) -> Option<Biome> {
        let cfg = &self.config;
        let bands = &cfg.biome_thresholds;
        let sea = self.levels.water;
        let water = cell.elevation <= sea;
        let (t, h) = (cell.temperature, cell.humidity);

        if matches!(rule, BiomeRule::SeaIce | BiomeRule::OpenWater) != water {
            return None;
        }

        let hit = |cond: bool, biome: Biome| cond.then_some(biome);
        match rule {
            BiomeRule::SeaIce => hit(t <= cfg.ice_formation_temp_c, Biome::SeaIce),
            BiomeRule::OpenWater => Some(if cell.elevation <= sea * 0.25 {
                Biome::Abyss
            } else if cell.elevation <= sea * 0.5 {
                Biome::DeepWater
            } else if cell.elevation <= sea * 0.75 {
                Biome::MidWater
            } else {
                Biome::ShallowWater
            }),
            BiomeRule::ExposedRock => hit(cell.soil_depth <= cfg.exposed_rock_soil_threshold, Biome::ExposedRock),
            BiomeRule::Snow => hit(t <= cfg.snow_line_temp_c, Biome::Snow),
            BiomeRule::Beach => hit(cell.elevation <= self.levels.sand, Biome::Beach),
            BiomeRule::Alpine => hit(cell.elevation >= self.levels.dirt, Biome::Alpine),
            BiomeRule::Tundra => hit(t <= bands.tundra_max_temp, Biome::Tundra),
            BiomeRule::Taiga => hit(t <= bands.taiga_max_temp, Biome::Taiga),
            BiomeRule::Desert => hit(h <= bands.desert_max_humidity, Biome::Desert),
            BiomeRule::HotDesert => hit(
                t >= bands.hot_desert_min_temp && h <= bands.grassland_max_humidity,
                Biome::Desert,
            ),
            BiomeRule::Grassland => hit(h <= bands.grassland_max_humidity, Biome::Grassland),
            BiomeRule::Forest => hit(
                h <= bands.forest_max_humidity,
                if t <= bands.temperate_max_temp {
                    Biome::TemperateForest
                } else {
                    Biome::TropicalForest
                },
            ),
            BiomeRule::Rainforest => Some(if t <= bands.temperate_max_temp {
                Biome::TemperateRainforest
            } else {
                Biome::TropicalRainforest
            }),
        }
    }

    /// First matching rule's biome.
    pub fn classify_cell(&self, cell: &CellConditions) -> Biome {
        self.rules
            .iter()
            .find_map(|&rule| self.apply(rule, cell))
            .unwrap_or(Biome::TropicalRainforest)
    }

    /// Classifies every cell of four same-shape fields.
    pub fn classify(
        &self,
        elevation: &Field<f32>,
        temperature: &Field<f32>,
        humidity: &Field<f32>,
        soil_depth: &Field<f32>,
    ) -> Result<Field<Biome>, GridError> {
        let shape = elevation.shape();
        elevation.ensure_shape(temperature.shape(), "temperature")?;
        elevation.ensure_shape(humidity.shape(), "humidity")?;
        elevation.ensure_shape(soil_depth.shape(), "soil depth")?;

        debug!(cells = elevation.len(), "classifying biomes");
        Ok(Field::from_fn(shape.0, shape.1, |col, row| {
            self.classify_cell(&CellConditions {
                elevation: elevation.get(col, row),
                temperature: temperature.get(col, row),
                humidity: humidity.get(col, row),
                soil_depth: soil_depth.get(col, row),
            })
        }))
    }
}
