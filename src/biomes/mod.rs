//! Biome classification.
//!
//! Every cell is matched against an ordered rule list (see [`BiomeTable`]);
//! the first rule that applies decides the biome.

mod config;
mod table;

pub use config::{BiomeConfig, BiomeThresholds};
pub use table::{BiomeRule, BiomeTable, CellConditions};

use serde::{Deserialize, Serialize};

/// Biome category. `as_u8()` is stable and used for storage/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Biome {
    Abyss = 0,
    DeepWater = 1,
    MidWater = 2,
    ShallowWater = 3,
    SeaIce = 4,
    Beach = 5,
    ExposedRock = 6,
    Snow = 7,
    Alpine = 8,
    Tundra = 9,
    Taiga = 10,
    Desert = 11,
    Grassland = 12,
    TemperateForest = 13,
    TropicalForest = 14,
    TemperateRainforest = 15,
    TropicalRainforest = 16,
}

impl Biome {
    pub const ALL: [Biome; 17] = [
        Biome::Abyss,
        Biome::DeepWater,
        Biome::MidWater,
        Biome::ShallowWater,
        Biome::SeaIce,
        Biome::Beach,
        Biome::ExposedRock,
        Biome::Snow,
        Biome::Alpine,
        Biome::Tundra,
        Biome::Taiga,
        Biome::Desert,
        Biome::Grassland,
        Biome::TemperateForest,
        Biome::TropicalForest,
        Biome::TemperateRainforest,
        Biome::TropicalRainforest,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn is_water(self) -> bool {
        matches!(
            self,
            Biome::Abyss | Biome::DeepWater | Biome::MidWater | Biome::ShallowWater | Biome::SeaIce
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Abyss => "abyss",
            Biome::DeepWater => "deep water",
            Biome::MidWater => "mid water",
            Biome::ShallowWater => "shallow water",
            Biome::SeaIce => "sea ice",
            Biome::Beach => "beach",
            Biome::ExposedRock => "exposed rock",
            Biome::Snow => "snow",
            Biome::Alpine => "alpine",
            Biome::Tundra => "tundra",
            Biome::Taiga => "taiga",
            Biome::Desert => "desert",
            Biome::Grassland => "grassland",
            Biome::TemperateForest => "temperate forest",
            Biome::TropicalForest => "tropical forest",
            Biome::TemperateRainforest => "temperate rainforest",
            Biome::TropicalRainforest => "tropical rainforest",
        }
    }

    /// RGB preview color for this biome.
    pub fn preview_rgb(self) -> [u8; 3] {
        match self {
            Biome::Abyss => [0, 0, 50],
            Biome::DeepWater => [10, 20, 80],
            Biome::MidWater => [20, 40, 120],
            Biome::ShallowWater => [26, 102, 255],
            Biome::SeaIce => [210, 225, 240],
            Biome::Beach => [240, 230, 140],
            Biome::ExposedRock => [112, 128, 144],
            Biome::Snow => [255, 255, 255],
            Biome::Alpine => [139, 69, 19],
            Biome::Tundra => [170, 190, 170],
            Biome::Taiga => [30, 80, 40],
            Biome::Desert => [220, 205, 140],
            Biome::Grassland => [154, 205, 50],
            Biome::TemperateForest => [34, 139, 34],
            Biome::TropicalForest => [50, 150, 70],
            Biome::TemperateRainforest => [0, 100, 0],
            Biome::TropicalRainforest => [20, 140, 55],
        }
    }
}
