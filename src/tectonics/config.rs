//! Configuration for tectonic boundary synthesis.

use serde::{Deserialize, Serialize};

use crate::generator::error::{require_non_negative, require_positive};
use crate::generator::ConfigError;

/// Configuration parameters for plate placement and boundary uplift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TectonicConfig {
    /// Number of plate seed points scattered over the world.
    pub num_tectonic_plates: usize,
    /// Multiplier applied to boundary proximity before it is added to bedrock.
    pub mountain_uplift_strength: f32,
    /// Distance from a plate boundary (km) over which uplift fades out.
    pub mountain_influence_radius_km: f64,
}

impl Default for TectonicConfig {
    fn default() -> Self {
        Self {
            num_tectonic_plates: 2,
            mountain_uplift_strength: 2.5,
            mountain_influence_radius_km: 0.05,
        }
    }
}

impl TectonicConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("mountain_uplift_strength", self.mountain_uplift_strength as f64)?;
        require_positive("mountain_influence_radius_km", self.mountain_influence_radius_km)?;
        Ok(())
    }
}
