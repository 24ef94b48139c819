//! Climate: temperature from latitude, noise and adiabatic cooling, and
//! absolute humidity from warm-air capacity and upwind distance to water.

mod coast;
mod config;
mod humidity;
mod layer;
mod sampler;
mod temperature;
mod wind;

pub use coast::CoastSearch;
pub use config::ClimateConfig;
pub use humidity::{relative_humidity, saturation_capacity_g_m3};
pub use layer::{ClimateLayer, HumiditySample};
pub use sampler::FieldElevation;
pub use temperature::{latitude_factor, temperature_c};
pub use wind::{search_rays, upwind_direction, WindRay};
