//! Preview export: color tables and PNG writers.

mod color;
mod png;

pub use color::{
    biome_colors, grayscale_colors, humidity_colors, plate_colors, plate_palette, temperature_colors, ColorLut,
    HUMIDITY_STEPS, MAX_ABSOLUTE_HUMIDITY_G_M3, MAX_GLOBAL_TEMP_C, MIN_ABSOLUTE_HUMIDITY_G_M3, MIN_GLOBAL_TEMP_C,
};
pub use png::{write_gray16_png, write_rgb_png};

use thiserror::Error;

/// Errors that can occur while writing previews.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidRange(f32, f32),
    #[error("cannot write an empty image")]
    EmptyImage,
    #[error("image of {0}x{1} pixels is too large")]
    TooLarge(usize, usize),
}
