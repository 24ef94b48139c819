//! PNG writers for previews and 16-bit scalar layers.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgb};

use crate::grid::Field;

use super::ExportError;

/// Row `r` of the image is world row `height - 1 - r`, so north is up.
fn image_row(height: usize, row: u32) -> usize {
    height - 1 - row as usize
}

fn dimensions<T: Copy>(field: &Field<T>) -> Result<(u32, u32), ExportError> {
    let (w, h) = field.shape();
    if w == 0 || h == 0 {
        return Err(ExportError::EmptyImage);
    }
    let w = u32::try_from(w).map_err(|_| ExportError::TooLarge(w, h))?;
    let h32 = u32::try_from(h).map_err(|_| ExportError::TooLarge(w as usize, h))?;
    Ok((w, h32))
}

/// Writes an RGB preview.
pub fn write_rgb_png(colors: &Field<[u8; 3]>, path: &Path) -> Result<(), ExportError> {
    let (w, h) = dimensions(colors)?;
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(w, h, |x, y| Rgb(colors.get(x as usize, image_row(colors.height(), y))));

    let writer = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(img.as_raw(), w, h, image::ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Writes a scalar field as 16-bit grayscale, mapping `[min, max]` to the full range.
pub fn write_gray16_png(values: &Field<f32>, min: f32, max: f32, path: &Path) -> Result<(), ExportError> {
    if min >= max {
        return Err(ExportError::InvalidRange(min, max));
    }
    let (w, h) = dimensions(values)?;
    let range = max - min;
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(w, h, |x, y| {
        let v = values.get(x as usize, image_row(values.height(), y));
        let normalized = ((v - min) / range).clamp(0.0, 1.0);
        Luma([(normalized * 65535.0) as u16])
    });

    let writer = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    let bytes: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(bytes, w, h, image::ExtendedColorType::L16)?;
    Ok(())
}
