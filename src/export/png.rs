//! PNG export of rendered canvases and height grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, RgbImage};
use thiserror::Error;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidRange(f64, f64),
    #[error("Grid data length {actual} != expected {expected}")]
    DataLength { actual: usize, expected: usize },
    #[error("Cannot export an empty {0}x{1} image")]
    EmptyImage(u32, u32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Exports an RGB image as an 8-bit-per-channel PNG.
///
/// Parent directories are created as needed.
pub fn export_canvas_png(
    image: &RgbImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PngExportError::EmptyImage(width, height));
    }
    create_parent_dir(path)?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        image.as_raw(),
        width,
        height,
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}

/// Exports a row-major scalar grid as a 16-bit grayscale PNG.
///
/// Values are mapped linearly from `[min_value, max_value]` onto the full
/// 16-bit range, clamping anything outside it.
pub fn export_height_grid_png(
    width: u32,
    height: u32,
    data: &[f64],
    path: &Path,
    min_value: f64,
    max_value: f64,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if width == 0 || height == 0 {
        return Err(PngExportError::EmptyImage(width, height));
    }
    if !(min_value < max_value) {
        return Err(PngExportError::InvalidRange(min_value, max_value));
    }
    let expected = (width as usize) * (height as usize);
    if data.len() != expected {
        return Err(PngExportError::DataLength {
            actual: data.len(),
            expected,
        });
    }

    let range = max_value - min_value;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = data[(y * width + x) as usize];
            let normalized = ((v - min_value) / range).clamp(0.0, 1.0);
            let value = (normalized * 65535.0) as u16;
            img.put_pixel(x, y, Luma([value]));
        }
    }

    create_parent_dir(path)?;
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 slice to bytes for the encoder
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    Ok(())
}

/// Returns `(min, max)` of the finite values in `data`.
pub fn value_range(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn create_parent_dir(path: &Path) -> Result<(), std::io::Error> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_export_canvas_png() {
        let mut img = RgbImage::new(32, 16);
        for x in 0..32 {
            img.put_pixel(x, 3, Rgb([x as u8 * 8, 0, 255]));
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("canvas.png");
        export_canvas_png(&img, &path, &PngExportOptions::default()).unwrap();

        assert!(path.exists());
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (32, 16));
        assert_eq!(decoded.get_pixel(5, 3), &Rgb([40, 0, 255]));
    }

    #[test]
    fn test_export_empty_canvas_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let result = export_canvas_png(&RgbImage::new(0, 4), &path, &PngExportOptions::default());
        assert!(matches!(result, Err(PngExportError::EmptyImage(0, 4))));
    }

    #[test]
    fn test_export_height_grid() {
        let data: Vec<f64> = (0..64).map(|i| i as f64 - 32.0).collect();
        let dir = tempdir().unwrap();
        let path = dir.path().join("heights.png");
        export_height_grid_png(8, 8, &data, &path, -32.0, 31.0, &PngExportOptions::default())
            .unwrap();

        let decoded = image::open(&path).unwrap().to_luma16();
        assert_eq!(decoded.get_pixel(0, 0)[0], 0);
        assert_eq!(decoded.get_pixel(7, 7)[0], 65535);
    }

    #[test]
    fn test_invalid_range_and_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let options = PngExportOptions::default();

        let result = export_height_grid_png(2, 2, &[0.0; 4], &path, 1.0, 1.0, &options);
        assert!(matches!(result, Err(PngExportError::InvalidRange(_, _))));

        let result = export_height_grid_png(2, 2, &[0.0; 3], &path, 0.0, 1.0, &options);
        assert!(matches!(
            result,
            Err(PngExportError::DataLength {
                actual: 3,
                expected: 4
            })
        ));
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(&[]), None);
        assert_eq!(value_range(&[3.0, f64::NAN, -2.0, 7.5]), Some((-2.0, 7.5)));
    }
}
