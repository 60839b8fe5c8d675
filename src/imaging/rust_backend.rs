//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Center crop to target aspect | `DynamicImage::crop_imm` |
//! | Resize to target | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality 1–100) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (compression from quality) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::source_crop_window;
use super::params::{ExportParams, OutputFormat, PngCompression};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Backend built on the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Load and decode an image from disk, honoring EXIF orientation.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_error(path, e))?;
    let orientation = decoder.orientation().map_err(|e| decode_error(path, e))?;

    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Cut the centered window with the target aspect, then resize it to
/// exactly `width x height`.
fn fill(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (x, y, crop_w, crop_h) = source_crop_window((img.width(), img.height()), (width, height));
    img.crop_imm(x, y, crop_w, crop_h)
        .resize_exact(width, height, FilterType::Lanczos3)
}

fn png_compression(level: PngCompression) -> CompressionType {
    match level {
        PngCompression::None => CompressionType::Uncompressed,
        PngCompression::Fastest => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    }
}

/// Encode and write `img` according to `params`.
fn save_image(img: DynamicImage, params: &ExportParams) -> Result<(), BackendError> {
    let path = params.output.as_path();
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    match params.format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel and only 8-bit samples.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut writer, params.quality.value() as u8);
            rgb.write_with_encoder(encoder)
                .map_err(|e| encode_error(path, e))?;
        }
        OutputFormat::Png => {
            let img = match img.color() {
                ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba16(img.to_rgba16()),
                _ => img,
            };
            let encoder = PngEncoder::new_with_quality(
                &mut writer,
                png_compression(PngCompression::from_quality(params.quality)),
                image::codecs::png::FilterType::Adaptive,
            );
            img.write_with_encoder(encoder)
                .map_err(|e| encode_error(path, e))?;
        }
    }

    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn export(&self, image: &DynamicImage, params: &ExportParams) -> Result<(), BackendError> {
        let filled = fill(image, params.width, params.height);
        save_image(filled, params)
    }
}
