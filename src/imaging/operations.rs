//! High-level wallpaper operations.
//!
//! These functions combine naming, fill geometry and backend execution.
//! They decide *where* each wallpaper goes and *what* it looks like, then hand
//! the pixel work to an [`ImageBackend`].

use super::backend::{BackendError, ImageBackend};
use super::calculations::fill_scale;
use super::params::{ExportParams, ExportSettings, OutputFormat};
use crate::resolution::Resolution;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// One wallpaper written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWallpaper {
    pub resolution: Resolution,
    pub path: PathBuf,
    /// The source had to be enlarged to cover this resolution.
    pub upscaled: bool,
}

/// File name of the wallpaper for `resolution`, e.g. `wallpaper_1920x1080.jpg`.
pub fn wallpaper_filename(resolution: Resolution, format: OutputFormat) -> String {
    format!(
        "wallpaper_{}x{}.{}",
        resolution.width,
        resolution.height,
        format.extension()
    )
}

/// Plan an export without executing it.
pub fn plan_export(
    resolution: Resolution,
    output_dir: &Path,
    settings: &ExportSettings,
) -> ExportParams {
    ExportParams {
        output: output_dir.join(wallpaper_filename(resolution, settings.format)),
        width: resolution.width,
        height: resolution.height,
        format: settings.format,
        quality: settings.quality,
    }
}

/// Fill, crop and encode one wallpaper from an already decoded source.
pub fn export_wallpaper<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    resolution: Resolution,
    output_dir: &Path,
    settings: &ExportSettings,
) -> Result<GeneratedWallpaper> {
    let params = plan_export(resolution, output_dir, settings);
    let source = backend.dimensions(image).as_tuple();
    let upscaled = fill_scale(source, (resolution.width, resolution.height)) > 1.0;
    if upscaled {
        tracing::warn!(
            source = %format!("{}x{}", source.0, source.1),
            target = %resolution,
            "source is smaller than target, upscaling"
        );
    }

    backend.export(image, &params)?;
    tracing::debug!(path = %params.output.display(), "wrote wallpaper");

    Ok(GeneratedWallpaper {
        resolution,
        path: params.output,
        upscaled,
    })
}
