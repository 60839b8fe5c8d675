//! Image processing: decode, fill, crop, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Fill** | centered `crop_imm` to the target aspect, then Lanczos3 `resize_exact` |
//! | **Encode** | `JpegEncoder` (quality) / `PngEncoder` (compression from quality) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fill geometry (unit testable)
//! - **Parameters**: Data structures describing an export
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining naming, geometry and backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_fill_dimensions, fill_scale, source_crop_window};
pub use operations::{GeneratedWallpaper, export_wallpaper, plan_export, wallpaper_filename};
pub use params::{
    ExportParams, ExportSettings, OutputFormat, PngCompression, Quality, UnsupportedFormat,
};
pub use rust_backend::RustBackend;
