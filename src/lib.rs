//! # WallGen
//!
//! Turns one high-resolution image into a set of wallpapers, one per screen
//! size. Each wallpaper fills its target exactly: the source is scaled with
//! Lanczos3 until it covers the target on both axes, then the overflow is
//! cropped evenly from both sides. Aspect ratio is never distorted and there
//! are no letterbox bars.
//!
//! ```text
//! mountain.jpg (6000x4000)
//!   ├─ 1920x1080 → scale to 1920x1280, crop 100px top and bottom
//!   └─ 1080x2400 → scale to 3600x2400, crop 1260px left and right
//! ```
//!
//! Two front ends share the same export step:
//!
//! - `wallgen generate`: a command that writes every size into a directory.
//! - `wallgen serve`: an upload page backed by a JSON endpoint.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolution`] | `WxH` tokens and comma-separated lists |
//! | [`imaging`] | Fill-and-crop plus JPEG/PNG encoding behind the [`imaging::ImageBackend`] trait |
//! | [`batch`] | One source, many resolutions, sequential, per-size failures reported |
//! | [`output`] | CLI output formatting for batch progress |
//! | [`config`] | `wallgen.toml` loading, stock defaults, validation |
//! | [`server`] | axum upload service |
//!
//! # Output Formats
//!
//! JPEG is written at the requested quality (1-100). PNG is lossless, so the
//! same quality knob instead picks the zlib effort:
//!
//! | Quality | PNG compression |
//! |---------|-----------------|
//! | 90-100 | none |
//! | 70-89 | fastest |
//! | 50-69 | default |
//! | below 50 | best |
//!
//! Files are always named `wallpaper_{W}x{H}.{jpg|png}`.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod resolution;
pub mod server;
