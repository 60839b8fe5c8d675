//! Parameter types for image operations.
//!
//! These structs describe *what* to write, not *how*. They are the interface
//! between [`operations`](super::operations), which decides file names and
//! sizes, and the [`backend`](super::backend), which does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: Encoding quality (1–100, default 95). Clamped on construction.
//! - [`OutputFormat`]: JPEG or PNG, parsed from `jpg`/`jpeg`/`png`.
//! - [`PngCompression`]: PNG compression level bucketed from a quality score.
//! - [`ExportSettings`]: Format + quality shared by every wallpaper in a batch.
//! - [`ExportParams`]: Full specification for one export: output path, exact size, format, quality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Quality setting for image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported format: {0}")]
pub struct UnsupportedFormat(pub String);

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension used for generated files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = UnsupportedFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.extension().to_string()
    }
}

/// PNG compression level.
///
/// PNG is lossless, so "quality" trades file size against encode time:
/// a high score asks for a fast, large file, a low score for a slow, small one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    None,
    Fastest,
    Default,
    Best,
}

impl PngCompression {
    pub fn from_quality(quality: Quality) -> Self {
        match quality.value() {
            q if q >= 90 => PngCompression::None,
            q if q >= 70 => PngCompression::Fastest,
            q if q >= 50 => PngCompression::Default,
            _ => PngCompression::Best,
        }
    }
}

/// Format and quality applied to every wallpaper of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSettings {
    pub format: OutputFormat,
    pub quality: Quality,
}

/// Parameters for one fill-and-encode operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportParams {
    pub output: PathBuf,
    /// Exact output dimensions.
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub quality: Quality,
}
