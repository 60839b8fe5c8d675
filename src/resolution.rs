//! Parsing of target resolution lists.
//!
//! Resolutions are given as a comma-separated list of `WxH` tokens, the same
//! shape on the command line (`--res`), in `wallgen.toml` and in the upload
//! form:
//!
//! - `"1920x1080,1366x768"` → `[1920x1080, 1366x768]`
//! - `" 1920 x 1080 , "` → `[1920x1080]` (whitespace trimmed, empty tokens skipped)
//! - `""` → `[]`
//! - `"1920X1080"` → error (the separator is a lowercase `x`)
//! - `"0x1080"` → error (zero-sized output)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resolutions generated when none are requested.
pub const DEFAULT_RESOLUTIONS: &str =
    "1366x768,1920x1080,2560x1440,3840x2160,1080x2400,1440x3200";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("invalid resolution format: {0}")]
    InvalidFormat(String),
    #[error("invalid width in resolution {0}")]
    InvalidWidth(String),
    #[error("invalid height in resolution {0}")]
    InvalidHeight(String),
    #[error("resolution {0} has a zero dimension")]
    ZeroDimension(String),
}

/// A target output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let mut dims = token.split('x');
        let (Some(w), Some(h), None) = (dims.next(), dims.next(), dims.next()) else {
            return Err(ResolutionError::InvalidFormat(token.to_string()));
        };

        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ResolutionError::InvalidWidth(token.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ResolutionError::InvalidHeight(token.to_string()))?;

        if width == 0 || height == 0 {
            return Err(ResolutionError::ZeroDimension(token.to_string()));
        }
        Ok(Self { width, height })
    }
}

/// Parse a comma-separated list of `WxH` tokens.
///
/// Order and duplicates are preserved. The first malformed token aborts the
/// whole parse.
pub fn parse_resolutions(input: &str) -> Result<Vec<Resolution>, ResolutionError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// The stock resolution list: common desktop sizes plus two phone portraits.
pub fn default_resolutions() -> Vec<Resolution> {
    parse_resolutions(DEFAULT_RESOLUTIONS).unwrap_or_default()
}
