//! Configuration loaded from `wallgen.toml`.
//!
//! Every setting has a stock default, so the file is optional and sparse:
//! override just the values you want. Command-line flags override the file.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! resolutions = "1366x768,1920x1080,2560x1440,3840x2160,1080x2400,1440x3200"
//!
//! [output]
//! dir = "output"            # Where `wallgen generate` writes wallpapers
//! format = "jpg"            # jpg or png
//! quality = 95              # 0-100; for PNG this picks the compression level
//!
//! [server]
//! port = 8080
//! upload_dir = "uploads"
//! generated_dir = "web/static/generated"
//! max_upload_bytes = 10485760
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{ExportSettings, OutputFormat, Quality};
use crate::resolution::{DEFAULT_RESOLUTIONS, Resolution, ResolutionError, parse_resolutions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "wallgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallgenConfig {
    /// Comma-separated `WxH` list generated when none is requested.
    pub resolutions: String,
    /// Encoding and destination of generated wallpapers.
    pub output: OutputConfig,
    /// Upload service settings.
    pub server: ServerConfig,
}

impl Default for WallgenConfig {
    fn default() -> Self {
        Self {
            resolutions: DEFAULT_RESOLUTIONS.to_string(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl WallgenConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 0-100".into(),
            ));
        }
        let resolutions = self
            .resolution_list()
            .map_err(|e| ConfigError::Validation(format!("resolutions: {e}")))?;
        if resolutions.is_empty() {
            return Err(ConfigError::Validation(
                "resolutions must not be empty".into(),
            ));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_upload_bytes must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The configured default resolutions, parsed.
    pub fn resolution_list(&self) -> Result<Vec<Resolution>, ResolutionError> {
        parse_resolutions(&self.resolutions)
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            format: self.output.format,
            quality: Quality::new(self.output.quality),
        }
    }
}

/// Wallpaper encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory for the `generate` command.
    pub dir: PathBuf,
    /// `jpg` or `png`.
    pub format: OutputFormat,
    /// Encoding quality (0 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            format: OutputFormat::Jpeg,
            quality: 95,
        }
    }
}

/// Upload service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
    /// Where uploaded source images are stored.
    pub upload_dir: PathBuf,
    /// Root of per-request output folders, served under `/static/generated/`.
    pub generated_dir: PathBuf,
    /// Upper bound for an upload request body.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            generated_dir: PathBuf::from("web/static/generated"),
            max_upload_bytes: 10 << 20,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(WallgenConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load the config file at `path`, merged over stock defaults.
///
/// A missing file yields the defaults. Invalid TOML, unknown keys and
/// out-of-range values are errors.
pub fn load_config(path: &Path) -> Result<WallgenConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: WallgenConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `wallgen.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# WallGen Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
# Unknown keys will cause an error.

# Resolutions generated when none are requested, as comma-separated WxH.
resolutions = "1366x768,1920x1080,2560x1440,3840x2160,1080x2400,1440x3200"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Directory `wallgen generate` writes into. Created if missing.
dir = "output"

# jpg or png.
format = "jpg"

# 0-100. For JPEG this is the encoder quality.
# For PNG it selects the compression level:
#   >= 90 none, >= 70 fastest, >= 50 default, below 50 best.
quality = 95

# ---------------------------------------------------------------------------
# Upload service (`wallgen serve`)
# ---------------------------------------------------------------------------
[server]
# Listen port. The PORT environment variable takes precedence.
port = 8080

# Uploaded source images are kept here as <unix-seconds>_<file name>.
upload_dir = "uploads"

# Each upload gets its own folder here, served under /static/generated/.
generated_dir = "web/static/generated"

# Largest accepted upload request, in bytes (10 MiB).
max_upload_bytes = 10485760
"##
}
