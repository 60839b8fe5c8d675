//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations a wallpaper run
//! needs: decode the source once, report its dimensions, and export one
//! filled, cropped and encoded wallpaper.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::ExportParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// The decoded image type is backend-specific so a source is decoded once and
/// reused for every target resolution.
pub trait ImageBackend: Sync {
    type Image: Send + Sync;

    /// Decode a source image from disk.
    fn open(&self, path: &Path) -> Result<Self::Image, BackendError>;

    /// Dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Fill-resize, center-crop to exactly `params.width x params.height`,
    /// encode and write to `params.output`.
    fn export(&self, image: &Self::Image, params: &ExportParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{OutputFormat, Quality};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Mock backend that records operations without touching pixels.
    ///
    /// `open` yields the configured source dimensions. Exports whose output
    /// file name is listed in `fail_outputs` return an encode error.
    #[derive(Default)]
    pub struct MockBackend {
        pub source: Option<Dimensions>,
        pub fail_outputs: HashSet<String>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Open(String),
        Export {
            output: String,
            width: u32,
            height: u32,
            format: OutputFormat,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_source(width: u32, height: u32) -> Self {
            Self {
                source: Some(Dimensions { width, height }),
                ..Self::default()
            }
        }

        pub fn failing_on(mut self, file_name: &str) -> Self {
            self.fail_outputs.insert(file_name.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        type Image = Dimensions;

        fn open(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Open(path.to_string_lossy().to_string()));

            self.source.ok_or_else(|| BackendError::Decode {
                path: path.display().to_string(),
                reason: "no mock source".to_string(),
            })
        }

        fn dimensions(&self, image: &Dimensions) -> Dimensions {
            *image
        }

        fn export(&self, _image: &Dimensions, params: &ExportParams) -> Result<(), BackendError> {
            let output = params.output.to_string_lossy().to_string();
            self.operations.lock().unwrap().push(RecordedOp::Export {
                output: output.clone(),
                width: params.width,
                height: params.height,
                format: params.format,
                quality: params.quality.value(),
            });

            let file_name = params
                .output
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.fail_outputs.contains(&file_name) {
                return Err(BackendError::Encode {
                    path: output,
                    reason: "mock failure".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_open() {
        let backend = MockBackend::with_source(3840, 2160);

        let image = backend.open(Path::new("/test/source.jpg")).unwrap();
        assert_eq!(backend.dimensions(&image).as_tuple(), (3840, 2160));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Open(p) if p == "/test/source.jpg"));
    }

    #[test]
    fn mock_open_without_source_errors() {
        let backend = MockBackend::new();
        let result = backend.open(Path::new("/missing.jpg"));
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn mock_records_export() {
        let backend = MockBackend::with_source(100, 100);
        let image = backend.open(Path::new("/s.png")).unwrap();

        backend
            .export(
                &image,
                &ExportParams {
                    output: "/out/wallpaper_50x20.png".into(),
                    width: 50,
                    height: 20,
                    format: OutputFormat::Png,
                    quality: Quality::new(60),
                },
            )
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[1],
            RecordedOp::Export {
                width: 50,
                height: 20,
                format: OutputFormat::Png,
                quality: 60,
                ..
            }
        ));
    }

    #[test]
    fn mock_fails_configured_outputs() {
        let backend = MockBackend::with_source(100, 100).failing_on("wallpaper_1x1.jpg");
        let image = backend.open(Path::new("/s.jpg")).unwrap();
        let result = backend.export(
            &image,
            &ExportParams {
                output: "/out/wallpaper_1x1.jpg".into(),
                width: 1,
                height: 1,
                format: OutputFormat::Jpeg,
                quality: Quality::default(),
            },
        );
        assert!(matches!(result, Err(BackendError::Encode { .. })));
    }
}
