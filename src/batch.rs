//! Batch wallpaper generation from a single source image.
//!
//! This is the core of the `wallgen generate` command. Given a source image,
//! an output directory and a list of resolutions, it writes one wallpaper per
//! resolution:
//!
//! ```text
//! output/
//! ├── wallpaper_1366x768.jpg
//! ├── wallpaper_1920x1080.jpg
//! ├── wallpaper_2560x1440.jpg
//! ├── wallpaper_3840x2160.jpg
//! ├── wallpaper_1080x2400.jpg     # phone portrait, center-cropped
//! └── wallpaper_1440x3200.jpg
//! ```
//!
//! The source is decoded once. Resolutions are processed sequentially, in the
//! order given. A failed export does not stop the batch: it is reported as a
//! failed [`Outcome`] and the next resolution is attempted.
//!
//! Progress is reported through an optional channel of [`BatchEvent`]s so the
//! caller decides how (and whether) to print it.

use crate::imaging::{
    BackendError, ExportSettings, GeneratedWallpaper, ImageBackend, RustBackend, export_wallpaper,
};
use crate::resolution::Resolution;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Input file does not exist: {0}")]
    InputNotFound(PathBuf),
    #[error("No resolutions requested")]
    NoResolutions,
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to open image: {0}")]
    Open(#[source] BackendError),
}

/// Everything needed to run one batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub resolutions: Vec<Resolution>,
    pub settings: ExportSettings,
}

/// Result of exporting a single resolution.
#[derive(Debug)]
pub struct Outcome {
    pub resolution: Resolution,
    pub result: Result<GeneratedWallpaper, BackendError>,
}

/// Progress events emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent {
    /// The source image is about to be decoded.
    Loading { input: PathBuf },
    /// Export of `resolution` begins.
    Started { resolution: Resolution },
    /// Export of `resolution` finished, successfully or not.
    Finished {
        resolution: Resolution,
        /// `Ok(upscaled)` or the error message.
        status: Result<bool, String>,
    },
}

/// Summary of a completed batch.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &GeneratedWallpaper> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Run a batch with the production backend.
pub fn run(job: &BatchJob, events: Option<Sender<BatchEvent>>) -> Result<BatchReport, BatchError> {
    run_with_backend(&RustBackend::new(), job, events)
}

/// Run a batch using a specific backend (allows testing with mock).
pub fn run_with_backend<B: ImageBackend>(
    backend: &B,
    job: &BatchJob,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    let start = Instant::now();
    let emit = |event: BatchEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    };

    if !job.input.exists() {
        return Err(BatchError::InputNotFound(job.input.clone()));
    }
    if job.resolutions.is_empty() {
        return Err(BatchError::NoResolutions);
    }
    create_output_dir(&job.output_dir)?;

    emit(BatchEvent::Loading {
        input: job.input.clone(),
    });
    let image = backend.open(&job.input).map_err(BatchError::Open)?;

    let mut outcomes = Vec::with_capacity(job.resolutions.len());
    for &resolution in &job.resolutions {
        emit(BatchEvent::Started { resolution });

        let result = export_wallpaper(backend, &image, resolution, &job.output_dir, &job.settings);
        let status = match &result {
            Ok(generated) => Ok(generated.upscaled),
            Err(e) => {
                tracing::warn!(%resolution, error = %e, "export failed");
                Err(e.to_string())
            }
        };
        emit(BatchEvent::Finished { resolution, status });

        outcomes.push(Outcome { resolution, result });
    }

    Ok(BatchReport {
        outcomes,
        elapsed: start.elapsed(),
    })
}

fn create_output_dir(path: &Path) -> Result<(), BatchError> {
    std::fs::create_dir_all(path).map_err(|source| BatchError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}
