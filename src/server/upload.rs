//! `POST /upload`: multipart image in, JSON list of wallpaper links out.
//!
//! Form fields:
//! - `image` (required): the source image file.
//! - `resolutions` (optional): comma-separated `WxH` list; the configured
//!   defaults are used when it is missing or empty.
//!
//! Response:
//!
//! ```json
//! {"success": true, "images": [{"res": "1920x1080", "url": "/static/generated/1718.../wallpaper_1920x1080.jpg"}]}
//! ```
//!
//! Resolutions whose export fails are left out of `images`.

use super::{GENERATED_URL_PREFIX, SharedState};
use crate::imaging::{
    BackendError, ExportSettings, GeneratedWallpaper, ImageBackend, RustBackend, export_wallpaper,
};
use crate::resolution::{Resolution, ResolutionError, parse_resolutions};
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("upload exceeds the size limit")]
    TooLarge,
    #[error("malformed multipart body: {0}")]
    Multipart(String),
    #[error("no image field in upload")]
    MissingImage,
    #[error("invalid resolutions: {0}")]
    InvalidResolutions(#[from] ResolutionError),
    #[error("failed to save upload: {0}")]
    Save(#[source] std::io::Error),
    #[error("failed to create output folder: {0}")]
    OutputDir(#[source] std::io::Error),
    #[error("failed to open image: {0}")]
    Open(#[source] BackendError),
    #[error("worker failed: {0}")]
    Worker(String),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Multipart(err.body_text())
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            UploadError::TooLarge => (StatusCode::BAD_REQUEST, "File too large"),
            UploadError::Multipart(_) => (StatusCode::BAD_REQUEST, "Malformed upload"),
            UploadError::MissingImage => (StatusCode::BAD_REQUEST, "Failed to retrieve file"),
            UploadError::InvalidResolutions(_) => (StatusCode::BAD_REQUEST, "Invalid resolutions"),
            UploadError::Save(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save file"),
            UploadError::OutputDir(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create output folder",
            ),
            UploadError::Open(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to open image"),
            UploadError::Worker(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Processing failed"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "upload failed");
        } else {
            tracing::info!(error = %self, "upload rejected");
        }
        (status, message).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageLink {
    pub res: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub success: bool,
    pub images: Vec<ImageLink>,
}

/// Fields pulled out of the multipart body.
struct UploadForm {
    file_name: String,
    data: Bytes,
    resolutions: String,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, UploadError> {
    let mut image = None;
    let mut resolutions = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // Only a file part counts as the image; a plain text `image` field is ignored.
            Some("image") => {
                let Some(file_name) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let data = field.bytes().await?;
                image = Some((file_name, data));
            }
            Some("resolutions") => resolutions = field.text().await?,
            _ => {}
        }
    }

    let (file_name, data) = image.ok_or(UploadError::MissingImage)?;
    Ok(UploadForm {
        file_name,
        data,
        resolutions,
    })
}

/// Final path component of a client-supplied file name.
///
/// Browsers send bare names, but nothing stops a client from sending
/// `../../etc/passwd`.
fn safe_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "upload".to_string())
}

fn since_epoch() -> std::time::Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// Requested resolutions, falling back to `defaults` when none are named.
fn requested_resolutions(
    raw: &str,
    defaults: &[Resolution],
) -> Result<Vec<Resolution>, ResolutionError> {
    let parsed = parse_resolutions(raw)?;
    if parsed.is_empty() {
        Ok(defaults.to_vec())
    } else {
        Ok(parsed)
    }
}

/// Decode `source` and export every resolution into `output_dir`.
///
/// Failed exports are logged and skipped.
pub(crate) fn render_wallpapers<B: ImageBackend>(
    backend: &B,
    source: &Path,
    output_dir: &Path,
    resolutions: &[Resolution],
    settings: &ExportSettings,
) -> Result<Vec<GeneratedWallpaper>, UploadError> {
    std::fs::create_dir_all(output_dir).map_err(UploadError::OutputDir)?;
    let image = backend.open(source).map_err(UploadError::Open)?;

    let mut generated = Vec::with_capacity(resolutions.len());
    for &resolution in resolutions {
        match export_wallpaper(backend, &image, resolution, output_dir, settings) {
            Ok(wallpaper) => generated.push(wallpaper),
            Err(e) => tracing::warn!(%resolution, error = %e, "skipping resolution"),
        }
    }
    Ok(generated)
}

pub async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let form = read_form(&mut multipart).await?;
    let resolutions = requested_resolutions(&form.resolutions, &state.default_resolutions)?;

    let now = since_epoch();
    let request_id = now.as_nanos().to_string();
    // Same-second uploads of the same name must not share a file.
    let stored_name = format!(
        "{}_{}_{}",
        now.as_secs(),
        request_id,
        safe_file_name(&form.file_name)
    );
    let source: PathBuf = state.server.upload_dir.join(stored_name);
    tokio::fs::write(&source, &form.data)
        .await
        .map_err(UploadError::Save)?;

    let output_dir = state.server.generated_dir.join(&request_id);
    tracing::info!(
        upload = %source.display(),
        bytes = form.data.len(),
        resolutions = resolutions.len(),
        %request_id,
        "processing upload"
    );

    let settings = state.settings;
    let generated = tokio::task::spawn_blocking(move || {
        render_wallpapers(
            &RustBackend::new(),
            &source,
            &output_dir,
            &resolutions,
            &settings,
        )
    })
    .await
    .map_err(|e| UploadError::Worker(e.to_string()))??;

    let images = generated
        .iter()
        .filter_map(|w| {
            let file_name = w.path.file_name()?.to_string_lossy();
            Some(ImageLink {
                res: w.resolution.to_string(),
                url: format!("{GENERATED_URL_PREFIX}/{request_id}/{file_name}"),
            })
        })
        .collect();

    Ok(Json(UploadResponse {
        success: true,
        images,
    }))
}
