//! Upload service: `wallgen serve`.
//!
//! A small axum application around the same export step the CLI uses.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | Upload page (maud) |
//! | `GET /static/js/script.js` | Page script, embedded in the binary |
//! | `GET /static/generated/{id}/{file}` | Generated wallpapers (`ServeDir`) |
//! | `POST /upload` | Multipart upload → JSON list of wallpaper links |
//! | `GET /healthz` | Liveness probe |
//!
//! Each upload gets its own folder under `generated_dir`, named by the
//! request's nanosecond timestamp, so concurrent users never overwrite each
//! other's files.

mod handlers;
mod page;
mod upload;

use crate::config::{ServerConfig, WallgenConfig};
use crate::imaging::ExportSettings;
use crate::resolution::{Resolution, ResolutionError};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{self, TraceLayer};

pub use upload::{ImageLink, UploadError, UploadResponse};

/// URL prefix under which `generated_dir` is served.
pub const GENERATED_URL_PREFIX: &str = "/static/generated";

/// Immutable state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub server: ServerConfig,
    /// Used when an upload does not name any resolutions.
    pub default_resolutions: Vec<Resolution>,
    pub settings: ExportSettings,
}

impl AppState {
    pub fn from_config(config: &WallgenConfig) -> Result<Self, ResolutionError> {
        Ok(Self {
            server: config.server.clone(),
            default_resolutions: config.resolution_list()?,
            settings: config.export_settings(),
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    Router::new()
        .route("/", get(handlers::index))
        .route("/static/js/script.js", get(handlers::script))
        .route("/upload", post(upload::upload))
        .route("/healthz", get(handlers::healthz))
        .nest_service(
            GENERATED_URL_PREFIX,
            ServeDir::new(&state.server.generated_dir),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(state.server.max_upload_bytes))
        .layer(trace_layer)
        .with_state(state)
}

/// Create the working directories and serve until the process is stopped.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    tokio::fs::create_dir_all(&state.server.upload_dir).await?;
    tokio::fs::create_dir_all(&state.server.generated_dir).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], state.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started at http://localhost:{}", state.server.port);

    axum::serve(listener, router(Arc::new(state))).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::ServerConfig;
    use std::path::Path;

    /// State rooted in `root`, with small defaults so tests stay fast.
    pub fn state_in(root: &Path) -> SharedState {
        let server = ServerConfig {
            upload_dir: root.join("uploads"),
            generated_dir: root.join("generated"),
            max_upload_bytes: 1 << 20,
            ..ServerConfig::default()
        };
        std::fs::create_dir_all(&server.upload_dir).unwrap();
        std::fs::create_dir_all(&server.generated_dir).unwrap();
        Arc::new(AppState {
            server,
            default_resolutions: vec![Resolution::new(32, 18), Resolution::new(18, 32)],
            settings: ExportSettings::default(),
        })
    }
}
