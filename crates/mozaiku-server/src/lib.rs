//! mozaiku-server: HTTP transformation endpoint.
//!
//! One POST route accepts a multipart image upload plus a pixelation
//! percentage, persists both the original and the pixelated output
//! under a per-request id, and reports the image dimensions back.
//! Stored outputs are served statically for download. CORS applies to
//! the `/api` routes only.

pub mod api;
pub mod storage;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use api::{ApiError, TransformationReply};
pub use storage::{ImageStore, StorageError};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Origin allowed by default when none is configured.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Per-request artifact storage.
    pub store: Arc<ImageStore>,
}

impl AppState {
    /// Wrap a store for sharing across handlers.
    #[must_use]
    pub fn new(store: ImageStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the application router.
///
/// - `POST /api/pixelate` — the transformation endpoint, behind CORS
///   for `allowed_origin` (credentials enabled, the usual method list)
///   and a body-size limit.
/// - `GET /images/...` — static downloads of stored artifacts.
#[must_use]
pub fn app(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ]);

    let api_routes = Router::new()
        .route("/pixelate", post(api::pixelate))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors);

    let downloads = ServeDir::new(state.store.root().to_path_buf());

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/images", downloads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
