//! The transformation endpoint: `POST /api/pixelate`.
//!
//! Accepts one multipart request with a binary `file` field and a
//! string `pixelSize` field, then runs save -> pixelate -> save and
//! reports the source dimensions. Failure reporting is deliberately
//! coarse: a failed input save gets its own message, everything else
//! collapses into one generic parse error, with the real cause only
//! in the logs.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use mozaiku_pipeline::Percentage;

use crate::AppState;
use crate::storage::{ImageStore, StorageError};

/// Multipart field carrying the image bytes.
const FILE_FIELD: &str = "file";

/// Multipart field carrying the string-encoded percentage.
const PIXEL_SIZE_FIELD: &str = "pixelSize";

/// Success reply for a transformation request.
#[derive(Debug, Clone, Serialize)]
pub struct TransformationReply {
    /// Source image width; pixelation never changes it.
    pub width: u32,
    /// Source image height; pixelation never changes it.
    pub height: u32,
    /// Fixed success indicator, kept for form compatibility.
    pub message: String,
    /// Request id namespacing the stored artifacts.
    pub id: String,
    /// URL path where the pixelated output can be downloaded.
    pub download: String,
}

/// Endpoint failures, collapsed to the two client-visible cases.
///
/// Both respond `400`; the distinction is carried by the body text
/// alone (`message` for a failed input save, `error` for everything
/// else).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The uploaded bytes could not be persisted.
    #[error("could not save uploaded file: {0}")]
    Storage(#[from] StorageError),

    /// Anything else: missing fields, a bad percentage, an
    /// undecodable image, or a failed output write.
    #[error("failed to parse request body")]
    ParseRequest,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Storage(_) => json!({ "message": "Could not save file" }),
            Self::ParseRequest => json!({ "error": "Failed to parse request body" }),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Handle one transformation request.
///
/// 1. Pull `file` and `pixelSize` out of the multipart body.
/// 2. Persist the uploaded bytes under a fresh request id.
/// 3. Re-read them, pixelate, persist the output.
/// 4. Reply with the source dimensions and the download path.
///
/// # Errors
///
/// [`ApiError::Storage`] when step 2 fails; [`ApiError::ParseRequest`]
/// for every other failure.
pub async fn pixelate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TransformationReply>, ApiError> {
    let mut file_bytes = None;
    let mut pixel_size = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::ParseRequest)?
    {
        match field.name() {
            Some(FILE_FIELD) => {
                file_bytes = Some(field.bytes().await.map_err(|_| ApiError::ParseRequest)?);
            }
            Some(PIXEL_SIZE_FIELD) => {
                pixel_size = Some(field.text().await.map_err(|_| ApiError::ParseRequest)?);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or(ApiError::ParseRequest)?;
    let raw_percentage = pixel_size.ok_or(ApiError::ParseRequest)?;

    let id = ImageStore::new_request_id();

    match state.store.save_original(&id, &bytes).await {
        Ok(path) => info!(%id, path = %path.display(), "image saved"),
        Err(e) => {
            warn!(%id, error = %e, "image could not be saved");
            return Err(e.into());
        }
    }

    // Validated only now: the original endpoint saved first and let a
    // bad percentage fall into its catch-all afterwards.
    let percentage = Percentage::parse(&raw_percentage).map_err(|e| {
        warn!(%id, raw = %raw_percentage, error = %e, "invalid pixelSize field");
        ApiError::ParseRequest
    })?;

    let saved = state.store.read_original(&id).await.map_err(|e| {
        warn!(%id, error = %e, "could not read back saved image");
        ApiError::ParseRequest
    })?;

    // Decode + resample is CPU-bound; keep it off the async workers.
    let pixelated = tokio::task::spawn_blocking(move || {
        mozaiku_pipeline::pixelate(&saved, percentage)
    })
    .await
    .map_err(|e| {
        warn!(%id, error = %e, "pixelation task panicked or was cancelled");
        ApiError::ParseRequest
    })?
    .map_err(|e| {
        warn!(%id, error = %e, "pixelation failed");
        ApiError::ParseRequest
    })?;

    state
        .store
        .save_pixelated(&id, &pixelated.png)
        .await
        .map_err(|e| {
            warn!(%id, error = %e, "could not save pixelated output");
            ApiError::ParseRequest
        })?;

    let dimensions = pixelated.dimensions;
    info!(
        %id,
        width = dimensions.width,
        height = dimensions.height,
        percentage = percentage.get(),
        "pixelation done"
    );

    Ok(Json(TransformationReply {
        width: dimensions.width,
        height: dimensions.height,
        message: "Success!".to_string(),
        download: ImageStore::download_path(&id),
        id,
    }))
}
