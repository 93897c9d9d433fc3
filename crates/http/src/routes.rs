//! Router and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use photobooth_common::config::normalize_prefix;
use photobooth_render_engine::qr::encode_qr_png;
use photobooth_render_engine::Selection;
use photobooth_session_store::SessionId;

use crate::error::ApiError;
use crate::payload::{
    decode_image_data, download_redirect, ListPhotosResponse, QrQuery, SavePhotoRequest,
    SavePhotoResponse, SaveSelectionRequest, SaveSelectionResponse, SessionResponse,
};
use crate::AppState;

/// Upper bound on request bodies. Base64 captures from a browser canvas
/// routinely exceed axum's 2 MiB default.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the API router, including static routes for stored images.
pub fn create_router(state: AppState) -> Router {
    let storage = &state.config.storage;
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/session", post(create_session))
        .route("/save_photo", post(save_photo))
        .route("/list_photos/{session_id}", get(list_photos))
        .route("/save_selection", post(save_selection))
        .route("/generate_qr", get(generate_qr));

    for (prefix, dir) in [
        (&storage.raw_url_prefix, storage.raw_dir()),
        (&storage.composite_url_prefix, storage.composite_dir()),
    ] {
        let prefix = normalize_prefix(prefix);
        if prefix.is_empty() {
            warn!(dir = %dir.display(), "Empty URL prefix, directory not served");
            continue;
        }
        router = router.nest_service(&prefix, ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_session(raw: Option<String>) -> Result<SessionId, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::invalid("Missing session id"))?;
    Ok(SessionId::parse(raw)?)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|e| ApiError::invalid(format!("Invalid request body: {}", e.body_text())))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "status": "healthy",
        "service": "photobooth"
    }))
}

/// Issue a fresh session id. Nothing is created on disk until the first
/// capture arrives.
async fn create_session() -> Json<SessionResponse> {
    let session_id = uuid::Uuid::new_v4().simple().to_string();
    info!(session = %session_id, "Session issued");
    Json(SessionResponse {
        success: true,
        session_id,
    })
}

#[instrument(skip_all)]
async fn save_photo(
    State(state): State<AppState>,
    body: Result<Json<SavePhotoRequest>, JsonRejection>,
) -> Result<Json<SavePhotoResponse>, ApiError> {
    let req = json_body(body)?;
    let session = parse_session(req.session_id)?;
    let index = req
        .index
        .ok_or_else(|| ApiError::invalid("Missing photo index"))?;
    let data = req
        .image_data
        .ok_or_else(|| ApiError::invalid("Missing image data"))?;
    let bytes = decode_image_data(&data)?;

    let exporter = state.exporter.clone();
    let filename = tokio::task::spawn_blocking(move || {
        exporter.session_store().save_photo(&session, index, &bytes)
    })
    .await??;

    Ok(Json(SavePhotoResponse {
        success: true,
        filename,
    }))
}

#[instrument(skip(state))]
async fn list_photos(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ListPhotosResponse>, ApiError> {
    let session = SessionId::parse(session_id)?;
    let listing = state.exporter.session_store().list_photos(&session)?;

    if !listing.session_found {
        return Ok(Json(ListPhotosResponse {
            success: false,
            photos: vec![],
            message: Some("Session not found".to_string()),
        }));
    }
    Ok(Json(ListPhotosResponse {
        success: true,
        photos: listing.photos,
        message: None,
    }))
}

#[instrument(skip_all)]
async fn save_selection(
    State(state): State<AppState>,
    body: Result<Json<SaveSelectionRequest>, JsonRejection>,
) -> Result<Json<SaveSelectionResponse>, ApiError> {
    let req = json_body(body)?;
    let session = parse_session(req.session_id)?;
    let selection = Selection::new(
        req.selected_photos.unwrap_or_default(),
        req.frame_file.unwrap_or_default(),
    );

    let exporter = state.exporter.clone();
    let artifact =
        tokio::task::spawn_blocking(move || exporter.compose_and_store(&session, &selection))
            .await??;

    let redirect_url = download_redirect(&artifact.public_url)
        .map_err(|e| ApiError::Internal(format!("failed to build redirect: {e}")))?;

    Ok(Json(SaveSelectionResponse {
        success: true,
        public_url: artifact.public_url,
        redirect_url,
    }))
}

async fn generate_qr(Query(query): Query<QrQuery>) -> Result<impl IntoResponse, ApiError> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::invalid("URL parameter missing"))?;
    let png = encode_qr_png(&url)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}
