use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::{MediaKey, StorageError};
use sea_orm::EntityTrait;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::entity::media;
use crate::error::AppError;
use crate::state::AppState;

/// Serve a stored image by key, `GET /static/images/{key}`.
///
/// The media row is the source of truth: an unknown key is a 404 before the
/// filesystem is touched. Responses carry the recorded content type and a
/// sha256 ETag honoring `If-None-Match`.
#[instrument(skip(state, headers), fields(key))]
pub async fn serve_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key: MediaKey = key
        .parse()
        .map_err(|_| AppError::NotFound("Asset not found".into()))?;

    let row = media::Entity::find_by_id(key.as_filename())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".into()))?;

    let etag_value = format!("\"{}\"", row.sha256);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.media.get_stream(&key).await.map_err(|e| match e {
        StorageError::NotFound(_) => {
            tracing::warn!(%key, "Media row exists but the file is missing");
            AppError::NotFound("Asset not found".into())
        }
        other => AppError::from(other),
    })?;
    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, row.content_type)
        .header(header::CONTENT_LENGTH, row.size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}
