use axum::extract::DefaultBodyLimit;
use common::storage::MediaKey;
use image::ImageFormat;
use sea_orm::{EntityTrait, Set};
use sha2::{Digest, Sha256};

use crate::entity::media;
use crate::error::AppError;
use crate::state::AppState;

/// Public reference prefix; references are `/static/images/<key>`.
pub const REFERENCE_PREFIX: &str = "/static/images/";

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(16 * 1024 * 1024) // 16 MB
}

/// An upload that decoded as a supported raster image.
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub ext: &'static str,
    pub content_type: &'static str,
    pub sha256: String,
}

/// Validate that a payload is a well-formed image.
///
/// The payload is decoded in full, not just format-sniffed: a truncated file
/// with an intact header must not pass. Extension and content type come from
/// the detected format; the client's filename and declared type are ignored.
pub fn validate_image(bytes: Vec<u8>) -> Result<ValidatedImage, AppError> {
    let format = image::guess_format(&bytes)
        .map_err(|_| AppError::Validation("Upload is not a supported image".into()))?;

    let (ext, content_type) = match format {
        ImageFormat::Png => ("png", "image/png"),
        ImageFormat::Jpeg => ("jpg", "image/jpeg"),
        ImageFormat::Gif => ("gif", "image/gif"),
        ImageFormat::WebP => ("webp", "image/webp"),
        ImageFormat::Bmp => ("bmp", "image/bmp"),
        other => {
            return Err(AppError::Validation(format!(
                "Unsupported image format: {other:?}"
            )));
        }
    };

    image::load_from_memory_with_format(&bytes, format)
        .map_err(|_| AppError::Validation("Upload is not a valid image".into()))?;

    let sha256 = hex::encode(Sha256::digest(&bytes));

    Ok(ValidatedImage {
        bytes,
        ext,
        content_type,
        sha256,
    })
}

/// Persist a validated image and return its public reference.
///
/// The payload is written first, then the metadata row; if the row insert
/// fails the file is removed again so serving state never references a
/// half-stored asset.
pub async fn store_image(state: &AppState, image: ValidatedImage) -> Result<String, AppError> {
    let key = MediaKey::generate(image.ext)?;

    state.media.put(&key, &image.bytes).await?;

    let row = media::ActiveModel {
        key: Set(key.as_filename()),
        content_type: Set(image.content_type.to_string()),
        size: Set(image.bytes.len() as i64),
        sha256: Set(image.sha256),
        created_at: Set(chrono::Utc::now()),
    };

    if let Err(e) = media::Entity::insert(row)
        .exec_without_returning(&state.db)
        .await
    {
        if let Err(del) = state.media.delete(&key).await {
            tracing::warn!(%key, error = %del, "Failed to remove media file after row insert failure");
        }
        return Err(e.into());
    }

    Ok(format!("{REFERENCE_PREFIX}{key}"))
}

/// Parse a public reference back into its media key.
pub fn parse_reference(reference: &str) -> Option<MediaKey> {
    reference.strip_prefix(REFERENCE_PREFIX)?.parse().ok()
}

/// Best-effort removal of a stored asset by reference.
///
/// Unknown references and already-missing assets are a logged no-op; failures
/// are logged and swallowed. Image cleanup must never fail the entity
/// mutation that triggered it.
pub async fn delete_image(state: &AppState, reference: &str) {
    let Some(key) = parse_reference(reference) else {
        tracing::warn!(reference, "Ignoring unparseable media reference during cleanup");
        return;
    };

    match media::Entity::delete_by_id(key.as_filename())
        .exec(&state.db)
        .await
    {
        Ok(res) if res.rows_affected == 0 => {
            tracing::warn!(%key, "Media row already absent during cleanup");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(%key, error = %e, "Failed to delete media row during cleanup");
        }
    }

    match state.media.delete(&key).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(%key, "Media file already absent during cleanup"),
        Err(e) => tracing::warn!(%key, error = %e, "Failed to delete media file during cleanup"),
    }
}
