use axum::Json;
use axum::extract::{Path, State};
use common::i18n::I18nStore;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::i18n::I18nUpdateResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "I18n",
    operation_id = "listLanguages",
    summary = "List available language codes",
    responses(
        (status = 200, description = "Sorted language codes", body = [String]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_languages(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let store = I18nStore::new(state.config.i18n.dir.clone());
    Ok(Json(store.languages().await?))
}

#[utoipa::path(
    get,
    path = "/{code}",
    tag = "I18n",
    operation_id = "getLanguage",
    summary = "Get the full translation map for a language",
    params(("code" = String, Path, description = "Language code, e.g. `en`")),
    responses(
        (status = 200, description = "Key-value translation map"),
        (status = 404, description = "Language not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(code))]
pub async fn get_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let store = I18nStore::new(state.config.i18n.dir.clone());
    let translations = store
        .get(&code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Language '{code}' not found")))?;
    Ok(Json(translations))
}

#[utoipa::path(
    put,
    path = "/{code}",
    tag = "I18n",
    operation_id = "updateLanguage",
    summary = "Merge keys into a language file",
    description = "Merges the posted keys into the existing map (creating the language if new) \
        and persists the result. Keys not present in the payload are preserved.",
    params(("code" = String, Path, description = "Language code, e.g. `en`")),
    request_body(content_type = "application/json", description = "Keys to merge"),
    responses(
        (status = 200, description = "Merged translation map", body = I18nUpdateResponse),
        (status = 400, description = "Invalid language code (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(code))]
pub async fn update_language(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
    AppJson(payload): AppJson<Map<String, Value>>,
) -> Result<Json<I18nUpdateResponse>, AppError> {
    let store = I18nStore::new(state.config.i18n.dir.clone());
    let data = store.merge(&code, payload).await?;

    Ok(Json(I18nUpdateResponse {
        message: format!("Language '{code}' updated successfully"),
        data,
    }))
}
