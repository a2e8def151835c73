use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{project_technology, technology};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::shared::{ListQuery, validate_text};
use crate::models::technology::TechnologyResponse;
use crate::state::AppState;
use crate::utils::multipart::FormData;

#[utoipa::path(
    post,
    path = "/",
    tag = "Technologies",
    operation_id = "createTechnology",
    summary = "Create a technology",
    description = "Multipart form with a `name` field and an `icon` image file. The icon is \
        decoded in full before anything is written; the stored reference is derived from the \
        detected format, not the uploaded filename.",
    request_body(content_type = "multipart/form-data", description = "name + icon file"),
    responses(
        (status = 201, description = "Technology created", body = TechnologyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_technology(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let name = form.require_text("name")?.trim().to_string();
    validate_text(&name, "Name")?;

    let icon = form.require_file("icon")?;
    let validated = media::validate_image(icon.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let now = chrono::Utc::now();
    let new_technology = technology::ActiveModel {
        name: Set(name),
        icon: Set(reference.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_technology.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict("A technology with this name already exists".into())
                }
                _ => e.into(),
            });
        }
    };

    Ok((StatusCode::CREATED, Json(TechnologyResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Technologies",
    operation_id = "listTechnologies",
    summary = "List technologies",
    params(ListQuery),
    responses(
        (status = 200, description = "Technologies in insertion order", body = [TechnologyResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_technologies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TechnologyResponse>>, AppError> {
    let (skip, limit) = query.window();

    let data = technology::Entity::find()
        .order_by_asc(technology::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(TechnologyResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Technologies",
    operation_id = "getTechnology",
    summary = "Get a technology by ID",
    params(("id" = i32, Path, description = "Technology ID")),
    responses(
        (status = 200, description = "Technology details", body = TechnologyResponse),
        (status = 404, description = "Technology not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_technology(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TechnologyResponse>, AppError> {
    let model = find_technology(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Technologies",
    operation_id = "updateTechnology",
    summary = "Update a technology",
    description = "Partial update: only submitted form fields change. A new `icon` file replaces \
        the stored one; the old asset is removed only after the row points at the new one.",
    params(("id" = i32, Path, description = "Technology ID")),
    request_body(content_type = "multipart/form-data", description = "Optional name and icon file"),
    responses(
        (status = 200, description = "Technology updated", body = TechnologyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Technology not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_technology(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<TechnologyResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_technology(&state.db, id).await?;
    let old_icon = existing.icon.clone();
    let mut active: technology::ActiveModel = existing.into();

    if let Some(name) = form.text("name") {
        let name = name.trim().to_string();
        validate_text(&name, "Name")?;
        active.name = Set(name);
    }

    // Store the new icon before touching the row: the entity must never
    // point at an asset that failed to persist.
    let new_icon = match form.file("icon") {
        Some(file) => {
            let validated = media::validate_image(file.bytes.clone())?;
            Some(media::store_image(&state, validated).await?)
        }
        None => None,
    };
    if let Some(ref reference) = new_icon {
        active.icon = Set(reference.clone());
    }

    active.updated_at = Set(chrono::Utc::now());

    let model = match active.update(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(reference) = new_icon {
                media::delete_image(&state, &reference).await;
            }
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict("A technology with this name already exists".into())
                }
                _ => e.into(),
            });
        }
    };

    if new_icon.is_some() {
        media::delete_image(&state, &old_icon).await;
    }

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Technologies",
    operation_id = "deleteTechnology",
    summary = "Delete a technology",
    description = "Removes the technology and its project links, then deletes its icon asset \
        best-effort.",
    params(("id" = i32, Path, description = "Technology ID")),
    responses(
        (status = 204, description = "Technology deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Technology not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_technology(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_technology(&state.db, id).await?;
    let icon = existing.icon.clone();

    let txn = state.db.begin().await?;
    project_technology::Entity::delete_many()
        .filter(project_technology::Column::TechnologyId.eq(id))
        .exec(&txn)
        .await?;
    technology::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    media::delete_image(&state, &icon).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_technology<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<technology::Model, AppError> {
    technology::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Technology not found".into()))
}
