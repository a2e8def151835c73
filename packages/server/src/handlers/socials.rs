use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::social;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::shared::{ListQuery, validate_link, validate_text};
use crate::models::social::SocialResponse;
use crate::state::AppState;
use crate::utils::multipart::FormData;

#[utoipa::path(
    post,
    path = "/",
    tag = "Socials",
    operation_id = "createSocial",
    summary = "Create a social link",
    description = "Multipart form: `name`, `link`, and an `image` file.",
    request_body(content_type = "multipart/form-data", description = "name + link + image file"),
    responses(
        (status = 201, description = "Social link created", body = SocialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_social(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let name = form.require_text("name")?.trim().to_string();
    validate_text(&name, "Name")?;
    let link = form.require_text("link")?.trim().to_string();
    validate_link(&link, "link")?;

    let image = form.require_file("image")?;
    let validated = media::validate_image(image.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let now = chrono::Utc::now();
    let new_social = social::ActiveModel {
        name: Set(name),
        link: Set(link),
        image: Set(reference.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_social.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(SocialResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Socials",
    operation_id = "listSocials",
    summary = "List social links",
    params(ListQuery),
    responses(
        (status = 200, description = "Social links in insertion order", body = [SocialResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_socials(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SocialResponse>>, AppError> {
    let (skip, limit) = query.window();

    let data = social::Entity::find()
        .order_by_asc(social::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(SocialResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Socials",
    operation_id = "getSocial",
    summary = "Get a social link by ID",
    params(("id" = i32, Path, description = "Social link ID")),
    responses(
        (status = 200, description = "Social link details", body = SocialResponse),
        (status = 404, description = "Social link not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_social(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SocialResponse>, AppError> {
    let model = find_social(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Socials",
    operation_id = "updateSocial",
    summary = "Update a social link",
    description = "Partial update: only submitted form fields change.",
    params(("id" = i32, Path, description = "Social link ID")),
    request_body(content_type = "multipart/form-data", description = "Any subset of social fields"),
    responses(
        (status = 200, description = "Social link updated", body = SocialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Social link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_social(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<SocialResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_social(&state.db, id).await?;
    let old_image = existing.image.clone();
    let mut active: social::ActiveModel = existing.into();

    if let Some(name) = form.text("name") {
        let name = name.trim().to_string();
        validate_text(&name, "Name")?;
        active.name = Set(name);
    }
    if let Some(link) = form.text("link") {
        let link = link.trim().to_string();
        validate_link(&link, "link")?;
        active.link = Set(link);
    }

    let new_image = match form.file("image") {
        Some(file) => {
            let validated = media::validate_image(file.bytes.clone())?;
            Some(media::store_image(&state, validated).await?)
        }
        None => None,
    };
    if let Some(ref reference) = new_image {
        active.image = Set(reference.clone());
    }

    active.updated_at = Set(chrono::Utc::now());

    let model = match active.update(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(reference) = new_image {
                media::delete_image(&state, &reference).await;
            }
            return Err(e.into());
        }
    };

    if new_image.is_some() {
        media::delete_image(&state, &old_image).await;
    }

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Socials",
    operation_id = "deleteSocial",
    summary = "Delete a social link",
    params(("id" = i32, Path, description = "Social link ID")),
    responses(
        (status = 204, description = "Social link deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Social link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_social(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_social(&state.db, id).await?;
    let image = existing.image.clone();

    social::Entity::delete_by_id(id).exec(&state.db).await?;

    media::delete_image(&state, &image).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_social<C: ConnectionTrait>(db: &C, id: i32) -> Result<social::Model, AppError> {
    social::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Social link not found".into()))
}
