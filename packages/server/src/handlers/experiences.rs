use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::experience;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::experience::{ExperienceResponse, parse_points};
use crate::models::shared::{ListQuery, validate_text};
use crate::state::AppState;
use crate::utils::multipart::FormData;

#[utoipa::path(
    post,
    path = "/",
    tag = "Experiences",
    operation_id = "createExperience",
    summary = "Create a work experience entry",
    description = "Multipart form: `title`, `company_name`, `icon_bg`, `date`, a `points` field \
        holding a JSON array of strings, and an `icon` image file.",
    request_body(content_type = "multipart/form-data", description = "Experience fields + icon"),
    responses(
        (status = 201, description = "Experience created", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_experience(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let title = form.require_text("title")?.trim().to_string();
    validate_text(&title, "Title")?;
    let company_name = form.require_text("company_name")?.trim().to_string();
    validate_text(&company_name, "Company name")?;
    let icon_bg = form.require_text("icon_bg")?.trim().to_string();
    validate_text(&icon_bg, "Icon background")?;
    let date = form.require_text("date")?.trim().to_string();
    validate_text(&date, "Date")?;
    let points = parse_points(form.require_text("points")?)?;
    let points_json = serde_json::to_string(&points)
        .map_err(|e| AppError::Internal(format!("Failed to serialize points: {e}")))?;

    let icon = form.require_file("icon")?;
    let validated = media::validate_image(icon.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let now = chrono::Utc::now();
    let new_experience = experience::ActiveModel {
        title: Set(title),
        company_name: Set(company_name),
        icon: Set(reference.clone()),
        icon_bg: Set(icon_bg),
        date: Set(date),
        points: Set(points_json),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_experience.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(ExperienceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Experiences",
    operation_id = "listExperiences",
    summary = "List experiences",
    params(ListQuery),
    responses(
        (status = 200, description = "Experiences in insertion order", body = [ExperienceResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_experiences(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ExperienceResponse>>, AppError> {
    let (skip, limit) = query.window();

    let data = experience::Entity::find()
        .order_by_asc(experience::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(ExperienceResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Experiences",
    operation_id = "getExperience",
    summary = "Get an experience by ID",
    params(("id" = i32, Path, description = "Experience ID")),
    responses(
        (status = 200, description = "Experience details", body = ExperienceResponse),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ExperienceResponse>, AppError> {
    let model = find_experience(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Experiences",
    operation_id = "updateExperience",
    summary = "Update an experience",
    description = "Partial update: only submitted form fields change.",
    params(("id" = i32, Path, description = "Experience ID")),
    request_body(content_type = "multipart/form-data", description = "Any subset of experience fields"),
    responses(
        (status = 200, description = "Experience updated", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_experience(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ExperienceResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_experience(&state.db, id).await?;
    let old_icon = existing.icon.clone();
    let mut active: experience::ActiveModel = existing.into();

    if let Some(title) = form.text("title") {
        let title = title.trim().to_string();
        validate_text(&title, "Title")?;
        active.title = Set(title);
    }
    if let Some(company_name) = form.text("company_name") {
        let company_name = company_name.trim().to_string();
        validate_text(&company_name, "Company name")?;
        active.company_name = Set(company_name);
    }
    if let Some(icon_bg) = form.text("icon_bg") {
        let icon_bg = icon_bg.trim().to_string();
        validate_text(&icon_bg, "Icon background")?;
        active.icon_bg = Set(icon_bg);
    }
    if let Some(date) = form.text("date") {
        let date = date.trim().to_string();
        validate_text(&date, "Date")?;
        active.date = Set(date);
    }
    if let Some(raw) = form.text("points") {
        let points = parse_points(raw)?;
        let points_json = serde_json::to_string(&points)
            .map_err(|e| AppError::Internal(format!("Failed to serialize points: {e}")))?;
        active.points = Set(points_json);
    }

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
            return Err(e.into());
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
    tag = "Experiences",
    operation_id = "deleteExperience",
    summary = "Delete an experience",
    params(("id" = i32, Path, description = "Experience ID")),
    responses(
        (status = 204, description = "Experience deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_experience(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_experience(&state.db, id).await?;
    let icon = existing.icon.clone();

    experience::Entity::delete_by_id(id).exec(&state.db).await?;

    media::delete_image(&state, &icon).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_experience<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<experience::Model, AppError> {
    experience::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Experience not found".into()))
}
