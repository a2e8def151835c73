use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::job;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::job::JobResponse;
use crate::models::shared::{ListQuery, validate_text};
use crate::state::AppState;
use crate::utils::multipart::FormData;

#[utoipa::path(
    post,
    path = "/",
    tag = "Jobs",
    operation_id = "createJob",
    summary = "Create a job",
    description = "Multipart form: `title` and an `image` file.",
    request_body(content_type = "multipart/form-data", description = "title + image file"),
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_job(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let title = form.require_text("title")?.trim().to_string();
    validate_text(&title, "Title")?;

    let image = form.require_file("image")?;
    let validated = media::validate_image(image.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let now = chrono::Utc::now();
    let new_job = job::ActiveModel {
        title: Set(title),
        image: Set(reference.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_job.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(JobResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Jobs",
    operation_id = "listJobs",
    summary = "List jobs",
    params(ListQuery),
    responses(
        (status = 200, description = "Jobs in insertion order", body = [JobResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let (skip, limit) = query.window();

    let data = job::Entity::find()
        .order_by_asc(job::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(JobResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Jobs",
    operation_id = "getJob",
    summary = "Get a job by ID",
    params(("id" = i32, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = JobResponse),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobResponse>, AppError> {
    let model = find_job(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Jobs",
    operation_id = "updateJob",
    summary = "Update a job",
    description = "Partial update: only submitted form fields change.",
    params(("id" = i32, Path, description = "Job ID")),
    request_body(content_type = "multipart/form-data", description = "Optional title and image file"),
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_job(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<JobResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_job(&state.db, id).await?;
    let old_image = existing.image.clone();
    let mut active: job::ActiveModel = existing.into();

    if let Some(title) = form.text("title") {
        let title = title.trim().to_string();
        validate_text(&title, "Title")?;
        active.title = Set(title);
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
    tag = "Jobs",
    operation_id = "deleteJob",
    summary = "Delete a job",
    params(("id" = i32, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_job(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_job(&state.db, id).await?;
    let image = existing.image.clone();

    job::Entity::delete_by_id(id).exec(&state.db).await?;

    media::delete_image(&state, &image).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_job<C: ConnectionTrait>(db: &C, id: i32) -> Result<job::Model, AppError> {
    job::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))
}
