use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{project, project_tag, project_technology, tag, technology};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::project::ProjectResponse;
use crate::models::shared::{
    ListQuery, parse_id_csv, validate_link, validate_long_text, validate_text,
};
use crate::models::tag::TagResponse;
use crate::models::technology::TechnologyResponse;
use crate::state::AppState;
use crate::utils::multipart::FormData;
use crate::utils::relations;

#[utoipa::path(
    post,
    path = "/",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    description = "Multipart form: `title`, `description`, an `image` file, optional \
        `project_url` / `repo_url`, and optional comma-separated `technology_ids` / `tag_ids`. \
        Referenced ids are validated before the image is stored, so a rejected request leaves \
        no asset behind. The project row and its association links commit in one transaction.",
    request_body(content_type = "multipart/form-data", description = "Project fields + image"),
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, UNKNOWN_REFERENCE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let title = form.require_text("title")?.trim().to_string();
    validate_text(&title, "Title")?;
    let description = form.require_text("description")?.trim().to_string();
    validate_long_text(&description, "Description")?;

    let project_url = optional_link(&form, "project_url")?;
    let repo_url = optional_link(&form, "repo_url")?;

    let technology_ids = match form.text("technology_ids") {
        Some(raw) => parse_id_csv(raw, "technology")?,
        None => Vec::new(),
    };
    let tag_ids = match form.text("tag_ids") {
        Some(raw) => parse_id_csv(raw, "tag")?,
        None => Vec::new(),
    };

    // Referential validation comes first: an unknown id must fail the
    // request before any asset is written.
    ensure_technologies_exist(&state.db, &technology_ids).await?;
    ensure_tags_exist(&state.db, &tag_ids).await?;

    let image = form.require_file("image")?;
    let validated = media::validate_image(image.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let result = async {
        let txn = state.db.begin().await?;

        let now = chrono::Utc::now();
        let new_project = project::ActiveModel {
            title: Set(title),
            description: Set(description),
            image: Set(reference.clone()),
            project_url: Set(project_url),
            repo_url: Set(repo_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = new_project.insert(&txn).await?;

        sync_technology_links(&txn, model.id, &technology_ids).await?;
        sync_tag_links(&txn, model.id, &tag_ids).await?;

        txn.commit().await?;
        Ok::<project::Model, AppError>(model)
    }
    .await;

    let model = match result {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(e);
        }
    };

    let response = materialize(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects with their technologies and tags",
    params(ListQuery),
    responses(
        (status = 200, description = "Projects in insertion order", body = [ProjectResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let (skip, limit) = query.window();

    let models = project::Entity::find()
        .order_by_asc(project::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    let mut data = Vec::with_capacity(models.len());
    for model in models {
        data.push(materialize(&state.db, model).await?);
    }

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project by ID",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectResponse>, AppError> {
    let model = find_project(&state.db, id).await?;
    Ok(Json(materialize(&state.db, model).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Update a project",
    description = "Partial update: only submitted form fields change. Omitting \
        `technology_ids` / `tag_ids` leaves associations untouched; an empty value clears them; \
        otherwise the full set is replaced by diffing against current links. All referenced ids \
        must exist or the update is rejected whole.",
    params(("id" = i32, Path, description = "Project ID")),
    request_body(content_type = "multipart/form-data", description = "Any subset of project fields"),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, UNKNOWN_REFERENCE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ProjectResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_project(&state.db, id).await?;
    let old_image = existing.image.clone();

    let technology_ids = match form.text("technology_ids") {
        Some(raw) => Some(parse_id_csv(raw, "technology")?),
        None => None,
    };
    let tag_ids = match form.text("tag_ids") {
        Some(raw) => Some(parse_id_csv(raw, "tag")?),
        None => None,
    };

    if let Some(ref ids) = technology_ids {
        ensure_technologies_exist(&state.db, ids).await?;
    }
    if let Some(ref ids) = tag_ids {
        ensure_tags_exist(&state.db, ids).await?;
    }

    let mut active: project::ActiveModel = existing.into();

    if let Some(title) = form.text("title") {
        let title = title.trim().to_string();
        validate_text(&title, "Title")?;
        active.title = Set(title);
    }
    if let Some(description) = form.text("description") {
        let description = description.trim().to_string();
        validate_long_text(&description, "Description")?;
        active.description = Set(description);
    }
    if let Some(url) = form.text("project_url") {
        active.project_url = Set(normalize_link(url, "project_url")?);
    }
    if let Some(url) = form.text("repo_url") {
        active.repo_url = Set(normalize_link(url, "repo_url")?);
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

    let result = async {
        let txn = state.db.begin().await?;

        let model = active.update(&txn).await?;
        if let Some(ref ids) = technology_ids {
            sync_technology_links(&txn, model.id, ids).await?;
        }
        if let Some(ref ids) = tag_ids {
            sync_tag_links(&txn, model.id, ids).await?;
        }

        txn.commit().await?;
        Ok::<project::Model, AppError>(model)
    }
    .await;

    let model = match result {
        Ok(model) => model,
        Err(e) => {
            if let Some(reference) = new_image {
                media::delete_image(&state, &reference).await;
            }
            return Err(e);
        }
    };

    // The row now points at the new asset; the old one can go.
    if new_image.is_some() {
        media::delete_image(&state, &old_image).await;
    }

    Ok(Json(materialize(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    description = "Removes the project row and its association links in one transaction, then \
        deletes the cover image best-effort.",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_project(&state.db, id).await?;
    let image = existing.image.clone();

    let txn = state.db.begin().await?;
    project_technology::Entity::delete_many()
        .filter(project_technology::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project_tag::Entity::delete_many()
        .filter(project_tag::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    media::delete_image(&state, &image).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_project<C: ConnectionTrait>(db: &C, id: i32) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}

/// Resolve a project's technology and tag lists for the response body.
async fn materialize<C: ConnectionTrait>(
    db: &C,
    model: project::Model,
) -> Result<ProjectResponse, AppError> {
    let technologies = model
        .find_related(technology::Entity)
        .order_by_asc(technology::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(TechnologyResponse::from)
        .collect();

    let tags = model
        .find_related(tag::Entity)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(TagResponse::from)
        .collect();

    Ok(ProjectResponse::from_parts(model, technologies, tags))
}

async fn ensure_technologies_exist<C: ConnectionTrait>(
    db: &C,
    ids: &[i32],
) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i32> = technology::Entity::find()
        .filter(technology::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();

    let missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::UnknownReference {
            resource: "technology",
            ids: missing,
        })
    }
}

async fn ensure_tags_exist<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i32> = tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();

    let missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::UnknownReference {
            resource: "tag",
            ids: missing,
        })
    }
}

/// Replace a project's technology links with the desired set.
async fn sync_technology_links<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    desired: &[i32],
) -> Result<(), AppError> {
    let current: Vec<i32> = project_technology::Entity::find()
        .filter(project_technology::Column::ProjectId.eq(project_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.technology_id)
        .collect();

    let (to_add, to_remove) = relations::diff(&current, desired);

    if !to_remove.is_empty() {
        project_technology::Entity::delete_many()
            .filter(project_technology::Column::ProjectId.eq(project_id))
            .filter(project_technology::Column::TechnologyId.is_in(to_remove))
            .exec(db)
            .await?;
    }
    if !to_add.is_empty() {
        let links = to_add
            .into_iter()
            .map(|technology_id| project_technology::ActiveModel {
                project_id: Set(project_id),
                technology_id: Set(technology_id),
            });
        project_technology::Entity::insert_many(links)
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

/// Replace a project's tag links with the desired set.
async fn sync_tag_links<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    desired: &[i32],
) -> Result<(), AppError> {
    let current: Vec<i32> = project_tag::Entity::find()
        .filter(project_tag::Column::ProjectId.eq(project_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.tag_id)
        .collect();

    let (to_add, to_remove) = relations::diff(&current, desired);

    if !to_remove.is_empty() {
        project_tag::Entity::delete_many()
            .filter(project_tag::Column::ProjectId.eq(project_id))
            .filter(project_tag::Column::TagId.is_in(to_remove))
            .exec(db)
            .await?;
    }
    if !to_add.is_empty() {
        let links = to_add.into_iter().map(|tag_id| project_tag::ActiveModel {
            project_id: Set(project_id),
            tag_id: Set(tag_id),
        });
        project_tag::Entity::insert_many(links)
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

/// Normalize an optional link form field: empty clears, otherwise validate.
fn normalize_link(raw: &str, name: &str) -> Result<Option<String>, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    validate_link(trimmed, name)?;
    Ok(Some(trimmed.to_string()))
}

fn optional_link(form: &FormData, name: &'static str) -> Result<Option<String>, AppError> {
    match form.text(name) {
        Some(raw) => normalize_link(raw, name),
        None => Ok(None),
    }
}
