use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::certificate;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::media;
use crate::models::certificate::CertificateResponse;
use crate::models::shared::{ListQuery, validate_link, validate_text};
use crate::state::AppState;
use crate::utils::multipart::FormData;

#[utoipa::path(
    post,
    path = "/",
    tag = "Certificates",
    operation_id = "createCertificate",
    summary = "Create a certificate",
    description = "Multipart form: `title`, `school`, an `image` file, and an optional `link`.",
    request_body(content_type = "multipart/form-data", description = "Certificate fields + image"),
    responses(
        (status = 201, description = "Certificate created", body = CertificateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let title = form.require_text("title")?.trim().to_string();
    validate_text(&title, "Title")?;
    let school = form.require_text("school")?.trim().to_string();
    validate_text(&school, "School")?;

    let link = match form.text("link").map(str::trim) {
        Some(link) if !link.is_empty() => {
            validate_link(link, "link")?;
            Some(link.to_string())
        }
        _ => None,
    };

    let image = form.require_file("image")?;
    let validated = media::validate_image(image.bytes.clone())?;
    let reference = media::store_image(&state, validated).await?;

    let now = chrono::Utc::now();
    let new_certificate = certificate::ActiveModel {
        title: Set(title),
        school: Set(school),
        image: Set(reference.clone()),
        link: Set(link),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_certificate.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            media::delete_image(&state, &reference).await;
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(CertificateResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Certificates",
    operation_id = "listCertificates",
    summary = "List certificates",
    params(ListQuery),
    responses(
        (status = 200, description = "Certificates in insertion order", body = [CertificateResponse]),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_certificates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CertificateResponse>>, AppError> {
    let (skip, limit) = query.window();

    let data = certificate::Entity::find()
        .order_by_asc(certificate::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    Ok(Json(data.into_iter().map(CertificateResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Certificates",
    operation_id = "getCertificate",
    summary = "Get a certificate by ID",
    params(("id" = i32, Path, description = "Certificate ID")),
    responses(
        (status = 200, description = "Certificate details", body = CertificateResponse),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CertificateResponse>, AppError> {
    let model = find_certificate(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Certificates",
    operation_id = "updateCertificate",
    summary = "Update a certificate",
    description = "Partial update: only submitted form fields change. An empty `link` clears it. \
        A new `image` replaces the stored one after the row is updated.",
    params(("id" = i32, Path, description = "Certificate ID")),
    request_body(content_type = "multipart/form-data", description = "Any subset of certificate fields"),
    responses(
        (status = 200, description = "Certificate updated", body = CertificateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(id))]
pub async fn update_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<CertificateResponse>, AppError> {
    let form = FormData::read(multipart, state.config.storage.max_upload_size).await?;

    let existing = find_certificate(&state.db, id).await?;
    let old_image = existing.image.clone();
    let mut active: certificate::ActiveModel = existing.into();

    if let Some(title) = form.text("title") {
        let title = title.trim().to_string();
        validate_text(&title, "Title")?;
        active.title = Set(title);
    }
    if let Some(school) = form.text("school") {
        let school = school.trim().to_string();
        validate_text(&school, "School")?;
        active.school = Set(school);
    }
    if let Some(link) = form.text("link") {
        let link = link.trim();
        if link.is_empty() {
            active.link = Set(None);
        } else {
            validate_link(link, "link")?;
            active.link = Set(Some(link.to_string()));
        }
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
    tag = "Certificates",
    operation_id = "deleteCertificate",
    summary = "Delete a certificate",
    params(("id" = i32, Path, description = "Certificate ID")),
    responses(
        (status = 204, description = "Certificate deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Certificate not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn delete_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_certificate(&state.db, id).await?;
    let image = existing.image.clone();

    certificate::Entity::delete_by_id(id).exec(&state.db).await?;

    media::delete_image(&state, &image).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_certificate<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<certificate::Model, AppError> {
    certificate::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Certificate not found".into()))
}
