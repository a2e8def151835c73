use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated administrator extracted from the `Authorization: Bearer
/// <token>` header.
///
/// Add this as a handler parameter to guard a mutating route. Verification
/// order: header present, token decodes with a live expiry, role claim is
/// `admin`, and the subject still names an active user in the credential
/// store. The last step rejects stale-but-valid tokens for users that have
/// since been removed, renamed, or deactivated.
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        if claims.role != user::ADMIN_ROLE {
            return Err(AppError::PermissionDenied);
        }

        let db_user = user::Entity::find()
            .filter(user::Column::Username.eq(&claims.sub))
            .one(&state.db)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        if !db_user.is_active || db_user.role != claims.role {
            return Err(AppError::TokenInvalid);
        }

        Ok(AdminUser {
            id: db_user.id,
            username: db_user.username,
            role: db_user.role,
        })
    }
}
