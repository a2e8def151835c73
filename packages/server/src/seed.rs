use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::user;
use crate::utils::hash;

/// Create the administrator account from config if it does not exist yet.
///
/// Runs once before the server accepts requests. Idempotent: a concurrent
/// start racing the insert hits the username unique constraint and is
/// treated as already-created.
pub async fn ensure_admin_user(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(&auth.admin_username))
        .one(db)
        .await?;

    if existing.is_some() {
        info!("Admin user '{}' already exists", auth.admin_username);
        return Ok(());
    }

    let password_hash = hash::hash_password(&auth.admin_password)?;

    let admin = user::ActiveModel {
        username: Set(auth.admin_username.clone()),
        password: Set(password_hash),
        role: Set(user::ADMIN_ROLE.to_string()),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match admin.insert(db).await {
        Ok(_) => {
            info!("Created admin user '{}'", auth.admin_username);
            Ok(())
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            info!("Admin user '{}' created concurrently", auth.admin_username);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
