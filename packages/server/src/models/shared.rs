use std::collections::HashSet;

use serde::Deserialize;

use crate::error::AppError;

/// Offset/limit query parameters shared by all list endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of entities to skip.
    pub skip: Option<u64>,
    /// Maximum number of entities to return (1-100).
    pub limit: Option<u64>,
}

impl ListQuery {
    /// Resolve to a concrete `(skip, limit)` window. Defaults: skip 0,
    /// limit 100; limit clamped to 1-100.
    pub fn window(&self) -> (u64, u64) {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(100).clamp(1, 100);
        (skip, limit)
    }
}

/// Validate a required trimmed text field (1-256 Unicode characters).
pub fn validate_text(value: &str, name: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{name} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate a required free-form text field (1-10000 Unicode characters).
pub fn validate_long_text(value: &str, name: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 10_000 {
        return Err(AppError::Validation(format!(
            "{name} must be 1-10000 characters"
        )));
    }
    Ok(())
}

/// Validate an optional URL-ish field (non-empty, sane length).
pub fn validate_link(value: &str, name: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.len() > 2048 {
        return Err(AppError::Validation(format!(
            "{name} must be 1-2048 characters"
        )));
    }
    Ok(())
}

/// Parse a comma-separated id list as submitted by the upload forms.
///
/// An empty or whitespace-only string parses to an empty list ("clear all
/// associations"). Duplicate ids are rejected.
pub fn parse_id_csv(raw: &str, name: &str) -> Result<Vec<i32>, AppError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: i32 = part
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid {name} id: '{part}'")))?;
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} id: {id}")));
        }
        ids.push(id);
    }

    Ok(ids)
}
