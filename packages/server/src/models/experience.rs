use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::experience;
use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ExperienceResponse {
    /// Experience ID.
    pub id: i32,
    #[schema(example = "Backend Developer")]
    pub title: String,
    #[schema(example = "Acme Corp")]
    pub company_name: String,
    /// Media reference to the company icon.
    pub icon: String,
    /// Background color behind the icon.
    #[schema(example = "#383E56")]
    pub icon_bg: String,
    /// Display date range.
    #[schema(example = "March 2022 - Present")]
    pub date: String,
    /// Bullet points describing the role.
    pub points: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<experience::Model> for ExperienceResponse {
    fn from(model: experience::Model) -> Self {
        // The column holds a JSON-encoded array; a row written by this
        // service always parses.
        let points = serde_json::from_str(&model.points).unwrap_or_default();
        Self {
            id: model.id,
            title: model.title,
            company_name: model.company_name,
            icon: model.icon,
            icon_bg: model.icon_bg,
            date: model.date,
            points,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Parse the `points` form field: a JSON array of non-empty strings.
pub fn parse_points(raw: &str) -> Result<Vec<String>, AppError> {
    let points: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| AppError::Validation("points must be a JSON array of strings".into()))?;
    if points.iter().any(|p| p.trim().is_empty()) {
        return Err(AppError::Validation("points must not contain empty entries".into()));
    }
    Ok(points)
}
