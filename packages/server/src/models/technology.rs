use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::technology;

#[derive(Serialize, utoipa::ToSchema)]
pub struct TechnologyResponse {
    /// Technology ID.
    #[schema(example = 3)]
    pub id: i32,
    /// Display name, unique.
    #[schema(example = "Python")]
    pub name: String,
    /// Media reference to the icon.
    #[schema(example = "/static/images/7a9f…c2.png")]
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<technology::Model> for TechnologyResponse {
    fn from(model: technology::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            icon: model.icon,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
