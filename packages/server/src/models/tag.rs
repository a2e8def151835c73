use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::tag;

/// Request body for creating a tag. Tags carry no image, so this is plain
/// JSON rather than a multipart form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    /// Tag name, unique.
    #[schema(example = "web")]
    pub name: String,
}

/// Partial-update body for a tag.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    /// Tag ID.
    #[schema(example = 5)]
    pub id: i32,
    /// Tag name.
    #[schema(example = "web")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<tag::Model> for TagResponse {
    fn from(model: tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
