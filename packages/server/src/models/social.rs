use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::social;

#[derive(Serialize, utoipa::ToSchema)]
pub struct SocialResponse {
    /// Social link ID.
    pub id: i32,
    #[schema(example = "GitHub")]
    pub name: String,
    #[schema(example = "https://github.com/example")]
    pub link: String,
    /// Media reference to the platform icon.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<social::Model> for SocialResponse {
    fn from(model: social::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            link: model.link,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
