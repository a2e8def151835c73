use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::job;

#[derive(Serialize, utoipa::ToSchema)]
pub struct JobResponse {
    /// Job ID.
    pub id: i32,
    #[schema(example = "Backend Developer")]
    pub title: String,
    /// Media reference to the company logo.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<job::Model> for JobResponse {
    fn from(model: job::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
