use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::project;

use super::tag::TagResponse;
use super::technology::TechnologyResponse;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    /// Project ID.
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Portfolio website")]
    pub title: String,
    pub description: String,
    /// Media reference to the cover image.
    pub image: String,
    /// Live deployment URL, if any.
    pub project_url: Option<String>,
    /// Source repository URL, if any.
    pub repo_url: Option<String>,
    /// Technologies used, fully materialized.
    pub technologies: Vec<TechnologyResponse>,
    /// Tags, fully materialized.
    pub tags: Vec<TagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    pub fn from_parts(
        model: project::Model,
        technologies: Vec<TechnologyResponse>,
        tags: Vec<TagResponse>,
    ) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image: model.image,
            project_url: model.project_url,
            repo_url: model.repo_url,
            technologies,
            tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
