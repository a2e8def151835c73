use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String,
    /// Media reference, e.g. `/static/images/<key>`.
    pub image: String,
    pub project_url: Option<String>,
    pub repo_url: Option<String>,

    #[sea_orm(has_many, via = "project_technology")]
    pub technologies: HasMany<super::technology::Entity>,

    #[sea_orm(has_many, via = "project_tag")]
    pub tags: HasMany<super::tag::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
