use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experience")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub company_name: String,
    /// Media reference to the company icon.
    pub icon: String,
    /// Background color behind the icon, e.g. `#383E56`.
    pub icon_bg: String,
    /// Display date range, free-form (e.g. `March 2022 - Present`).
    pub date: String,
    /// Bullet points, stored as a JSON-encoded array of strings.
    pub points: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
