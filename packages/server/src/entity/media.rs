use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    /// Generated asset key (`<uuid>.<ext>`), also the filename on disk.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,

    /// MIME type derived from the decoded image format.
    pub content_type: String,

    /// Payload size in bytes.
    pub size: i64,

    /// SHA-256 of the payload, used as the ETag when serving.
    pub sha256: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
