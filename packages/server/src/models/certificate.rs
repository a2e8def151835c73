use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::certificate;

#[derive(Serialize, utoipa::ToSchema)]
pub struct CertificateResponse {
    /// Certificate ID.
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "Machine Learning Specialization")]
    pub title: String,
    /// Issuing institution.
    #[schema(example = "Coursera")]
    pub school: String,
    /// Media reference to the certificate image.
    pub image: String,
    /// Verification link, if any.
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<certificate::Model> for CertificateResponse {
    fn from(model: certificate::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            school: model.school,
            image: model.image,
            link: model.link,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
