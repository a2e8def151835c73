use serde::Serialize;
use serde_json::{Map, Value};

/// Response for a translation merge: confirmation plus the merged map.
#[derive(Serialize, utoipa::ToSchema)]
pub struct I18nUpdateResponse {
    /// Confirmation message.
    #[schema(example = "Language 'en' updated successfully")]
    pub message: String,
    /// The full merged key-value map as persisted.
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
}
