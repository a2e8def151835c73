use std::collections::BTreeMap;

use axum::extract::Multipart;

use crate::error::AppError;

/// A file field read out of a multipart form.
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// All fields of a multipart form, read up-front.
///
/// Text fields and file fields are distinguished by the presence of a
/// filename on the part, matching how browsers and the original clients
/// submit these forms. File payloads are capped at `max_file_size` while
/// reading, so an oversized upload is rejected before it is buffered whole.
pub struct FormData {
    texts: BTreeMap<String, String>,
    files: BTreeMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart, max_file_size: u64) -> Result<Self, AppError> {
        let mut texts = BTreeMap::new();
        let mut files = BTreeMap::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(|s| s.to_string()) else {
                continue; // Ignore unnamed fields.
            };

            if field.file_name().is_some() {
                let filename = field.file_name().map(|s| s.to_string());

                let mut bytes: Vec<u8> = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                {
                    if (bytes.len() + chunk.len()) as u64 > max_file_size {
                        return Err(AppError::Validation(format!(
                            "File exceeds maximum size of {max_file_size} bytes"
                        )));
                    }
                    bytes.extend_from_slice(&chunk);
                }

                files.insert(name, UploadedFile { filename, bytes });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                texts.insert(name, text);
            }
        }

        Ok(Self { texts, files })
    }

    /// A text field's value, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// A required text field, or a validation error naming it.
    pub fn require_text(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("Missing '{name}' field")))
    }

    /// A file field, if present and non-empty.
    ///
    /// Browsers submit an empty part for an untouched file input on edit
    /// forms; that counts as "no file".
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).filter(|f| !f.bytes.is_empty())
    }

    /// A required file field, or a validation error naming it.
    pub fn require_file(&self, name: &str) -> Result<&UploadedFile, AppError> {
        self.file(name)
            .ok_or_else(|| AppError::Validation(format!("Missing '{name}' file field")))
    }
}
