use std::path::PathBuf;

use serde_json::{Map, Value};
use tokio::fs;

/// Maximum accepted language code length.
const MAX_CODE_LEN: usize = 16;

/// Errors from the translation file store.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("invalid language code: {0}")]
    InvalidCode(String),
    #[error("language file is not a JSON object")]
    NotAnObject,
    #[error("malformed language file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("i18n IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat-file translation store: one `<code>.json` object per language.
///
/// Language codes are validated before any path is built, so a code can
/// never name a file outside the store directory.
pub struct I18nStore {
    dir: PathBuf,
}

impl I18nStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn language_path(&self, code: &str) -> Result<PathBuf, I18nError> {
        validate_lang_code(code)?;
        Ok(self.dir.join(format!("{code}.json")))
    }

    /// List available language codes, sorted.
    pub async fn languages(&self) -> Result<Vec<String>, I18nError> {
        let mut langs = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(langs),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(code) = name.strip_suffix(".json")
                && validate_lang_code(code).is_ok()
            {
                langs.push(code.to_string());
            }
        }

        langs.sort();
        Ok(langs)
    }

    /// Read the full key-value map for a language, or `None` if absent.
    pub async fn get(&self, code: &str) -> Result<Option<Map<String, Value>>, I18nError> {
        let path = self.language_path(code)?;
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(I18nError::NotAnObject),
        }
    }

    /// Merge `updates` into a language's map, creating the file if new, and
    /// return the merged result. Existing keys not present in `updates` are
    /// preserved.
    pub async fn merge(
        &self,
        code: &str,
        updates: Map<String, Value>,
    ) -> Result<Map<String, Value>, I18nError> {
        let path = self.language_path(code)?;
        fs::create_dir_all(&self.dir).await?;

        let mut current = self.get(code).await?.unwrap_or_default();
        for (key, value) in updates {
            current.insert(key, value);
        }

        let rendered = serde_json::to_vec_pretty(&Value::Object(current.clone()))?;
        fs::write(&path, rendered).await?;

        Ok(current)
    }
}

/// Validate a language code: 1-16 ASCII alphanumerics or `-` (e.g. `en`,
/// `pt-br`).
pub fn validate_lang_code(code: &str) -> Result<(), I18nError> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return Err(I18nError::InvalidCode(format!(
            "must be 1-{MAX_CODE_LEN} characters"
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(I18nError::InvalidCode(
            "only ASCII letters, digits, and '-' are allowed".into(),
        ));
    }
    Ok(())
}
