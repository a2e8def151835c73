use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StorageError;

/// A validated media asset key of the form `<uuid>.<ext>`.
///
/// Keys are always generated server-side; client-supplied filenames never
/// become keys, so stored names cannot collide or carry path components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaKey {
    id: Uuid,
    ext: String,
}

/// Maximum accepted extension length when parsing a key.
const MAX_EXT_LEN: usize = 8;

impl MediaKey {
    /// Generate a fresh key with the given file extension.
    pub fn generate(ext: &str) -> Result<Self, StorageError> {
        validate_ext(ext)?;
        Ok(Self {
            id: Uuid::new_v4(),
            ext: ext.to_string(),
        })
    }

    /// The file extension (without the leading dot).
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// The key rendered as a flat filename, e.g. `3f8a….png`.
    pub fn as_filename(&self) -> String {
        format!("{}.{}", self.id, self.ext)
    }
}

fn validate_ext(ext: &str) -> Result<(), StorageError> {
    if ext.is_empty() || ext.len() > MAX_EXT_LEN {
        return Err(StorageError::InvalidKey(format!(
            "extension must be 1-{MAX_EXT_LEN} characters"
        )));
    }
    if !ext.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(StorageError::InvalidKey(
            "extension must be lowercase alphanumeric".into(),
        ));
    }
    Ok(())
}

impl FromStr for MediaKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stem, ext) = s
            .rsplit_once('.')
            .ok_or_else(|| StorageError::InvalidKey("missing extension".into()))?;
        validate_ext(ext)?;
        let id = Uuid::parse_str(stem)
            .map_err(|e| StorageError::InvalidKey(format!("invalid UUID stem: {e}")))?;
        Ok(Self {
            id,
            ext: ext.to_string(),
        })
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.ext)
    }
}

impl Serialize for MediaKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_filename())
    }
}

impl<'de> Deserialize<'de> for MediaKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
