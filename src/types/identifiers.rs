use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

#[derive(Debug, Error)]
pub enum ContentIdError {
    #[error("Content id must not be empty")]
    Empty,
}

impl ContentId {
    /// Create a ContentId from its raw string form.
    ///
    /// Ids are stable identifiers assigned by the content source; the only
    /// normalization applied is surrounding-whitespace removal.
    pub fn new(raw: impl Into<String>) -> Result<Self, ContentIdError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ContentIdError::Empty);
        }
        Ok(ContentId(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-hash version of a loaded catalog snapshot.
///
/// Identical record collections always hash to the identical version,
/// independent of input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(String);

impl CatalogVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        CatalogVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
