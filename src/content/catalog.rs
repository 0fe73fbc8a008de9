use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::record::{CatalogRecord, ContentRecord, RecordError};
use crate::types::identifiers::{CatalogVersion, ContentId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidRecord(#[from] RecordError),
    #[error("Duplicate content id: {0}")]
    DuplicateId(String),
}

/// An immutable snapshot of the content collection.
///
/// Loading is all-or-nothing: any invalid record fails the whole load and
/// leaves no partial catalog behind. Records keep their source order, which
/// every stable sort downstream depends on.
#[derive(Debug)]
pub struct ContentCatalog {
    records: Vec<CatalogRecord>,
    index: BTreeMap<ContentId, usize>,
    version: CatalogVersion,
}

impl ContentCatalog {
    pub fn from_records(raw_records: Vec<ContentRecord>) -> Result<Self, CatalogError> {
        let mut records = Vec::with_capacity(raw_records.len());
        let mut index = BTreeMap::new();

        for raw in raw_records {
            let record = CatalogRecord::normalize(raw)?;
            if index.contains_key(record.id()) {
                return Err(CatalogError::DuplicateId(record.id().as_str().to_string()));
            }
            index.insert(record.id().clone(), records.len());
            records.push(record);
        }

        // Snapshot version: hash (id, record-json) pairs sorted by id, so the
        // fingerprint is independent of source order.
        let mut fingerprint_input: Vec<(&ContentId, Vec<u8>)> = Vec::with_capacity(records.len());
        for record in &records {
            fingerprint_input.push((record.id(), serde_json::to_vec(record.raw())?));
        }
        fingerprint_input.sort_by(|a, b| a.0.cmp(b.0));

        let mut canonical = Vec::new();
        for (id, bytes) in fingerprint_input {
            canonical.extend_from_slice(id.as_str().as_bytes());
            canonical.push(b':');
            canonical.extend_from_slice(&bytes);
            canonical.push(b'\n');
        }
        let version = CatalogVersion::from_content(&canonical);

        Ok(ContentCatalog {
            records,
            index,
            version,
        })
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let raw_records: Vec<ContentRecord> = serde_json::from_reader(reader)?;
        Self::from_records(raw_records)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn get(&self, id: &ContentId) -> Option<&CatalogRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> &CatalogVersion {
        &self.version
    }
}
