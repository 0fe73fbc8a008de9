pub mod catalog;
pub mod record;

pub use crate::types::identifiers::{CatalogVersion, ContentId};
pub use catalog::{CatalogError, ContentCatalog};
pub use record::{
    ArticleSummary, AudienceTags, CatalogRecord, ContentBody, ContentRecord, ContentSection,
    RecordError, Severity, TagList,
};
