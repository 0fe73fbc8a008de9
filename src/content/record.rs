use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::{ContentId, ContentIdError};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    InvalidId(#[from] ContentIdError),
    #[error("Record {0} has an empty title")]
    EmptyTitle(String),
}

/// Bulletin severity. Ranking only distinguishes critical from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Standard,
    Informational,
}

impl Severity {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "standard" => Some(Severity::Standard),
            "informational" => Some(Severity::Informational),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body of a record: either a flat string or an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBody {
    Text(String),
    Sections(Vec<ContentSection>),
}

/// A content record exactly as the source collection serializes it.
///
/// Tag lists are loosely typed (`Option<Vec<String>>`); [`CatalogRecord::normalize`]
/// turns them into [`TagList`]s once, on entry into the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_designations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_focus: Option<Vec<String>>,

    #[serde(rename = "bulletinID", skip_serializing_if = "Option::is_none")]
    pub bulletin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impacted_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impacted_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impacted_skills: Option<Vec<String>>,

    #[serde(rename = "updateID", skip_serializing_if = "Option::is_none")]
    pub update_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgement_required: Option<bool>,
}

/// One personalization dimension's tag list, normalized to lowercase.
///
/// An empty list means the record carries no constraint along that
/// dimension and applies to every viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn normalize(raw: Option<&Vec<String>>) -> Self {
        let values = raw
            .map(|list| {
                list.iter()
                    .map(|tag| tag.trim().to_lowercase())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        TagList(values)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_all(&self) -> bool {
        self.0.iter().any(|tag| tag == "all")
    }

    /// Does the list name `value` (or the `all` sentinel)? Comparison is
    /// case-insensitive; an unconstrained list allows everything.
    pub fn allows(&self, value: &str) -> bool {
        if self.is_unconstrained() || self.has_all() {
            return true;
        }
        let needle = value.trim().to_lowercase();
        self.0.iter().any(|tag| *tag == needle)
    }

    /// Any-overlap variant used by the multi-valued viewer attributes.
    pub fn allows_any<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> bool {
        if self.is_unconstrained() || self.has_all() {
            return true;
        }
        values.into_iter().any(|value| {
            let needle = value.trim().to_lowercase();
            self.0.iter().any(|tag| *tag == needle)
        })
    }
}

/// The personalization tag lists of a record, one [`TagList`] per dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceTags {
    pub regions: TagList,
    pub languages: TagList,
    pub roles: TagList,
    pub team_types: TagList,
    pub audience_groups: TagList,
    pub skill_designations: TagList,
    pub product_focus: TagList,
}

impl AudienceTags {
    pub fn from_record(raw: &ContentRecord) -> Self {
        AudienceTags {
            regions: TagList::normalize(raw.regions.as_ref()),
            languages: TagList::normalize(raw.languages.as_ref()),
            roles: TagList::normalize(raw.roles.as_ref()),
            team_types: TagList::normalize(raw.team_types.as_ref()),
            audience_groups: TagList::normalize(raw.audience_groups.as_ref()),
            skill_designations: TagList::normalize(raw.skill_designations.as_ref()),
            product_focus: TagList::normalize(raw.product_focus.as_ref()),
        }
    }
}

/// Parse the date spellings the content sources actually use.
///
/// RFC 3339 first, then a bare datetime, then a bare date. Anything else
/// is `None`: malformed dates are "no constraint", never an error.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// A record admitted into the catalog: raw fields plus the resolved values
/// every downstream consumer shares.
///
/// Normalization happens exactly once, here. The record is read-only for
/// the rest of its life; derived views are built by cloning.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    id: ContentId,
    /// Recency-sort key: `lastUpdated` > `publishDate` > `publishedDate`,
    /// first non-empty wins; unparseable values leave the record dateless.
    pub effective_date: Option<DateTime<Utc>>,
    /// Display description: `subtitle` > `summary` > `description`.
    pub description: String,
    pub severity: Option<Severity>,
    pub audience: AudienceTags,
    raw: ContentRecord,
}

impl CatalogRecord {
    /// The only way to admit a raw record into the pipeline.
    pub fn normalize(raw: ContentRecord) -> Result<Self, RecordError> {
        let id = ContentId::new(raw.id.clone())?;
        if raw.title.trim().is_empty() {
            return Err(RecordError::EmptyTitle(id.as_str().to_string()));
        }

        let effective_date = [&raw.last_updated, &raw.publish_date, &raw.published_date]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .and_then(|value| parse_date(value));

        let description = [&raw.subtitle, &raw.summary, &raw.description]
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_string();

        let severity = raw.severity.as_deref().and_then(Severity::parse);
        let audience = AudienceTags::from_record(&raw);

        Ok(CatalogRecord {
            id,
            effective_date,
            description,
            severity,
            audience,
            raw,
        })
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn raw(&self) -> &ContentRecord {
        &self.raw
    }

    pub fn title(&self) -> &str {
        &self.raw.title
    }

    pub fn link(&self) -> String {
        format!("/articles/{}", self.id)
    }

    /// Exact classification match used by the list surface: the requested
    /// category must equal `type`, `category`, or one of the tags.
    pub fn matches_category(&self, category: &str) -> bool {
        self.raw.kind.as_deref() == Some(category)
            || self.raw.category.as_deref() == Some(category)
            || self.raw.tags.iter().any(|tag| tag == category)
    }

    pub fn summary(&self) -> ArticleSummary {
        let mut stripped = self.raw.clone();
        stripped.content = None;
        ArticleSummary(stripped)
    }

    pub fn full(&self) -> ContentRecord {
        self.raw.clone()
    }
}

/// Summary view of a record: every field except the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleSummary(ContentRecord);

impl ArticleSummary {
    pub fn record(&self) -> &ContentRecord {
        &self.0
    }
}
