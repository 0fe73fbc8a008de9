use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::record::{ArticleSummary, ContentRecord};
use crate::preference::model::{
    AudienceGroup, Language, Preference, Region, Role, SkillDesignation, TeamType,
};
use crate::search::LanguageFilter;
use crate::stores::alerts::{AlertSeverity, SystemAlert};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListContentRequest {
    pub category: Option<String>,
    pub region: Option<Region>,
    pub query: Option<String>,
    /// Explicit id selection; when non-empty it overrides every other filter.
    pub ids: Vec<String>,
    /// Include record bodies instead of summaries.
    pub full: bool,
}

/// Either view of a listed record, depending on the `full` flag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContentListing {
    Full(ContentRecord),
    Summary(ArticleSummary),
}

#[derive(Debug, Clone, Serialize)]
pub struct ListContentResponse {
    pub articles: Vec<ContentListing>,
}

/// Preference snapshot carried by a homepage request. Every field has the
/// portal default, so a bare request renders the unpersonalized homepage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageRequest {
    pub region: Region,
    pub language: Language,
    pub role: Role,
    pub team_type: TeamType,
    pub audience_group: AudienceGroup,
    pub skill_designations: Vec<SkillDesignation>,
}

impl Default for HomepageRequest {
    fn default() -> Self {
        HomepageRequest {
            region: Region::All,
            language: Language::En,
            role: Role::Technician,
            team_type: TeamType::Home,
            audience_group: AudienceGroup::Tech,
            skill_designations: Vec::new(),
        }
    }
}

impl HomepageRequest {
    /// Parse the comma-separated `skillDesignations` query form.
    /// Unknown entries are dropped; they could never match any record.
    pub fn parse_skills(raw: &str) -> Vec<SkillDesignation> {
        raw.split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }

    pub fn to_preference(&self) -> Preference {
        Preference {
            language: self.language,
            region: self.region,
            roles: vec![self.role],
            primary_role: self.role,
            team_type: self.team_type,
            audience_group: self.audience_group,
            skill_designations: self.skill_designations.clone(),
            ..Preference::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub q: String,
    pub lang: LanguageFilter,
}

/// Raw feedback payload; required fields are checked per feedback type so
/// the validation error can name what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackSubmission {
    pub feedback_type: Option<String>,
    pub content_id: Option<String>,
    pub is_helpful: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub page_url: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackAck {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetOutOfDateRequest {
    pub content_id: Option<String>,
    pub out_of_date: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfDateStatus {
    pub content_id: String,
    pub out_of_date: bool,
}

/// Raw alert-creation payload, validated before it reaches the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub estimated_resolution: Option<DateTime<Utc>>,
    pub affected_systems: Vec<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertList {
    pub alerts: Vec<SystemAlert>,
}
