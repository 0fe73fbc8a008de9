use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::record::{AudienceTags, Severity, TagList};
use crate::preference::model::{
    AudienceGroup, Language, Preference, Region, Role, SkillDesignation, TeamType,
};

/// Source fixture backing the homepage surface: the offer inventory, the
/// bucket artwork, and the pre-existing personalized-feed collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageSource {
    pub hot_offers: OfferSection,
    pub technical_bulletins: SectionArt,
    pub billing_updates: SectionArt,
    pub personalized_feed: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub items: Vec<OfferItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionArt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "offerID", skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_team_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl OfferItem {
    pub fn audience_tags(&self) -> AudienceTags {
        AudienceTags {
            regions: TagList::normalize(self.eligible_regions.as_ref()),
            languages: TagList::normalize(self.languages.as_ref()),
            team_types: TagList::normalize(self.eligible_team_types.as_ref()),
            ..AudienceTags::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_designations: Option<Vec<String>>,
}

impl FeedItem {
    pub fn audience_tags(&self) -> AudienceTags {
        AudienceTags {
            regions: TagList::normalize(self.regions.as_ref()),
            languages: TagList::normalize(self.languages.as_ref()),
            roles: TagList::normalize(self.roles.as_ref()),
            audience_groups: TagList::normalize(self.audience_groups.as_ref()),
            skill_designations: TagList::normalize(self.skill_designations.as_ref()),
            ..AudienceTags::default()
        }
    }
}

/// Technical-bulletin bucket item, reshaped from a catalog record with the
/// bulletin defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletinItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub link: String,
    #[serde(rename = "bulletinID")]
    pub bulletin_id: String,
    pub severity: Severity,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_action: Option<String>,
}

/// Billing-update bucket item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub link: String,
    #[serde(rename = "updateID")]
    pub update_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime<Utc>>,
    pub priority: i64,
    pub acknowledgement_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket<T> {
    pub image: String,
    pub items: Vec<T>,
}

impl<T> Bucket<T> {
    pub fn empty(image: impl Into<String>) -> Self {
        Bucket {
            image: image.into(),
            items: Vec::new(),
        }
    }
}

/// Filter values the digest was built with, echoed back for testability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub region: Region,
    pub language: Language,
    pub roles: Vec<Role>,
    pub team_type: TeamType,
    pub audience_group: AudienceGroup,
    pub skill_designations: Vec<SkillDesignation>,
}

impl AppliedFilters {
    pub fn from_preference(preference: &Preference) -> Self {
        AppliedFilters {
            region: preference.region,
            language: preference.language,
            roles: preference.roles.clone(),
            team_type: preference.team_type,
            audience_group: preference.audience_group,
            skill_designations: preference.skill_designations.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCounts {
    pub hot_offers: usize,
    pub technical_bulletins: usize,
    pub billing_updates: usize,
    pub personalized_feed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestDebug {
    pub applied_filters: AppliedFilters,
    pub result_counts: ResultCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The personalized homepage response: four buckets plus the debug block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageDigest {
    pub hot_offers: Bucket<OfferItem>,
    pub technical_bulletins: Bucket<BulletinItem>,
    pub billing_updates: Bucket<BillingItem>,
    pub personalized_feed: Vec<FeedItem>,
    pub debug: DigestDebug,
}
