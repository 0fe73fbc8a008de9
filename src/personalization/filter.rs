use crate::content::record::AudienceTags;
use crate::preference::model::{Preference, Region};

/// One personalization dimension of a content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Language,
    Region,
    Roles,
    TeamType,
    AudienceGroup,
    Skills,
    ProductFocus,
}

/// Dimension subsets checked per surface.
pub const OFFER_DIMENSIONS: &[Dimension] =
    &[Dimension::Region, Dimension::Language, Dimension::TeamType];
pub const BULLETIN_DIMENSIONS: &[Dimension] = &[
    Dimension::Roles,
    Dimension::Region,
    Dimension::Skills,
    Dimension::Language,
];
pub const BILLING_DIMENSIONS: &[Dimension] =
    &[Dimension::Region, Dimension::Skills, Dimension::Language];
pub const FEED_DIMENSIONS: &[Dimension] = &[
    Dimension::Language,
    Dimension::Roles,
    Dimension::Region,
    Dimension::AudienceGroup,
    Dimension::Skills,
];

/// Is this record visible to this viewer along the checked dimensions?
///
/// Pure predicate. A dimension passes when the record carries no tags for
/// it, when its tag list names the `all` sentinel, or when the viewer's
/// value appears in the list; every checked dimension must pass.
pub fn is_eligible(tags: &AudienceTags, preference: &Preference, dimensions: &[Dimension]) -> bool {
    dimensions
        .iter()
        .all(|dimension| dimension_passes(*dimension, tags, preference))
}

fn dimension_passes(dimension: Dimension, tags: &AudienceTags, preference: &Preference) -> bool {
    match dimension {
        Dimension::Language => tags.languages.allows(preference.language.as_str()),
        Dimension::Region => {
            // A viewer in the `all` region sees everything: region filtering
            // is skipped outright, whatever the record is tagged with.
            if preference.region == Region::All {
                return true;
            }
            tags.regions.allows(preference.region.as_str())
        }
        Dimension::Roles => tags
            .roles
            .allows_any(preference.roles.iter().map(|role| role.as_str())),
        Dimension::TeamType => tags.team_types.allows(preference.team_type.as_str()),
        Dimension::AudienceGroup => tags
            .audience_groups
            .allows(preference.audience_group.as_str()),
        Dimension::Skills => {
            // A viewer with no skills selected is not excluded by skill tags.
            if preference.skill_designations.is_empty() {
                return true;
            }
            tags.skill_designations.allows_any(
                preference
                    .skill_designations
                    .iter()
                    .map(|skill| skill.as_str()),
            )
        }
        Dimension::ProductFocus => {
            if preference.product_focus.is_empty() {
                return true;
            }
            tags.product_focus.allows_any(
                preference
                    .product_focus
                    .iter()
                    .map(|product| product.as_str()),
            )
        }
    }
}
