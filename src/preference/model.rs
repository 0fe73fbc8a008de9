use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::ContentId;

#[derive(Debug, Error)]
#[error("Unknown {field} value: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

macro_rules! enum_str {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(ParseEnumError {
                        field: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

enum_str!(Language { En => "en", Fr => "fr" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    All,
    Qc,
    On,
    AbBc,
    Atlantic,
    MbSk,
}

enum_str!(Region {
    All => "all",
    Qc => "qc",
    On => "on",
    AbBc => "ab-bc",
    Atlantic => "atlantic",
    MbSk => "mb-sk",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Technician,
    Manager,
    Admin,
    Partner,
}

enum_str!(Role {
    Technician => "technician",
    Manager => "manager",
    Admin => "admin",
    Partner => "partner",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamType {
    Home,
    Partner,
    CustomHome,
}

enum_str!(TeamType {
    Home => "home",
    Partner => "partner",
    CustomHome => "custom_home",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudienceGroup {
    Tech,
    Manager,
    Owner,
    Trainer,
    PartnerTech,
}

enum_str!(AudienceGroup {
    Tech => "tech",
    Manager => "manager",
    Owner => "owner",
    Trainer => "trainer",
    PartnerTech => "partnerTech",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillDesignation {
    #[serde(rename = "copper")]
    Copper,
    #[serde(rename = "fiber")]
    Fiber,
    #[serde(rename = "wifi_plus")]
    WifiPlus,
    #[serde(rename = "shs")]
    Shs,
    #[serde(rename = "tv")]
    Tv,
    #[serde(rename = "clec-qc")]
    ClecQc,
    #[serde(rename = "ilec-qc")]
    IlecQc,
}

enum_str!(SkillDesignation {
    Copper => "copper",
    Fiber => "fiber",
    WifiPlus => "wifi_plus",
    Shs => "shs",
    Tv => "tv",
    ClecQc => "clec-qc",
    IlecQc => "ilec-qc",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFocus {
    #[serde(rename = "SHS")]
    Shs,
    #[serde(rename = "TV")]
    Tv,
    #[serde(rename = "Internet")]
    Internet,
    #[serde(rename = "WiFi")]
    WiFi,
    #[serde(rename = "ValueGen")]
    ValueGen,
    #[serde(rename = "Custom Home")]
    CustomHome,
}

enum_str!(ProductFocus {
    Shs => "SHS",
    Tv => "TV",
    Internet => "Internet",
    WiFi => "WiFi",
    ValueGen => "ValueGen",
    CustomHome => "Custom Home",
});

/// The viewer's stored personalization profile.
///
/// Invariants held by every mutation:
/// - `roles` is never empty (removing the last role reinstates `Technician`)
/// - `primary_role` is always a current member of `roles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub language: Language,
    pub region: Region,
    pub roles: Vec<Role>,
    pub primary_role: Role,
    pub team_type: TeamType,
    pub audience_group: AudienceGroup,
    #[serde(default)]
    pub skill_designations: Vec<SkillDesignation>,
    #[serde(default)]
    pub product_focus: Vec<ProductFocus>,
    #[serde(default)]
    pub favorites: Vec<ContentId>,
}

impl Default for Preference {
    fn default() -> Self {
        Preference {
            language: Language::En,
            region: Region::All,
            roles: vec![Role::Technician],
            primary_role: Role::Technician,
            team_type: TeamType::Home,
            audience_group: AudienceGroup::Tech,
            skill_designations: Vec::new(),
            product_focus: Vec::new(),
            favorites: Vec::new(),
        }
    }
}

impl Preference {
    /// Each setter returns whether the profile actually changed, so the
    /// caller can skip persisting no-op mutations.
    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = self.language != language;
        self.language = language;
        changed
    }

    pub fn set_region(&mut self, region: Region) -> bool {
        let changed = self.region != region;
        self.region = region;
        changed
    }

    pub fn set_team_type(&mut self, team_type: TeamType) -> bool {
        let changed = self.team_type != team_type;
        self.team_type = team_type;
        changed
    }

    pub fn set_audience_group(&mut self, audience_group: AudienceGroup) -> bool {
        let changed = self.audience_group != audience_group;
        self.audience_group = audience_group;
        changed
    }

    pub fn set_skill_designations(&mut self, skills: Vec<SkillDesignation>) -> bool {
        let changed = self.skill_designations != skills;
        self.skill_designations = skills;
        changed
    }

    pub fn set_product_focus(&mut self, products: Vec<ProductFocus>) -> bool {
        let changed = self.product_focus != products;
        self.product_focus = products;
        changed
    }

    pub fn add_role(&mut self, role: Role) -> bool {
        if self.roles.contains(&role) {
            return false;
        }
        self.roles.push(role);
        true
    }

    pub fn remove_role(&mut self, role: Role) -> bool {
        // The default role cannot be removed when it is the only one left.
        if self.roles.len() == 1 && role == Role::Technician && self.roles[0] == role {
            return false;
        }
        if !self.roles.contains(&role) {
            return false;
        }

        self.roles.retain(|r| *r != role);
        if self.roles.is_empty() {
            self.roles.push(Role::Technician);
        }
        if self.primary_role == role {
            self.primary_role = self.roles[0];
        }
        true
    }

    pub fn toggle_role(&mut self, role: Role) -> bool {
        if self.roles.contains(&role) {
            // Never toggle away the only remaining role.
            if self.roles.len() == 1 {
                return false;
            }
            self.roles.retain(|r| *r != role);
            if self.primary_role == role {
                self.primary_role = self.roles[0];
            }
        } else {
            self.roles.push(role);
        }
        true
    }

    /// No-op unless the viewer currently holds `role`.
    pub fn set_primary_role(&mut self, role: Role) -> bool {
        if !self.roles.contains(&role) || self.primary_role == role {
            return false;
        }
        self.primary_role = role;
        true
    }

    pub fn toggle_favorite(&mut self, id: ContentId) -> bool {
        if let Some(pos) = self.favorites.iter().position(|f| *f == id) {
            self.favorites.remove(pos);
        } else {
            self.favorites.push(id);
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Preference::default();
    }
}

/// Permissive on-disk shape of a stored preference payload.
///
/// Accepts both the current schema and the legacy single-`role` schema;
/// `into_preference` upgrades either into a valid [`Preference`], merging
/// missing fields over the defaults. The legacy field is discarded.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredPreference {
    pub language: Option<Language>,
    pub region: Option<Region>,
    pub role: Option<Role>,
    pub roles: Option<Vec<Role>>,
    pub primary_role: Option<Role>,
    pub team_type: Option<TeamType>,
    pub audience_group: Option<AudienceGroup>,
    pub skill_designations: Option<Vec<SkillDesignation>>,
    pub product_focus: Option<Vec<ProductFocus>>,
    pub favorites: Option<Vec<ContentId>>,
}

impl StoredPreference {
    pub fn into_preference(self) -> Preference {
        let mut pref = Preference::default();

        if let Some(language) = self.language {
            pref.language = language;
        }
        if let Some(region) = self.region {
            pref.region = region;
        }
        if let Some(team_type) = self.team_type {
            pref.team_type = team_type;
        }
        if let Some(audience_group) = self.audience_group {
            pref.audience_group = audience_group;
        }
        if let Some(skills) = self.skill_designations {
            pref.skill_designations = skills;
        }
        if let Some(products) = self.product_focus {
            pref.product_focus = products;
        }
        if let Some(favorites) = self.favorites {
            pref.favorites = favorites;
        }

        pref.roles = match (self.roles, self.role) {
            (Some(roles), _) if !roles.is_empty() => roles,
            (_, Some(legacy)) => vec![legacy],
            _ => pref.roles,
        };

        // primary_role must end up as a member of roles, whatever the payload said.
        let stored_primary = self.primary_role.or(self.role);
        pref.primary_role = match stored_primary {
            Some(primary) if pref.roles.contains(&primary) => primary,
            _ => pref.roles[0],
        };

        pref
    }
}
