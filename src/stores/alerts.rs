use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::preference::model::ParseEnumError;

/// Alert severities, ordered so a minimum-severity filter can compare them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Moderate,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Moderate => "moderate",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl std::str::FromStr for AlertSeverity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AlertSeverity::Low),
            "moderate" => Ok(AlertSeverity::Moderate),
            "warning" => Ok(AlertSeverity::Warning),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(ParseEnumError {
                field: "AlertSeverity",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNote {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_resolution: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected_systems: Vec<String>,
    #[serde(default)]
    pub updates: Vec<AlertNote>,
    pub active: bool,
}

/// A validated alert ready for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub kind: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub start_time: Option<DateTime<Utc>>,
    pub estimated_resolution: Option<DateTime<Utc>>,
    pub affected_systems: Vec<String>,
    pub active: bool,
}

/// Field updates for an existing alert. `note` appends a timestamped entry
/// to the alert's update history rather than replacing anything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub active: Option<bool>,
    pub estimated_resolution: Option<DateTime<Utc>>,
    pub actual_resolution: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertQuery {
    pub active_only: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub min_severity: Option<AlertSeverity>,
}

impl Default for AlertQuery {
    fn default() -> Self {
        AlertQuery {
            active_only: true,
            kind: None,
            min_severity: None,
        }
    }
}

pub trait AlertRepository {
    fn list(&self, query: &AlertQuery) -> Vec<SystemAlert>;
    fn create(&mut self, draft: AlertDraft) -> SystemAlert;
    /// `None` when no alert has the given id.
    fn update(&mut self, id: &str, patch: AlertPatch) -> Option<SystemAlert>;
}

#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    alerts: Vec<SystemAlert>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alerts(alerts: Vec<SystemAlert>) -> Self {
        MemoryAlertStore { alerts }
    }
}

impl AlertRepository for MemoryAlertStore {
    fn list(&self, query: &AlertQuery) -> Vec<SystemAlert> {
        self.alerts
            .iter()
            .filter(|alert| !query.active_only || alert.active)
            .filter(|alert| {
                query
                    .kind
                    .as_deref()
                    .map_or(true, |kind| alert.kind == kind)
            })
            .filter(|alert| {
                query
                    .min_severity
                    .map_or(true, |minimum| alert.severity >= minimum)
            })
            .cloned()
            .collect()
    }

    fn create(&mut self, draft: AlertDraft) -> SystemAlert {
        let alert = SystemAlert {
            id: format!("sys-{:03}", self.alerts.len() + 1),
            kind: draft.kind,
            severity: draft.severity,
            title: draft.title,
            message: draft.message,
            start_time: draft.start_time.unwrap_or_else(Utc::now),
            estimated_resolution: draft.estimated_resolution,
            actual_resolution: None,
            affected_systems: draft.affected_systems,
            updates: Vec::new(),
            active: draft.active,
        };
        self.alerts.push(alert.clone());
        alert
    }

    fn update(&mut self, id: &str, patch: AlertPatch) -> Option<SystemAlert> {
        let alert = self.alerts.iter_mut().find(|alert| alert.id == id)?;

        if let Some(title) = patch.title {
            alert.title = title;
        }
        if let Some(message) = patch.message {
            alert.message = message;
        }
        if let Some(kind) = patch.kind {
            alert.kind = kind;
        }
        if let Some(severity) = patch.severity {
            alert.severity = severity;
        }
        if let Some(active) = patch.active {
            alert.active = active;
        }
        if let Some(estimated) = patch.estimated_resolution {
            alert.estimated_resolution = Some(estimated);
        }
        if let Some(actual) = patch.actual_resolution {
            alert.actual_resolution = Some(actual);
        }
        if let Some(note) = patch.note {
            alert.updates.push(AlertNote {
                timestamp: Utc::now(),
                message: note,
            });
        }

        Some(alert.clone())
    }
}
