use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulnessRecord {
    pub content_id: String,
    pub helpful: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub content_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub page_url: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total_feedback: usize,
    pub helpful: usize,
    pub not_helpful: usize,
    pub helpful_percentage: u32,
    pub issues: usize,
}

/// Append-only feedback storage, keyed by content id.
pub trait FeedbackRepository {
    fn append_helpfulness(&mut self, record: HelpfulnessRecord);
    fn append_issue(&mut self, record: IssueRecord);
    /// Tallies for one record, or for the whole store when `content_id` is `None`.
    fn stats(&self, content_id: Option<&str>) -> FeedbackStats;
}

#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    helpfulness: Vec<HelpfulnessRecord>,
    issues: Vec<IssueRecord>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackRepository for MemoryFeedbackStore {
    fn append_helpfulness(&mut self, record: HelpfulnessRecord) {
        self.helpfulness.push(record);
    }

    fn append_issue(&mut self, record: IssueRecord) {
        self.issues.push(record);
    }

    fn stats(&self, content_id: Option<&str>) -> FeedbackStats {
        let matches = |candidate: &str| content_id.is_none() || content_id == Some(candidate);

        let total_feedback = self
            .helpfulness
            .iter()
            .filter(|record| matches(&record.content_id))
            .count();
        let helpful = self
            .helpfulness
            .iter()
            .filter(|record| matches(&record.content_id) && record.helpful)
            .count();
        let issues = self
            .issues
            .iter()
            .filter(|record| matches(&record.content_id))
            .count();

        let helpful_percentage = if total_feedback > 0 {
            ((helpful as f64 / total_feedback as f64) * 100.0).round() as u32
        } else {
            0
        };

        FeedbackStats {
            total_feedback,
            helpful,
            not_helpful: total_feedback - helpful,
            helpful_percentage,
            issues,
        }
    }
}
