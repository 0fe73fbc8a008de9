use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Utc;
use tracing::error;

use super::requests::{
    AlertList, ContentListing, FeedbackAck, FeedbackSubmission, HomepageRequest,
    ListContentRequest, ListContentResponse, NewAlert, OutOfDateStatus, SearchRequest,
    SetOutOfDateRequest,
};
use super::ApiError;
use crate::content::catalog::ContentCatalog;
use crate::content::record::{ArticleSummary, CatalogRecord, ContentRecord};
use crate::personalization::digest::{empty_digest, Classifier, DigestBuilder, TermClassifier};
use crate::personalization::filter::{is_eligible, Dimension};
use crate::personalization::ranking::rank_by_recency;
use crate::preference::model::Preference;
use crate::search::{search, FieldWeights, SearchResults};
use crate::stores::alerts::{
    AlertDraft, AlertPatch, AlertQuery, AlertRepository, MemoryAlertStore, SystemAlert,
};
use crate::stores::feedback::{
    FeedbackRepository, FeedbackStats, HelpfulnessRecord, IssueRecord, MemoryFeedbackStore,
};
use crate::stores::flags::{FlagRepository, MemoryFlagStore};
use crate::types::digest::{HomepageDigest, HomepageSource};
use crate::types::identifiers::ContentId;

const JOB_AID_TYPES: &[&str] = &["Guide", "Technology", "Alert", "Comparison"];
const JOB_AID_CATEGORIES: &[&str] = &[
    "Installation",
    "Troubleshooting",
    "Safety",
    "Technical Bulletin",
];

/// The portal's request surface: one synchronous entry point per endpoint,
/// all reading the same immutable catalog snapshot.
///
/// The demo repositories are injected so nothing in the pipeline touches
/// shared mutable state directly.
pub struct Portal<C = TermClassifier> {
    catalog: ContentCatalog,
    homepage_source: HomepageSource,
    digest: DigestBuilder<C>,
    weights: FieldWeights,
    feedback: Box<dyn FeedbackRepository>,
    alerts: Box<dyn AlertRepository>,
    flags: Box<dyn FlagRepository>,
}

impl Portal<TermClassifier> {
    pub fn new(catalog: ContentCatalog, homepage_source: HomepageSource) -> Self {
        Self::with_classifier(catalog, homepage_source, TermClassifier)
    }
}

impl<C: Classifier> Portal<C> {
    pub fn with_classifier(
        catalog: ContentCatalog,
        homepage_source: HomepageSource,
        classifier: C,
    ) -> Self {
        Portal {
            catalog,
            homepage_source,
            digest: DigestBuilder::new(classifier),
            weights: FieldWeights::default(),
            feedback: Box::new(MemoryFeedbackStore::new()),
            alerts: Box::new(MemoryAlertStore::new()),
            flags: Box::new(MemoryFlagStore::new()),
        }
    }

    pub fn with_feedback_store(mut self, store: Box<dyn FeedbackRepository>) -> Self {
        self.feedback = store;
        self
    }

    pub fn with_alert_store(mut self, store: Box<dyn AlertRepository>) -> Self {
        self.alerts = store;
        self
    }

    pub fn with_flag_store(mut self, store: Box<dyn FlagRepository>) -> Self {
        self.flags = store;
        self
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// List content records, filtered and recency-sorted.
    ///
    /// An explicit id list overrides the other filters and preserves
    /// catalog order.
    pub fn list_content(&self, request: &ListContentRequest) -> ListContentResponse {
        let selected: Vec<&CatalogRecord> = if !request.ids.is_empty() {
            self.catalog
                .records()
                .iter()
                .filter(|record| request.ids.iter().any(|id| id == record.id().as_str()))
                .collect()
        } else {
            let region_probe = request.region.map(|region| Preference {
                region,
                ..Preference::default()
            });
            let query = request.query.as_deref().map(str::to_lowercase);

            let mut filtered: Vec<&CatalogRecord> = self
                .catalog
                .records()
                .iter()
                .filter(|record| {
                    request
                        .category
                        .as_deref()
                        .map_or(true, |category| record.matches_category(category))
                })
                .filter(|record| {
                    region_probe.as_ref().map_or(true, |probe| {
                        is_eligible(&record.audience, probe, &[Dimension::Region])
                    })
                })
                .filter(|record| {
                    query
                        .as_deref()
                        .map_or(true, |query| record_matches_query(record, query))
                })
                .collect();

            rank_by_recency(&mut filtered, |record| record.effective_date);
            filtered
        };

        let articles = selected
            .into_iter()
            .map(|record| {
                if request.full {
                    ContentListing::Full(record.full())
                } else {
                    ContentListing::Summary(record.summary())
                }
            })
            .collect();

        ListContentResponse { articles }
    }

    pub fn get_content(&self, id: &str) -> Result<ContentRecord, ApiError> {
        let id = ContentId::new(id)
            .map_err(|_| ApiError::Validation("Content id is required".to_string()))?;
        self.catalog
            .get(&id)
            .map(CatalogRecord::full)
            .ok_or_else(|| ApiError::NotFound(format!("No content record with id {id}")))
    }

    pub fn homepage(&self, request: &HomepageRequest) -> HomepageDigest {
        self.homepage_for(&request.to_preference())
    }

    /// Build the digest for a full stored profile.
    ///
    /// Outer guard: if assembly panics, the caller still gets a well-formed,
    /// all-empty digest with the failure described in the debug block.
    pub fn homepage_for(&self, preference: &Preference) -> HomepageDigest {
        let assembled = catch_unwind(AssertUnwindSafe(|| {
            self.digest
                .build(&self.catalog, &self.homepage_source, preference)
        }));
        match assembled {
            Ok(digest) => digest,
            Err(panic) => {
                let reason = panic_message(&panic);
                error!(%reason, "homepage digest assembly failed");
                empty_digest(
                    &self.homepage_source,
                    preference,
                    format!("Failed to load personalized homepage content: {reason}"),
                )
            }
        }
    }

    pub fn search(&self, request: &SearchRequest) -> SearchResults {
        search(&self.catalog, &request.q, request.lang, &self.weights)
    }

    pub fn submit_feedback(
        &mut self,
        submission: FeedbackSubmission,
    ) -> Result<FeedbackAck, ApiError> {
        let feedback_type = require(submission.feedback_type, "feedbackType")?;
        let content_id = require(submission.content_id, "contentId")?;
        let timestamp = Utc::now();

        match feedback_type.as_str() {
            "helpfulness" => {
                let helpful = submission.is_helpful.ok_or_else(|| {
                    ApiError::Validation(
                        "isHelpful is required for helpfulness feedback".to_string(),
                    )
                })?;
                self.feedback.append_helpfulness(HelpfulnessRecord {
                    content_id,
                    helpful,
                    timestamp,
                });
                Ok(FeedbackAck {
                    success: true,
                    message: "Thank you for your feedback".to_string(),
                })
            }
            "issue" => {
                let page_url = require(submission.page_url, "pageUrl")?;
                let description = require(submission.issue, "issue")?;
                self.feedback.append_issue(IssueRecord {
                    content_id,
                    name: submission.name,
                    email: submission.email,
                    page_url,
                    description,
                    timestamp,
                });
                Ok(FeedbackAck {
                    success: true,
                    message: "Thank you for reporting this issue. Our team will review it."
                        .to_string(),
                })
            }
            other => Err(ApiError::Validation(format!(
                "Unknown feedback type: {other}"
            ))),
        }
    }

    pub fn feedback_stats(&self, content_id: Option<&str>) -> FeedbackStats {
        self.feedback.stats(content_id)
    }

    pub fn out_of_date(&self, content_id: &str) -> Result<OutOfDateStatus, ApiError> {
        if content_id.trim().is_empty() {
            return Err(ApiError::Validation("contentId is required".to_string()));
        }
        Ok(OutOfDateStatus {
            content_id: content_id.to_string(),
            out_of_date: self.flags.is_out_of_date(content_id),
        })
    }

    pub fn set_out_of_date(
        &mut self,
        request: SetOutOfDateRequest,
    ) -> Result<OutOfDateStatus, ApiError> {
        let content_id = require(request.content_id, "contentId")?;
        let out_of_date = request
            .out_of_date
            .ok_or_else(|| ApiError::Validation("outOfDate is required".to_string()))?;

        self.flags.set_out_of_date(&content_id, out_of_date);
        Ok(OutOfDateStatus {
            content_id,
            out_of_date,
        })
    }

    pub fn list_alerts(&self, query: &AlertQuery) -> AlertList {
        AlertList {
            alerts: self.alerts.list(query),
        }
    }

    pub fn create_alert(&mut self, request: NewAlert) -> Result<SystemAlert, ApiError> {
        let draft = AlertDraft {
            title: require(request.title, "title")?,
            message: require(request.message, "message")?,
            kind: require(request.kind, "type")?,
            severity: request
                .severity
                .ok_or_else(|| ApiError::Validation("severity is required".to_string()))?,
            start_time: request.start_time,
            estimated_resolution: request.estimated_resolution,
            affected_systems: request.affected_systems,
            active: request.active.unwrap_or(true),
        };
        Ok(self.alerts.create(draft))
    }

    pub fn update_alert(&mut self, id: &str, patch: AlertPatch) -> Result<SystemAlert, ApiError> {
        self.alerts
            .update(id, patch)
            .ok_or_else(|| ApiError::NotFound(format!("No alert with id {id}")))
    }

    /// Records suitable as job aids for the learning surface, in catalog order.
    pub fn job_aids(&self, limit: usize) -> Vec<ArticleSummary> {
        self.catalog
            .records()
            .iter()
            .filter(|record| {
                let raw = record.raw();
                raw.kind
                    .as_deref()
                    .map_or(false, |kind| JOB_AID_TYPES.contains(&kind))
                    || raw
                        .category
                        .as_deref()
                        .map_or(false, |category| JOB_AID_CATEGORIES.contains(&category))
            })
            .take(limit)
            .map(CatalogRecord::summary)
            .collect()
    }
}

fn record_matches_query(record: &CatalogRecord, query: &str) -> bool {
    let raw = record.raw();
    raw.title.to_lowercase().contains(query)
        || raw
            .subtitle
            .as_deref()
            .map_or(false, |subtitle| subtitle.to_lowercase().contains(query))
        || raw.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
