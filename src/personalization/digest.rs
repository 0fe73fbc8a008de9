use thiserror::Error;
use tracing::warn;

use super::filter::{
    is_eligible, BILLING_DIMENSIONS, BULLETIN_DIMENSIONS, FEED_DIMENSIONS, OFFER_DIMENSIONS,
};
use super::ranking::{rank_billing, rank_bulletins, rank_offers};
use crate::content::catalog::ContentCatalog;
use crate::content::record::{parse_date, CatalogRecord, Severity};
use crate::preference::model::Preference;
use crate::types::digest::{
    AppliedFilters, BillingItem, Bucket, BulletinItem, DigestDebug, FeedItem, HomepageDigest,
    HomepageSource, OfferItem, ResultCounts,
};

pub const DEFAULT_OFFERS_IMAGE: &str = "/images/hot-offers.jpg";
pub const DEFAULT_BULLETINS_IMAGE: &str = "/images/tech-bulletins.jpg";
pub const DEFAULT_BILLING_IMAGE: &str = "/images/billing-updates.jpg";

const DEFAULT_BULLETIN_PRIORITY: i64 = 3;
const DEFAULT_BILLING_PRIORITY: i64 = 3;

#[derive(Debug, Error)]
#[error("Classification failed: {0}")]
pub struct ClassifyError(pub String);

/// Decides bucket membership for a catalog record.
///
/// Injectable so the digest's fault isolation can be exercised with a
/// failing implementation.
pub trait Classifier {
    fn is_technical_bulletin(&self, record: &CatalogRecord) -> Result<bool, ClassifyError>;
    fn is_billing_update(&self, record: &CatalogRecord) -> Result<bool, ClassifyError>;
}

/// Case-insensitive substring match against `type`, `category`, and each tag.
#[derive(Debug, Clone, Default)]
pub struct TermClassifier;

impl TermClassifier {
    fn matches_any(record: &CatalogRecord, terms: &[&str]) -> bool {
        let raw = record.raw();
        raw.kind
            .iter()
            .chain(raw.category.iter())
            .chain(raw.tags.iter())
            .any(|field| {
                let lower = field.to_lowercase();
                terms.iter().any(|term| lower.contains(term))
            })
    }
}

impl Classifier for TermClassifier {
    fn is_technical_bulletin(&self, record: &CatalogRecord) -> Result<bool, ClassifyError> {
        Ok(Self::matches_any(record, &["technical", "bulletin"]))
    }

    fn is_billing_update(&self, record: &CatalogRecord) -> Result<bool, ClassifyError> {
        Ok(Self::matches_any(record, &["billing"]))
    }
}

/// Assembles the four homepage buckets for one viewer.
///
/// Buckets are independent: a classification failure degrades that bucket
/// to an empty item list under its carried-over artwork and leaves the
/// other three untouched.
pub struct DigestBuilder<C> {
    classifier: C,
}

impl Default for DigestBuilder<TermClassifier> {
    fn default() -> Self {
        Self {
            classifier: TermClassifier,
        }
    }
}

impl<C: Classifier> DigestBuilder<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn build(
        &self,
        catalog: &ContentCatalog,
        source: &HomepageSource,
        preference: &Preference,
    ) -> HomepageDigest {
        // 1. Hot offers, from the source inventory
        let hot_offers = build_offers(source, preference);

        // 2. Technical bulletins, classified out of the catalog
        let technical_bulletins = self
            .build_bulletins(catalog, source, preference)
            .unwrap_or_else(|err| {
                warn!(error = %err, "technical-bulletins bucket degraded to empty");
                Bucket::empty(bulletins_image(source))
            });

        // 3. Billing updates, classified out of the catalog
        let billing_updates = self
            .build_billing(catalog, source, preference)
            .unwrap_or_else(|err| {
                warn!(error = %err, "billing-updates bucket degraded to empty");
                Bucket::empty(billing_image(source))
            });

        // 4. Personalized feed, filtered in source order
        let personalized_feed = build_feed(source, preference);

        let result_counts = ResultCounts {
            hot_offers: hot_offers.items.len(),
            technical_bulletins: technical_bulletins.items.len(),
            billing_updates: billing_updates.items.len(),
            personalized_feed: personalized_feed.len(),
        };

        HomepageDigest {
            hot_offers,
            technical_bulletins,
            billing_updates,
            personalized_feed,
            debug: DigestDebug {
                applied_filters: AppliedFilters::from_preference(preference),
                result_counts,
                error: None,
            },
        }
    }

    fn build_bulletins(
        &self,
        catalog: &ContentCatalog,
        source: &HomepageSource,
        preference: &Preference,
    ) -> Result<Bucket<BulletinItem>, ClassifyError> {
        let mut items = Vec::new();
        for record in catalog.records() {
            if !self.classifier.is_technical_bulletin(record)? {
                continue;
            }
            if !is_eligible(&record.audience, preference, BULLETIN_DIMENSIONS) {
                continue;
            }
            items.push(reshape_bulletin(record));
        }
        rank_bulletins(&mut items);
        Ok(Bucket {
            image: bulletins_image(source),
            items,
        })
    }

    fn build_billing(
        &self,
        catalog: &ContentCatalog,
        source: &HomepageSource,
        preference: &Preference,
    ) -> Result<Bucket<BillingItem>, ClassifyError> {
        let mut items = Vec::new();
        for record in catalog.records() {
            if !self.classifier.is_billing_update(record)? {
                continue;
            }
            if !is_eligible(&record.audience, preference, BILLING_DIMENSIONS) {
                continue;
            }
            items.push(reshape_billing(record));
        }
        rank_billing(&mut items);
        Ok(Bucket {
            image: billing_image(source),
            items,
        })
    }
}

fn build_offers(source: &HomepageSource, preference: &Preference) -> Bucket<OfferItem> {
    let mut items: Vec<OfferItem> = source
        .hot_offers
        .items
        .iter()
        .filter(|offer| is_eligible(&offer.audience_tags(), preference, OFFER_DIMENSIONS))
        .cloned()
        .collect();
    rank_offers(&mut items);
    Bucket {
        image: offers_image(source),
        items,
    }
}

fn build_feed(source: &HomepageSource, preference: &Preference) -> Vec<FeedItem> {
    // Source order is the feed order; no re-ranking.
    source
        .personalized_feed
        .iter()
        .filter(|item| is_eligible(&item.audience_tags(), preference, FEED_DIMENSIONS))
        .cloned()
        .collect()
}

fn reshape_bulletin(record: &CatalogRecord) -> BulletinItem {
    let raw = record.raw();
    BulletinItem {
        title: raw.title.clone(),
        description: record.description.clone(),
        date: record.effective_date,
        link: record.link(),
        bulletin_id: raw
            .bulletin_id
            .clone()
            .unwrap_or_else(|| format!("TB-{}", record.id())),
        severity: record.severity.unwrap_or(Severity::Standard),
        priority: raw.priority.unwrap_or(DEFAULT_BULLETIN_PRIORITY),
        required_action: raw.required_action.clone(),
    }
}

fn reshape_billing(record: &CatalogRecord) -> BillingItem {
    let raw = record.raw();
    BillingItem {
        title: raw.title.clone(),
        description: record.description.clone(),
        date: record.effective_date,
        link: record.link(),
        update_id: raw
            .update_id
            .clone()
            .unwrap_or_else(|| format!("PBS-{}", record.id())),
        effective_date: raw
            .effective_date
            .as_deref()
            .and_then(parse_date)
            .or(record.effective_date),
        priority: raw.priority.unwrap_or(DEFAULT_BILLING_PRIORITY),
        acknowledgement_required: raw.acknowledgement_required.unwrap_or(false),
    }
}

fn offers_image(source: &HomepageSource) -> String {
    source
        .hot_offers
        .image
        .clone()
        .unwrap_or_else(|| DEFAULT_OFFERS_IMAGE.to_string())
}

fn bulletins_image(source: &HomepageSource) -> String {
    source
        .technical_bulletins
        .image
        .clone()
        .unwrap_or_else(|| DEFAULT_BULLETINS_IMAGE.to_string())
}

fn billing_image(source: &HomepageSource) -> String {
    source
        .billing_updates
        .image
        .clone()
        .unwrap_or_else(|| DEFAULT_BILLING_IMAGE.to_string())
}

/// The all-empty digest returned when assembling the whole response fails.
pub fn empty_digest(
    source: &HomepageSource,
    preference: &Preference,
    error: impl Into<String>,
) -> HomepageDigest {
    HomepageDigest {
        hot_offers: Bucket::empty(offers_image(source)),
        technical_bulletins: Bucket::empty(bulletins_image(source)),
        billing_updates: Bucket::empty(billing_image(source)),
        personalized_feed: Vec::new(),
        debug: DigestDebug {
            applied_filters: AppliedFilters::from_preference(preference),
            result_counts: ResultCounts::default(),
            error: Some(error.into()),
        },
    }
}
