use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::content::record::Severity;
use crate::types::digest::{BillingItem, BulletinItem, OfferItem};

/// Missing priorities sort after every explicit one.
const MISSING_PRIORITY: i64 = i64::MAX;

/// Newest first; dateless records after all dated ones. All sorts in this
/// module are stable: equal keys keep their input order.
pub fn rank_by_recency<T>(items: &mut [T], effective_date: impl Fn(&T) -> Option<DateTime<Utc>>) {
    items.sort_by(|a, b| compare_dates_desc(effective_date(a), effective_date(b)));
}

/// Bulletin order: priority ascending, then critical severity first, then
/// newest first.
pub fn rank_bulletins(items: &mut [BulletinItem]) {
    items.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| severity_rank(a.severity).cmp(&severity_rank(b.severity)))
            .then_with(|| compare_dates_desc(a.date, b.date))
    });
}

/// Billing order: priority ascending, then soonest effective date first
/// (the item date stands in when no effective date is set).
pub fn rank_billing(items: &mut [BillingItem]) {
    items.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| compare_dates_asc(a.effective_date.or(a.date), b.effective_date.or(b.date)))
    });
}

/// Offer order: priority ascending only; unprioritized offers sort last.
pub fn rank_offers(items: &mut [OfferItem]) {
    items.sort_by_key(|offer| offer.priority.unwrap_or(MISSING_PRIORITY));
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 0,
        _ => 1,
    }
}

fn compare_dates_desc(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_dates_asc(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
