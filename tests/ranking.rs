use chrono::{DateTime, Utc};
use portal_core::content::record::{parse_date, Severity};
use portal_core::personalization::ranking::{
    rank_billing, rank_bulletins, rank_by_recency, rank_offers,
};
use portal_core::types::digest::{BillingItem, BulletinItem, OfferItem};

fn day(s: &str) -> DateTime<Utc> {
    parse_date(s).expect("test date must parse")
}

fn bulletin(id: &str, priority: i64, severity: Severity, date: Option<&str>) -> BulletinItem {
    BulletinItem {
        title: id.to_string(),
        description: String::new(),
        date: date.map(day),
        link: format!("/articles/{id}"),
        bulletin_id: format!("TB-{id}"),
        severity,
        priority,
        required_action: None,
    }
}

fn billing(id: &str, priority: i64, effective: Option<&str>, date: Option<&str>) -> BillingItem {
    BillingItem {
        title: id.to_string(),
        description: String::new(),
        date: date.map(day),
        link: format!("/articles/{id}"),
        update_id: format!("PBS-{id}"),
        effective_date: effective.map(day),
        priority,
        acknowledgement_required: false,
    }
}

fn offer(title: &str, priority: Option<i64>) -> OfferItem {
    OfferItem {
        title: title.to_string(),
        priority,
        ..Default::default()
    }
}

#[test]
fn recency_orders_newest_first() {
    let mut items = vec![
        ("old", Some(day("2024-01-01"))),
        ("new", Some(day("2024-06-01"))),
        ("mid", Some(day("2024-03-01"))),
    ];
    rank_by_recency(&mut items, |item| item.1);

    let order: Vec<&str> = items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec!["new", "mid", "old"]);
}

#[test]
fn invariant_dateless_records_sort_last_in_input_order() {
    let mut items = vec![
        ("undated-a", None),
        ("dated", Some(day("2024-06-01"))),
        ("undated-b", None),
    ];
    rank_by_recency(&mut items, |item| item.1);

    let order: Vec<&str> = items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec!["dated", "undated-a", "undated-b"]);
}

#[test]
fn invariant_recency_ties_keep_input_order() {
    let tie = Some(day("2024-06-01"));
    let mut items = vec![("first", tie), ("second", tie), ("third", tie)];
    rank_by_recency(&mut items, |item| item.1);

    let order: Vec<&str> = items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn bulletins_order_by_priority_then_severity_then_date() {
    let mut items = vec![
        bulletin("low-pri", 5, Severity::Critical, Some("2024-06-01")),
        bulletin("standard", 1, Severity::Standard, Some("2024-06-01")),
        bulletin("critical", 1, Severity::Critical, Some("2024-01-01")),
        bulletin("newer-standard", 1, Severity::Standard, Some("2024-06-02")),
    ];
    rank_bulletins(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    // Priority 1 before 5; within priority 1 the critical item leads, then
    // the standard items newest-first.
    assert_eq!(
        order,
        vec!["critical", "newer-standard", "standard", "low-pri"]
    );
}

#[test]
fn bulletins_with_equal_keys_keep_input_order() {
    let mut items = vec![
        bulletin("a", 2, Severity::Standard, Some("2024-06-01")),
        bulletin("b", 2, Severity::Standard, Some("2024-06-01")),
    ];
    rank_bulletins(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["a", "b"]);
}

#[test]
fn bulletins_without_dates_do_not_panic_and_sort_after_dated_peers() {
    let mut items = vec![
        bulletin("undated", 1, Severity::Standard, None),
        bulletin("dated", 1, Severity::Standard, Some("2024-06-01")),
    ];
    rank_bulletins(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["dated", "undated"]);
}

#[test]
fn billing_orders_by_priority_then_soonest_effective_date() {
    let mut items = vec![
        billing("later", 1, Some("2024-09-01"), None),
        billing("sooner", 1, Some("2024-07-01"), None),
        billing("urgent", 0, Some("2024-12-01"), None),
    ];
    rank_billing(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["urgent", "sooner", "later"]);
}

#[test]
fn billing_falls_back_to_item_date_when_effective_date_missing() {
    let mut items = vec![
        billing("by-item-date", 1, None, Some("2024-08-01")),
        billing("by-effective", 1, Some("2024-07-01"), Some("2024-01-01")),
    ];
    rank_billing(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["by-effective", "by-item-date"]);
}

#[test]
fn offers_order_by_priority_with_missing_last() {
    let mut items = vec![
        offer("unprioritized", None),
        offer("second", Some(2)),
        offer("first", Some(1)),
    ];
    rank_offers(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "unprioritized"]);
}

#[test]
fn invariant_offer_ties_keep_input_order() {
    let mut items = vec![
        offer("a", Some(1)),
        offer("b", Some(1)),
        offer("c", None),
        offer("d", None),
    ];
    rank_offers(&mut items);

    let order: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}
