use portal_core::content::catalog::{CatalogError, ContentCatalog};
use portal_core::content::record::{
    parse_date, CatalogRecord, ContentBody, ContentRecord, Severity,
};
use portal_core::types::identifiers::ContentId;

fn record(id: &str, title: &str) -> ContentRecord {
    ContentRecord {
        id: id.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn invariant_duplicate_ids_fail_the_whole_load() {
    let result = ContentCatalog::from_records(vec![
        record("a1", "First"),
        record("a2", "Second"),
        record("a1", "Duplicate"),
    ]);

    assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a1"));
}

#[test]
fn invariant_fingerprint_is_order_independent() {
    let forward =
        ContentCatalog::from_records(vec![record("a1", "First"), record("a2", "Second")]).unwrap();
    let reversed =
        ContentCatalog::from_records(vec![record("a2", "Second"), record("a1", "First")]).unwrap();

    assert_eq!(forward.version(), reversed.version());
}

#[test]
fn invariant_fingerprint_tracks_content_changes() {
    let original =
        ContentCatalog::from_records(vec![record("a1", "First")]).unwrap();
    let retitled =
        ContentCatalog::from_records(vec![record("a1", "First, revised")]).unwrap();

    assert_ne!(original.version(), retitled.version());
}

#[test]
fn records_keep_source_order_and_are_indexed_by_id() {
    let catalog =
        ContentCatalog::from_records(vec![record("z9", "Last id"), record("a1", "First id")])
            .unwrap();

    assert_eq!(catalog.records()[0].id().as_str(), "z9");

    let id = ContentId::new("a1").unwrap();
    assert_eq!(catalog.get(&id).unwrap().title(), "First id");
    assert!(catalog.get(&ContentId::new("missing").unwrap()).is_none());
}

#[test]
fn effective_date_resolution_prefers_last_updated() {
    let mut raw = record("a1", "Dated");
    raw.last_updated = Some("2024-06-01".to_string());
    raw.publish_date = Some("2024-01-01".to_string());

    let normalized = CatalogRecord::normalize(raw).unwrap();
    assert_eq!(normalized.effective_date, parse_date("2024-06-01"));
}

#[test]
fn effective_date_falls_through_empty_fields() {
    let mut raw = record("a1", "Dated");
    raw.last_updated = Some("   ".to_string());
    raw.publish_date = Some("2024-01-01T08:30:00Z".to_string());

    let normalized = CatalogRecord::normalize(raw).unwrap();
    assert_eq!(normalized.effective_date, parse_date("2024-01-01T08:30:00Z"));
}

#[test]
fn invariant_malformed_dates_leave_the_record_dateless() {
    let mut raw = record("a1", "Garbled");
    raw.last_updated = Some("June 1st, whenever".to_string());

    let normalized = CatalogRecord::normalize(raw).unwrap();
    assert!(normalized.effective_date.is_none());
}

#[test]
fn display_description_prefers_subtitle_then_summary() {
    let mut raw = record("a1", "Described");
    raw.summary = Some("From the summary".to_string());
    raw.description = Some("From the description".to_string());

    let normalized = CatalogRecord::normalize(raw.clone()).unwrap();
    assert_eq!(normalized.description, "From the summary");

    raw.subtitle = Some("From the subtitle".to_string());
    let normalized = CatalogRecord::normalize(raw).unwrap();
    assert_eq!(normalized.description, "From the subtitle");
}

#[test]
fn blank_description_fields_are_skipped() {
    let mut raw = record("a1", "Described");
    raw.subtitle = Some("  ".to_string());
    raw.description = Some("Only real text wins".to_string());

    let normalized = CatalogRecord::normalize(raw).unwrap();
    assert_eq!(normalized.description, "Only real text wins");
}

#[test]
fn severity_strings_normalize_once() {
    let mut raw = record("a1", "Severe");
    raw.severity = Some("CRITICAL".to_string());
    assert_eq!(
        CatalogRecord::normalize(raw).unwrap().severity,
        Some(Severity::Critical)
    );

    let mut raw = record("a2", "Odd");
    raw.severity = Some("catastrophic".to_string());
    assert_eq!(CatalogRecord::normalize(raw).unwrap().severity, None);
}

#[test]
fn invalid_records_are_rejected() {
    assert!(ContentCatalog::from_records(vec![record("  ", "No id")]).is_err());
    assert!(ContentCatalog::from_records(vec![record("a1", "   ")]).is_err());
}

#[test]
fn json_loading_accepts_both_body_shapes() {
    let payload = r#"[
        {
            "id": "flat",
            "title": "Flat body",
            "content": "Just text"
        },
        {
            "id": "sectioned",
            "title": "Sectioned body",
            "content": [
                {"id": "s1", "title": "Overview", "content": "Intro", "type": "text"},
                {"id": "s2", "title": "Steps", "content": "Details"}
            ],
            "regions": ["on", "qc"],
            "lastUpdated": "2024-06-01"
        }
    ]"#;

    let catalog = ContentCatalog::from_json_reader(payload.as_bytes()).unwrap();
    assert_eq!(catalog.len(), 2);

    let flat = catalog.get(&ContentId::new("flat").unwrap()).unwrap();
    assert!(matches!(
        flat.raw().content,
        Some(ContentBody::Text(ref text)) if text == "Just text"
    ));

    let sectioned = catalog.get(&ContentId::new("sectioned").unwrap()).unwrap();
    match &sectioned.raw().content {
        Some(ContentBody::Sections(sections)) => {
            assert_eq!(sections.len(), 2);
            assert_eq!(sections[0].kind.as_deref(), Some("text"));
        }
        other => panic!("expected sectioned body, got {other:?}"),
    }
    assert_eq!(sectioned.effective_date, parse_date("2024-06-01"));
}

#[test]
fn summaries_strip_the_body_and_keep_everything_else() {
    let mut raw = record("a1", "Summarized");
    raw.content = Some(ContentBody::Text("Body".to_string()));
    raw.tags = vec!["Fiber".to_string()];

    let normalized = CatalogRecord::normalize(raw).unwrap();
    let summary = normalized.summary();

    assert!(summary.record().content.is_none());
    assert_eq!(summary.record().tags, vec!["Fiber".to_string()]);
    assert_eq!(summary.record().title, "Summarized");
}
