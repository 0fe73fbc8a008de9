use portal_core::api::{
    ApiError, FeedbackSubmission, HomepageRequest, ListContentRequest, NewAlert, Portal,
    SearchRequest, SetOutOfDateRequest,
};
use portal_core::content::catalog::ContentCatalog;
use portal_core::content::record::{ContentBody, ContentRecord};
use portal_core::preference::model::Region;
use portal_core::search::LanguageFilter;
use portal_core::stores::alerts::{AlertPatch, AlertQuery, AlertSeverity};
use portal_core::types::digest::HomepageSource;

fn record(id: &str, title: &str) -> ContentRecord {
    ContentRecord {
        id: id.to_string(),
        title: title.to_string(),
        content: Some(ContentBody::Text(format!("Body of {id}"))),
        ..Default::default()
    }
}

fn portal() -> Portal {
    let records = vec![
        ContentRecord {
            kind: Some("Guide".to_string()),
            regions: Some(vec!["on".to_string()]),
            last_updated: Some("2024-05-01".to_string()),
            ..record("fiber-install", "Installing Fiber at Home")
        },
        ContentRecord {
            kind: Some("Comparison".to_string()),
            tags: vec!["Fiber".to_string(), "Cable".to_string()],
            last_updated: Some("2024-06-01".to_string()),
            ..record("fiber-vs-cable", "Fiber vs. Cable")
        },
        ContentRecord {
            category: Some("Billing".to_string()),
            regions: Some(vec!["qc".to_string()]),
            last_updated: Some("2024-04-01".to_string()),
            ..record("billing-cycle", "New Billing Cycle")
        },
    ];
    let catalog = ContentCatalog::from_records(records).expect("catalog must load");
    Portal::new(catalog, HomepageSource::default())
}

#[test]
fn list_content_sorts_by_recency_and_strips_bodies() {
    let portal = portal();

    let response = portal.list_content(&ListContentRequest::default());

    let json = serde_json::to_value(&response).expect("response must serialize");
    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[0]["id"], "fiber-vs-cable");
    assert_eq!(articles[1]["id"], "fiber-install");
    assert_eq!(articles[2]["id"], "billing-cycle");
    for article in articles {
        assert!(
            article.get("content").is_none(),
            "summaries must not carry the body"
        );
    }
}

#[test]
fn list_content_full_includes_bodies() {
    let portal = portal();

    let response = portal.list_content(&ListContentRequest {
        full: true,
        ..Default::default()
    });

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["articles"][0].get("content").is_some());
}

#[test]
fn explicit_ids_override_other_filters() {
    let portal = portal();

    let response = portal.list_content(&ListContentRequest {
        ids: vec!["billing-cycle".to_string(), "fiber-install".to_string()],
        category: Some("Guide".to_string()),
        query: Some("nothing matches this".to_string()),
        ..Default::default()
    });

    let json = serde_json::to_value(&response).unwrap();
    let ids: Vec<&str> = json["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|article| article["id"].as_str().unwrap())
        .collect();
    // Catalog order, not request order.
    assert_eq!(ids, vec!["fiber-install", "billing-cycle"]);
}

#[test]
fn category_filter_matches_type_category_and_tags() {
    let portal = portal();

    let by_type = portal.list_content(&ListContentRequest {
        category: Some("Guide".to_string()),
        ..Default::default()
    });
    assert_eq!(by_type.articles.len(), 1);

    let by_tag = portal.list_content(&ListContentRequest {
        category: Some("Cable".to_string()),
        ..Default::default()
    });
    assert_eq!(by_tag.articles.len(), 1);
}

#[test]
fn region_filter_keeps_untagged_records() {
    let portal = portal();

    let response = portal.list_content(&ListContentRequest {
        region: Some(Region::On),
        ..Default::default()
    });

    let json = serde_json::to_value(&response).unwrap();
    let ids: Vec<&str> = json["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|article| article["id"].as_str().unwrap())
        .collect();
    // The Quebec-tagged record drops out; the untagged one stays.
    assert_eq!(ids, vec!["fiber-vs-cable", "fiber-install"]);
}

#[test]
fn free_text_query_matches_title_subtitle_and_tags() {
    let portal = portal();

    let response = portal.list_content(&ListContentRequest {
        query: Some("cable".to_string()),
        ..Default::default()
    });

    assert_eq!(response.articles.len(), 1);
}

#[test]
fn get_content_returns_full_record_or_not_found() {
    let portal = portal();

    let found = portal.get_content("fiber-install").expect("must exist");
    assert_eq!(found.id, "fiber-install");
    assert!(found.content.is_some());

    let missing = portal.get_content("no-such-record");
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[test]
fn homepage_request_parses_comma_separated_skills() {
    let skills = HomepageRequest::parse_skills("fiber,copper, tv");
    assert_eq!(skills.len(), 3);

    let with_unknown = HomepageRequest::parse_skills("fiber,unknown-skill");
    assert_eq!(with_unknown.len(), 1);
}

#[test]
fn search_surface_delegates_to_the_scorer() {
    let portal = portal();

    let results = portal.search(&SearchRequest {
        q: "fiber".to_string(),
        lang: LanguageFilter::All,
    });

    assert_eq!(results.total, 2);
    assert_eq!(results.query, "fiber");
}

#[test]
fn helpfulness_feedback_is_acknowledged_and_tallied() {
    let mut portal = portal();

    let ack = portal
        .submit_feedback(FeedbackSubmission {
            feedback_type: Some("helpfulness".to_string()),
            content_id: Some("fiber-install".to_string()),
            is_helpful: Some(true),
            ..Default::default()
        })
        .expect("valid submission");
    assert!(ack.success);

    portal
        .submit_feedback(FeedbackSubmission {
            feedback_type: Some("helpfulness".to_string()),
            content_id: Some("fiber-install".to_string()),
            is_helpful: Some(false),
            ..Default::default()
        })
        .unwrap();

    let stats = portal.feedback_stats(Some("fiber-install"));
    assert_eq!(stats.total_feedback, 2);
    assert_eq!(stats.helpful, 1);
    assert_eq!(stats.helpful_percentage, 50);
}

#[test]
fn invariant_feedback_validation_names_the_missing_field() {
    let mut portal = portal();

    let missing_flag = portal.submit_feedback(FeedbackSubmission {
        feedback_type: Some("helpfulness".to_string()),
        content_id: Some("fiber-install".to_string()),
        ..Default::default()
    });
    match missing_flag {
        Err(ApiError::Validation(reason)) => assert!(reason.contains("isHelpful")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let missing_url = portal.submit_feedback(FeedbackSubmission {
        feedback_type: Some("issue".to_string()),
        content_id: Some("fiber-install".to_string()),
        issue: Some("Steps are outdated".to_string()),
        ..Default::default()
    });
    match missing_url {
        Err(ApiError::Validation(reason)) => assert!(reason.contains("pageUrl")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let unknown_type = portal.submit_feedback(FeedbackSubmission {
        feedback_type: Some("applause".to_string()),
        content_id: Some("fiber-install".to_string()),
        ..Default::default()
    });
    assert!(matches!(unknown_type, Err(ApiError::Validation(_))));
}

#[test]
fn issue_feedback_counts_toward_stats() {
    let mut portal = portal();

    portal
        .submit_feedback(FeedbackSubmission {
            feedback_type: Some("issue".to_string()),
            content_id: Some("fiber-vs-cable".to_string()),
            page_url: Some("/articles/fiber-vs-cable".to_string()),
            issue: Some("Speed table is stale".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(portal.feedback_stats(Some("fiber-vs-cable")).issues, 1);
    assert_eq!(portal.feedback_stats(None).issues, 1);
}

#[test]
fn out_of_date_flags_default_false_and_round_trip() {
    let mut portal = portal();

    let initial = portal.out_of_date("fiber-install").unwrap();
    assert!(!initial.out_of_date);

    portal
        .set_out_of_date(SetOutOfDateRequest {
            content_id: Some("fiber-install".to_string()),
            out_of_date: Some(true),
        })
        .unwrap();

    assert!(portal.out_of_date("fiber-install").unwrap().out_of_date);

    let invalid = portal.set_out_of_date(SetOutOfDateRequest::default());
    assert!(matches!(invalid, Err(ApiError::Validation(_))));
}

#[test]
fn alerts_are_created_listed_and_filtered_by_severity() {
    let mut portal = portal();

    portal
        .create_alert(NewAlert {
            kind: Some("outage".to_string()),
            severity: Some(AlertSeverity::Critical),
            title: Some("CRM outage".to_string()),
            message: Some("CRM is unavailable".to_string()),
            ..Default::default()
        })
        .unwrap();
    portal
        .create_alert(NewAlert {
            kind: Some("degraded".to_string()),
            severity: Some(AlertSeverity::Moderate),
            title: Some("Slow dispatch".to_string()),
            message: Some("Dispatch is slow".to_string()),
            ..Default::default()
        })
        .unwrap();

    let all = portal.list_alerts(&AlertQuery::default());
    assert_eq!(all.alerts.len(), 2);
    assert_eq!(all.alerts[0].id, "sys-001");

    let severe = portal.list_alerts(&AlertQuery {
        min_severity: Some(AlertSeverity::Warning),
        ..Default::default()
    });
    assert_eq!(severe.alerts.len(), 1);
    assert_eq!(severe.alerts[0].severity, AlertSeverity::Critical);

    let outages = portal.list_alerts(&AlertQuery {
        kind: Some("outage".to_string()),
        ..Default::default()
    });
    assert_eq!(outages.alerts.len(), 1);
}

#[test]
fn inactive_alerts_are_hidden_unless_requested() {
    let mut portal = portal();

    portal
        .create_alert(NewAlert {
            kind: Some("resolved".to_string()),
            severity: Some(AlertSeverity::Low),
            title: Some("Resolved incident".to_string()),
            message: Some("All clear".to_string()),
            active: Some(false),
            ..Default::default()
        })
        .unwrap();

    assert!(portal.list_alerts(&AlertQuery::default()).alerts.is_empty());

    let including_inactive = portal.list_alerts(&AlertQuery {
        active_only: false,
        ..Default::default()
    });
    assert_eq!(including_inactive.alerts.len(), 1);
}

#[test]
fn alert_creation_validates_required_fields() {
    let mut portal = portal();

    let missing_title = portal.create_alert(NewAlert {
        kind: Some("outage".to_string()),
        severity: Some(AlertSeverity::Critical),
        message: Some("CRM is unavailable".to_string()),
        ..Default::default()
    });
    match missing_title {
        Err(ApiError::Validation(reason)) => assert!(reason.contains("title")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn alert_update_appends_timestamped_note() {
    let mut portal = portal();

    let created = portal
        .create_alert(NewAlert {
            kind: Some("outage".to_string()),
            severity: Some(AlertSeverity::Critical),
            title: Some("CRM outage".to_string()),
            message: Some("CRM is unavailable".to_string()),
            ..Default::default()
        })
        .unwrap();

    let updated = portal
        .update_alert(
            &created.id,
            AlertPatch {
                severity: Some(AlertSeverity::Warning),
                note: Some("Database restored, monitoring".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.severity, AlertSeverity::Warning);
    assert_eq!(updated.updates.len(), 1);
    assert_eq!(updated.updates[0].message, "Database restored, monitoring");

    let missing = portal.update_alert("sys-999", AlertPatch::default());
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[test]
fn job_aids_are_limited_and_type_filtered() {
    let portal = portal();

    let aids = portal.job_aids(6);
    // Guide and Comparison qualify; the billing record does not.
    assert_eq!(aids.len(), 2);

    let capped = portal.job_aids(1);
    assert_eq!(capped.len(), 1);
}
