use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{ApiErrorKind, CreateCalendarEventRequest, Role};

use crate::common::MockBackend;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_list_accepts_both_id_spellings() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    let page = client
        .calendar(Role::Student)
        .list(1, 50)
        .await
        .expect("calendar");

    let ids: Vec<i64> = page.items.iter().map(|e| e.calendar_id).collect();
    assert_eq!(ids, vec![5, 6]);
    assert_eq!(page.total, None);
    assert_eq!(page.items[1].anchor(), "event-6");
    assert!(page.items[1].occurs_on(date("2026-09-11")));
}

#[tokio::test]
async fn test_create_rejects_inverted_range_locally() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    let err = client
        .calendar(Role::Admin)
        .create(&CreateCalendarEventRequest {
            title: "Intramurals".into(),
            description: None,
            event_date: date("2026-10-10"),
            end_date: Some(date("2026-10-08")),
            location: None,
            category: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(backend.request_count("POST", "/calendar"), 0);
}
