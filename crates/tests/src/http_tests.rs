use client::{MultipartField, SessionScope};
use pretty_assertions::assert_eq;
use serde_json::Value;
use shared_types::{ApiErrorKind, Role};

use crate::common::{self, MockBackend};

#[tokio::test]
async fn test_requests_carry_json_and_bearer_headers() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.login(&client, Role::Student).await;

    let count = client
        .notifications(Role::Student)
        .unread_count()
        .await
        .expect("unread count");
    assert_eq!(count, 4);

    let req = backend
        .last_request("GET", "/notifications/unread-count")
        .expect("request recorded");
    assert_eq!(
        req.headers.get("authorization"),
        Some(&format!("Bearer {}", session.access_token))
    );
    assert_eq!(req.headers.get("content-type").map(String::as_str), Some("application/json"));
    assert_eq!(req.headers.get("accept").map(String::as_str), Some("application/json"));
}

#[tokio::test]
async fn test_each_role_sends_its_own_token() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let admin = backend.login(&client, Role::Admin).await;
    let student = backend.login(&client, Role::Student).await;

    client.notifications(Role::Admin).unread_count().await.expect("admin count");
    let admin_req = backend
        .last_request("GET", "/notifications/unread-count")
        .expect("admin request");
    client.notifications(Role::Student).unread_count().await.expect("student count");
    let student_req = backend
        .last_request("GET", "/notifications/unread-count")
        .expect("student request");

    assert_eq!(
        admin_req.headers.get("authorization"),
        Some(&format!("Bearer {}", admin.access_token))
    );
    assert_eq!(
        student_req.headers.get("authorization"),
        Some(&format!("Bearer {}", student.access_token))
    );
}

#[tokio::test]
async fn test_unauthorized_clears_only_issuing_role() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    backend.login(&client, Role::Student).await;
    backend.with_state(|s| s.revoked.insert("admin".to_string()));

    let err = client
        .notifications(Role::Admin)
        .unread_count()
        .await
        .unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert!(err.is_unauthorized());
    assert!(client.api(Role::Admin).tokens().get_token().is_none());
    assert!(client.api(Role::Student).tokens().get_token().is_some());
    assert!(common::unauthorized_scopes().contains(&SessionScope::Role(Role::Admin)));

    // The student keeps working.
    client
        .notifications(Role::Student)
        .unread_count()
        .await
        .expect("student unaffected");
}

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .calendar(Role::Student)
        .list(1, 10)
        .await
        .unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Authentication required");
    assert_eq!(
        err.friendly_message(),
        "Your session has expired. Please sign in again."
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let base_url = common::unreachable_base_url().await;
    let client = common::client_for(&base_url);

    let err = client
        .notifications(Role::Student)
        .unread_count()
        .await
        .unwrap_err();

    assert_eq!(err.status, 0);
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert!(err.is_network());
    assert!(
        err.message.contains(&base_url),
        "message should name the backend: {}",
        err.message
    );
}

#[tokio::test]
async fn test_server_error_uses_body_message() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    backend.with_state(|s| s.fail_calendar = true);

    let err = client.calendar(Role::Student).list(1, 10).await.unwrap_err();

    assert_eq!(err.status, 500);
    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.message, "Database offline");
    assert_eq!(err.data["success"], false);
    assert_eq!(err.friendly_message(), "Database offline");
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    let err = client.calendar(Role::Admin).archive(404).await.unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message, "HTTP 404");
    assert!(err.data.is_null());
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    client
        .calendar(Role::Admin)
        .archive(5)
        .await
        .expect("204 with no body is a success");
    assert!(backend.last_request("DELETE", "/calendar/5").is_some());
}

#[tokio::test]
async fn test_multipart_upload_sets_boundary_and_keeps_bearer() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.login(&client, Role::Admin).await;
    let image = vec![0x89, b'P', b'N', b'G'];

    let body: Value = client
        .api(Role::Admin)
        .post_multipart(
            "/uploads",
            vec![
                MultipartField::text("caption", "Science fair"),
                MultipartField::File {
                    name: "image".into(),
                    file_name: "fair.png".into(),
                    mime: "image/png".into(),
                    bytes: image,
                },
            ],
        )
        .await
        .expect("upload accepted");
    assert_eq!(body["success"], true);

    let req = backend.last_request("POST", "/uploads").expect("request recorded");
    let content_type = req.headers.get("content-type").cloned().unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content-type {content_type}"
    );
    assert_eq!(
        req.headers.get("authorization"),
        Some(&format!("Bearer {}", session.access_token))
    );

    let raw = backend.with_state(|s| s.uploads.last().cloned()).expect("body stored");
    assert!(raw.contains("name=\"caption\""));
    assert!(raw.contains("Science fair"));
    assert!(raw.contains("filename=\"fair.png\""));
    assert!(raw.to_lowercase().contains("content-type: image/png"));
}
