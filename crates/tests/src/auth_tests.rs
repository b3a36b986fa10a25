use pretty_assertions::assert_eq;
use shared_types::{ApiErrorKind, LoginRequest, Role, LOCAL_VALIDATION_STATUS};

use crate::common::{self, MockBackend};

#[tokio::test]
async fn test_admin_login_persists_session() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let session = backend.login(&client, Role::Admin).await;

    assert_eq!(session.user.id, 1);
    assert_eq!(session.user.role, Role::Admin);
    assert_eq!(session.user.display_name(), "Maria Santos");

    let stored = client.sessions().load(Role::Admin).expect("admin session stored");
    assert_eq!(stored.access_token, session.access_token);
    assert!(client.sessions().load(Role::Student).is_none());
    assert!(client.auth(Role::Admin).is_authenticated());
    assert_eq!(client.sessions().active_role(), Some(Role::Admin));
}

#[tokio::test]
async fn test_student_login_forces_role_on_user() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let session = backend.login(&client, Role::Student).await;

    assert_eq!(session.user.id, 7);
    assert_eq!(session.user.role, Role::Student);
    assert!(backend.last_request("POST", "/auth/student/login").is_some());
    assert_eq!(backend.request_count("POST", "/auth/admin/login"), 0);
}

#[tokio::test]
async fn test_wrong_password_reports_server_message() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .auth(Role::Admin)
        .login(&LoginRequest {
            email: "principal@school.edu".into(),
            password: common::WRONG_PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Invalid email or password");
    assert!(client.sessions().load(Role::Admin).is_none());
}

#[tokio::test]
async fn test_login_form_shows_rejection_reason_not_session_expiry() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .auth(Role::Student)
        .login(&LoginRequest {
            email: "juan@school.edu".into(),
            password: common::WRONG_PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.friendly_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_invalid_email_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .auth(Role::Student)
        .login(&LoginRequest {
            email: "not-an-email".into(),
            password: "secret".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.status, LOCAL_VALIDATION_STATUS);
    assert!(!err.is_network());
    assert!(err.field_errors.contains_key("email"));
    assert_eq!(backend.request_count("POST", "/auth/student/login"), 0);
}

#[tokio::test]
async fn test_expired_token_is_not_authenticated() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    client
        .auth(Role::Student)
        .login(&LoginRequest {
            email: common::EXPIRED_EMAIL.into(),
            password: "secret".into(),
        })
        .await
        .expect("login succeeds even with a short-lived token");

    let auth = client.auth(Role::Student);
    assert!(auth.current_session().is_some());
    assert!(auth.session_expired());
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_logout_notifies_backend_and_clears_only_that_role() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let admin = backend.login(&client, Role::Admin).await;
    backend.login(&client, Role::Student).await;

    client.auth(Role::Admin).logout().await;

    let logout = backend
        .last_request("POST", "/auth/logout")
        .expect("logout request sent");
    assert_eq!(
        logout.headers.get("authorization"),
        Some(&format!("Bearer {}", admin.access_token))
    );
    assert!(client.sessions().load(Role::Admin).is_none());
    assert!(client.sessions().load(Role::Student).is_some());
}

#[tokio::test]
async fn test_logout_clears_session_when_backend_rejects() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    backend.with_state(|s| s.revoked.insert("student".to_string()));

    client.auth(Role::Student).logout().await;

    assert!(client.sessions().load(Role::Student).is_none());
}

#[tokio::test]
async fn test_logout_without_session_skips_backend() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    client.auth(Role::Admin).logout().await;

    assert_eq!(backend.request_count("POST", "/auth/logout"), 0);
}
