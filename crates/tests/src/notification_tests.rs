use client::{open_notification, Navigator, SessionScope};
use pretty_assertions::assert_eq;
use shared_types::{ContextType, NavigationTarget, Role, ScrollBehavior};
use std::sync::Mutex;

use crate::common::{self, MockBackend};

#[derive(Default)]
struct RecordingNavigator(Mutex<Vec<NavigationTarget>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &NavigationTarget) {
        self.0.lock().unwrap().push(target.clone());
    }
}

impl RecordingNavigator {
    fn paths(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|t| t.path.clone()).collect()
    }
}

#[tokio::test]
async fn test_list_decodes_metadata_and_inferred_contexts() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    let page = client
        .notifications(Role::Student)
        .list(1, 20)
        .await
        .expect("notifications");

    assert_eq!(page.total, Some(2));
    assert_eq!(page.items.len(), 2);

    let first = &page.items[0];
    assert!(!first.is_read);
    let ctx = first.context();
    assert_eq!(ctx.kind, ContextType::Announcement);
    assert_eq!(ctx.target_id, Some(42));

    let second = &page.items[1];
    assert!(second.is_read);
    let ctx = second.context();
    assert_eq!(ctx.kind, ContextType::Comment);
    assert_eq!(ctx.target_id, Some(7));
    assert_eq!(ctx.announcement_id, Some(3));
}

#[tokio::test]
async fn test_open_marks_read_then_navigates() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    let service = client.notifications(Role::Student);
    let notification = service.list(1, 20).await.expect("list").items.remove(0);
    let navigator = RecordingNavigator::default();

    let target = open_notification(Role::Student, &notification, &service, &navigator).await;

    assert_eq!(target.path, "/student/newsfeed?focus=announcement&id=42");
    let state = target.state.expect("navigation state");
    assert!(state.from_notification);
    assert_eq!(state.notification_id, Some(1));
    assert_eq!(state.scroll_to, "announcement-42");
    assert_eq!(state.scroll_behavior, ScrollBehavior::Smooth);
    assert_eq!(navigator.paths(), vec![target.path.clone()]);
    assert_eq!(backend.with_state(|s| s.read.clone()), vec![1]);
}

#[tokio::test]
async fn test_mark_read_failure_still_navigates() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    backend.with_state(|s| s.fail_mark_read = true);
    let service = client.notifications(Role::Admin);
    let notification = service.list(1, 20).await.expect("list").items.remove(0);
    let navigator = RecordingNavigator::default();

    let target = open_notification(Role::Admin, &notification, &service, &navigator).await;

    assert_eq!(target.path, "/admin/newsfeed?focus=announcement&id=42");
    assert_eq!(navigator.paths(), vec!["/admin/newsfeed?focus=announcement&id=42".to_string()]);
    assert_eq!(backend.request_count("PUT", "/notifications/1/read"), 1);
    assert!(backend.with_state(|s| s.read.is_empty()));
}

#[tokio::test]
async fn test_rejected_mark_read_signs_student_out_and_still_navigates() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    let service = client.notifications(Role::Student);
    let notification = service.list(1, 20).await.expect("list").items.remove(0);
    backend.with_state(|s| s.revoked.insert("student".to_string()));
    let navigator = RecordingNavigator::default();

    let target = open_notification(Role::Student, &notification, &service, &navigator).await;

    assert_eq!(navigator.paths(), vec![target.path.clone()]);
    assert!(client.api(Role::Student).tokens().get_token().is_none());
    assert!(common::unauthorized_scopes().contains(&SessionScope::Role(Role::Student)));
}

#[tokio::test]
async fn test_read_notification_skips_mark_read() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    let service = client.notifications(Role::Student);
    let notification = service.list(1, 20).await.expect("list").items.remove(1);
    let navigator = RecordingNavigator::default();

    let target = open_notification(Role::Student, &notification, &service, &navigator).await;

    assert_eq!(
        target.path,
        "/student/newsfeed?focus=announcement&id=3&comment=7"
    );
    assert_eq!(
        target.state.map(|s| s.scroll_to),
        Some("comment-7".to_string())
    );
    assert_eq!(backend.request_count("PUT", "/read"), 0);
}

#[tokio::test]
async fn test_mark_all_read_hits_bulk_endpoint() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    client
        .notifications(Role::Student)
        .mark_all_read()
        .await
        .expect("mark all read");

    assert_eq!(backend.request_count("PUT", "/notifications/read-all"), 1);
}
