use pretty_assertions::assert_eq;
use shared_types::{
    AnnouncementStatus, ApiErrorKind, CreateAnnouncementRequest, CreateCommentRequest, Role,
};

use crate::common::MockBackend;

#[tokio::test]
async fn test_list_by_status_sends_query() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    let page = client
        .announcements(Role::Admin)
        .list(Some(AnnouncementStatus::Pending), 2, 25)
        .await
        .expect("pending announcements");

    assert_eq!(page.total, Some(2));
    assert!(page
        .items
        .iter()
        .all(|a| a.status == AnnouncementStatus::Pending));

    let req = backend.last_request("GET", "/announcements").expect("request");
    assert!(req.query.contains("status=pending"), "query was {}", req.query);
    assert!(req.query.contains("page=2"));
    assert!(req.query.contains("limit=25"));
}

#[tokio::test]
async fn test_create_validates_before_posting() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    let err = client
        .announcements(Role::Student)
        .create(&CreateAnnouncementRequest {
            title: "Hi".into(),
            content: String::new(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(
        err.field_errors.get("title").map(String::as_str),
        Some("Title must be 3-255 characters")
    );
    assert_eq!(
        err.field_errors.get("content").map(String::as_str),
        Some("Content is required")
    );
    assert_eq!(backend.request_count("POST", "/announcements"), 0);
}

#[tokio::test]
async fn test_student_post_starts_pending() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    let created = client
        .announcements(Role::Student)
        .create(&CreateAnnouncementRequest {
            title: "Lost calculator".into(),
            content: "Left in room 204.".into(),
            ..Default::default()
        })
        .await
        .expect("created");

    assert_eq!(created.title, "Lost calculator");
    assert_eq!(created.status, AnnouncementStatus::Pending);
    assert!(!created.status.is_visible());
}

#[tokio::test]
async fn test_approve_and_reject() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    let service = client.announcements(Role::Admin);

    service.approve(3).await.expect("approve");
    service
        .reject(4, Some("Duplicate post".into()))
        .await
        .expect("reject");
    service.reject(5, None).await.expect("reject without reason");

    backend.with_state(|s| {
        assert_eq!(s.approved, vec![3]);
        assert_eq!(
            s.rejected,
            vec![(4, Some("Duplicate post".to_string())), (5, None)]
        );
    });
}

#[tokio::test]
async fn test_archive_accepts_no_content() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    client
        .announcements(Role::Admin)
        .archive(3)
        .await
        .expect("archived");

    assert_eq!(backend.request_count("DELETE", "/announcements/3"), 1);
}

#[tokio::test]
async fn test_comments_round_trip() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    let service = client.announcements(Role::Student);

    let comments = service.comments(3).await.expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].anchor(), "comment-7");

    let added = service
        .add_comment(
            3,
            &CreateCommentRequest {
                content: "See you there".into(),
                parent_comment_id: None,
            },
        )
        .await
        .expect("comment added");
    assert_eq!(added.announcement_id, 3);
    assert_eq!(added.content, "See you there");

    let err = service
        .add_comment(3, &CreateCommentRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(backend.request_count("POST", "/announcements/3/comments"), 1);
}

#[tokio::test]
async fn test_unknown_reaction_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;
    let service = client.announcements(Role::Student);

    service.react(3, "heart").await.expect("known reaction");
    let err = service.react(3, "angry").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(
        backend.with_state(|s| s.reactions.clone()),
        vec![(3, "heart".to_string())]
    );
}
