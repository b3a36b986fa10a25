use pretty_assertions::assert_eq;
use shared_types::{ArchiveEntity, ArchivedStudent, ListState, Role};

use crate::common::MockBackend;

#[tokio::test]
async fn test_fetch_uses_single_bulk_page() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;

    let page = client
        .archive()
        .fetch::<ArchivedStudent>()
        .await
        .expect("archived students");

    assert_eq!(page.items.len(), 12);
    assert_eq!(page.total, Some(12));
    let req = backend.last_request("GET", "/archive/students").expect("request");
    assert!(req.query.contains("page=1"));
    assert!(req.query.contains("limit=100"));
}

#[tokio::test]
async fn test_rows_search_and_restore_flow() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    let archive = client.archive();

    let page = archive
        .fetch_rows(ArchiveEntity::Students)
        .await
        .expect("rows");
    let mut list = ListState::new(Vec::new(), 10);
    list.replace_items(page.items, page.total);

    list.set_search("REYES");
    let view = list.view();
    assert_eq!(view.total_filtered, 3);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.items.len(), 3);
    assert!(view.items.iter().all(|r| r.entity == ArchiveEntity::Students));

    let id = view.items[0].id;
    archive
        .restore(ArchiveEntity::Students, id)
        .await
        .expect("restored");
    list.remove(id);

    assert_eq!(list.total(), 11);
    assert_eq!(list.view().total_filtered, 2);
    assert_eq!(
        backend.with_state(|s| s.restored.clone()),
        vec![("students".to_string(), id)]
    );

    let counts = archive.counts().await.expect("counts");
    assert_eq!(counts.get(ArchiveEntity::Students), 11);
    assert_eq!(counts.total(), 14);
}

#[tokio::test]
async fn test_restoring_last_row_on_final_page_steps_back() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    let archive = client.archive();

    let page = archive
        .fetch_rows(ArchiveEntity::Students)
        .await
        .expect("rows");
    let mut list = ListState::new(page.items, 11);
    list.set_page(2);
    let view = list.view();
    assert_eq!(view.page, 2);
    assert_eq!(view.items.len(), 1);

    let last = view.items[0].id;
    archive
        .restore(ArchiveEntity::Students, last)
        .await
        .expect("restored");
    list.remove(last);

    assert_eq!(list.page(), 1);
    assert_eq!(list.view().summary(), "Showing 1-11 of 11 filtered (11 total)");
}

#[tokio::test]
async fn test_bare_array_entity_and_empty_entity() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Admin).await;
    let archive = client.archive();

    let cards = archive
        .fetch_rows(ArchiveEntity::WelcomeCards)
        .await
        .expect("welcome cards");
    assert_eq!(cards.items.len(), 1);
    assert_eq!(cards.items[0].title, "Welcome back!");
    assert_eq!(cards.total, None);

    let images = archive
        .fetch_rows(ArchiveEntity::CarouselImages)
        .await
        .expect("carousel images");
    assert!(images.items.is_empty());
}

#[tokio::test]
async fn test_archive_requires_admin_session() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.login(&client, Role::Student).await;

    let err = client.archive().counts().await.unwrap_err();

    assert_eq!(err.status, 401);
    assert!(client.sessions().load(Role::Student).is_some());
}
