use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLockOpen;
use dioxus_free_icons::Icon;
use shared_types::{ArchiveEntity, ArchiveRow, ListState, PAGE_SIZE_OPTIONS};
use shared_ui::{
    toast_done, toast_failed, use_toast, Button, ButtonVariant, DataTable, DataTableCell,
    DataTableRow, EmptyState, ErrorBanner, PageHeader, PageSizeSelect, Pagination, SearchBar,
    SearchBox, SkeletonList, TabItem, TabStrip,
};

use crate::auth::use_client;
use crate::routes::Route;

/// Soft-deleted records, one tab per entity. Rows are fetched once per tab
/// and searched, paged and removed locally.
#[component]
pub fn AdminArchive(entity: Option<String>) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let active = entity
        .as_deref()
        .and_then(ArchiveEntity::from_slug)
        .unwrap_or(ArchiveEntity::Announcements);

    let page_size = client::config::config().archive.default_page_size;
    let mut list = use_signal(move || ListState::<ArchiveRow>::new(Vec::new(), page_size));

    let service = client.archive();
    let counts_service = service.clone();
    let restore_service = service.clone();

    let mut counts = use_resource(move || {
        let service = counts_service.clone();
        async move { service.counts().await }
    });

    let mut rows = use_resource(use_reactive!(|active| {
        let service = service.clone();
        async move {
            let page = service.fetch_rows(active).await?;
            list.with_mut(|l| {
                l.set_search("");
                l.replace_items(page.items, page.total);
            });
            Ok::<_, shared_types::ApiError>(())
        }
    }));

    let restore = move |id: i64| {
        let service = restore_service.clone();
        spawn(async move {
            match service.restore(active, id).await {
                Ok(()) => {
                    list.with_mut(|l| l.remove(id));
                    toast_done(toasts, format!("{} record restored", active.label()));
                    counts.restart();
                }
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
        });
    };

    let tabs: Vec<TabItem> = {
        let counts = counts.read();
        let counts = counts.as_ref().and_then(|c| c.as_ref().ok());
        ArchiveEntity::ALL
            .iter()
            .map(|e| TabItem {
                key: e.slug().to_string(),
                label: e.label().to_string(),
                count: counts.map(|c| c.get(*e)).unwrap_or(0),
            })
            .collect()
    };

    let view = list.read().view();
    let search = list.read().search().to_string();

    rsx! {
        div { class: "container",
            PageHeader { title: "Archive", subtitle: "Restore archived records" }

            TabStrip {
                items: tabs,
                active: active.slug().to_string(),
                on_select: move |slug: String| {
                    navigator().replace(Route::AdminArchive { entity: Some(slug) });
                },
            }

            SearchBar {
                SearchBox {
                    value: search,
                    placeholder: active.search_hint(),
                    on_search: move |text: String| list.with_mut(|l| l.set_search(text)),
                }
                PageSizeSelect {
                    value: view.page_size,
                    options: PAGE_SIZE_OPTIONS.to_vec(),
                    on_change: move |size: usize| list.with_mut(|l| l.set_page_size(size)),
                }
            }

            match &*rows.read() {
                None => rsx! { SkeletonList { rows: 5 } },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| rows.restart() }
                    }
                }
                Some(Ok(())) if view.items.is_empty() => rsx! {
                    EmptyState {
                        title: format!("No archived {}", active.label().to_lowercase()),
                        hint: if search.is_empty() { None } else { Some("Try a different search.".to_string()) },
                    }
                },
                Some(Ok(())) => rsx! {
                    DataTable { columns: vec!["Record".to_string(), "Details".to_string(), "Archived".to_string(), String::new()],
                        for row in view.items.iter().cloned() {
                            ArchiveRowView {
                                key: "{row.id}",
                                on_restore: {
                                    let restore = restore.clone();
                                    move |id| restore(id)
                                },
                                row,
                            }
                        }
                    }
                },
            }

            Pagination {
                page: view.page,
                total_pages: view.total_pages,
                summary: view.summary(),
                on_change: move |page: usize| list.with_mut(|l| l.set_page(page)),
            }
        }
    }
}

#[component]
fn ArchiveRowView(row: ArchiveRow, on_restore: EventHandler<i64>) -> Element {
    let id = row.id;

    rsx! {
        DataTableRow {
            DataTableCell { strong { "{row.title}" } }
            DataTableCell { "{row.subtitle}" }
            DataTableCell { "{row.deleted_at}" }
            DataTableCell {
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_restore.call(id),
                    Icon::<LdLockOpen> { icon: LdLockOpen, width: 14, height: 14 }
                    "Restore"
                }
            }
        }
    }
}
