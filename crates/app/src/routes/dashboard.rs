use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdFolder, LdUserCheck};
use dioxus_free_icons::Icon;
use shared_types::{AnnouncementStatus, ApiError, Role};
use shared_ui::{Card, CardBody, CardHeader, ErrorBanner, PageHeader, SkeletonList};

use crate::auth::{use_auth, use_client};
use crate::routes::Route;

/// Headline numbers for the admin landing page.
#[derive(Debug, Clone, PartialEq)]
struct DashboardStats {
    unread: i64,
    pending: usize,
    archived: i64,
}

#[component]
pub fn AdminDashboard() -> Element {
    let auth = use_auth();
    let client = use_client();

    let mut stats = use_resource(move || {
        let client = client.clone();
        async move {
            let unread = client.notifications(Role::Admin).unread_count().await?;
            let pending = client
                .announcements(Role::Admin)
                .list(Some(AnnouncementStatus::Pending), 1, 1)
                .await?;
            let archived = client.archive().counts().await?;
            Ok::<_, ApiError>(DashboardStats {
                unread,
                pending: pending.total.unwrap_or(pending.items.len()),
                archived: archived.total(),
            })
        }
    });

    let name = auth
        .user(Role::Admin)
        .map(|u| u.first_name)
        .unwrap_or_default();

    rsx! {
        div { class: "container",
            PageHeader {
                title: "Dashboard",
                subtitle: format!("Welcome back, {name}"),
            }

            match &*stats.read() {
                Some(Ok(s)) => rsx! {
                    div { class: "stat-grid",
                        StatCard {
                            title: "Unread notifications",
                            value: s.unread.to_string(),
                            to: Route::AdminNotifications {},
                            icon: rsx! { Icon::<LdBell> { icon: LdBell, width: 20, height: 20 } },
                        }
                        StatCard {
                            title: "Posts awaiting approval",
                            value: s.pending.to_string(),
                            to: Route::AdminApprovals {},
                            icon: rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 20, height: 20 } },
                        }
                        StatCard {
                            title: "Archived records",
                            value: s.archived.to_string(),
                            to: Route::AdminArchive { entity: None },
                            icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 20, height: 20 } },
                        }
                    }
                },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| stats.restart() }
                    }
                }
                None => rsx! { SkeletonList { rows: 3 } },
            }
        }
    }
}

#[component]
fn StatCard(title: String, value: String, to: Route, icon: Element) -> Element {
    rsx! {
        Link { to, class: "stat-link",
            Card { class: "stat-card",
                CardHeader { title,
                    {icon}
                }
                CardBody {
                    p { class: "stat-value", "{value}" }
                }
            }
        }
    }
}
