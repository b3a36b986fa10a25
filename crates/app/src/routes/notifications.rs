use client::open_notification;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdBell;
use dioxus_free_icons::Icon;
use shared_types::{Notification, Role};
use shared_ui::{
    toast_done, toast_failed, use_toast, Button, ButtonVariant, EmptyState, ErrorBanner,
    PageHeader, SkeletonList,
};

use crate::auth::use_client;
use crate::focus::{PendingFocus, RouterNavigator};

const NOTIFICATION_LIMIT: u32 = 50;

#[component]
pub fn AdminNotifications() -> Element {
    rsx! { NotificationList { role: Role::Admin } }
}

#[component]
pub fn StudentNotifications() -> Element {
    rsx! { NotificationList { role: Role::Student } }
}

#[component]
fn NotificationList(role: Role) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let pending = use_context::<PendingFocus>();
    let mut marking = use_signal(|| false);

    let service = client.notifications(role);
    let list_service = service.clone();
    let open_service = service.clone();

    let mut feed = use_resource(move || {
        let service = list_service.clone();
        async move {
            service
                .list(1, NOTIFICATION_LIMIT)
                .await
                .map(|page| page.items)
        }
    });

    let mark_all = move |_| {
        let service = service.clone();
        spawn(async move {
            marking.set(true);
            match service.mark_all_read().await {
                Ok(()) => {
                    toast_done(toasts, "All notifications marked as read");
                    feed.restart();
                }
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
            marking.set(false);
        });
    };

    let open = move |notification: Notification| {
        let service = open_service.clone();
        spawn(async move {
            let navigator = RouterNavigator { role, pending };
            open_notification(role, &notification, &service, &navigator).await;
        });
    };

    let has_unread = matches!(
        &*feed.read(),
        Some(Ok(items)) if items.iter().any(|n| !n.is_read)
    );

    rsx! {
        div { class: "container",
            PageHeader { title: "Notifications",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: !has_unread,
                    loading: marking(),
                    onclick: mark_all,
                    "Mark all as read"
                }
            }

            match &*feed.read() {
                Some(Ok(items)) if items.is_empty() => rsx! {
                    EmptyState { title: "No notifications", hint: "You're all caught up." }
                },
                Some(Ok(items)) => rsx! {
                    ul { class: "notification-list",
                        for n in items.iter().cloned() {
                            NotificationItem {
                                key: "{n.notification_id}",
                                on_open: {
                                    let open = open.clone();
                                    move |n| open(n)
                                },
                                notification: n,
                            }
                        }
                    }
                },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| feed.restart() }
                    }
                }
                None => rsx! { SkeletonList { rows: 5 } },
            }
        }
    }
}

#[component]
fn NotificationItem(notification: Notification, on_open: EventHandler<Notification>) -> Element {
    let title = notification
        .title
        .clone()
        .unwrap_or_else(|| notification.type_name.replace('_', " "));
    let message = notification.message.clone().unwrap_or_default();
    let created_at = notification.created_at.clone();
    let class = if notification.is_read {
        "notification-item"
    } else {
        "notification-item unread"
    };

    rsx! {
        li {
            class,
            role: "button",
            tabindex: 0,
            onclick: move |_| on_open.call(notification.clone()),
            span { class: "notification-icon",
                Icon::<LdBell> { icon: LdBell, width: 16, height: 16 }
            }
            div { class: "notification-text",
                strong { "{title}" }
                if !message.is_empty() {
                    p { "{message}" }
                }
            }
            span { class: "notification-time", "{created_at}" }
        }
    }
}
