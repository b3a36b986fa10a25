use dioxus::prelude::*;
use shared_types::{Announcement, AnnouncementStatus, CreateAnnouncementRequest, Role};
use shared_ui::{
    toast_done, toast_failed, use_toast, Button, ButtonVariant, Card, CardBody, CardFooter,
    CardHeader, EmptyState, ErrorBanner, PageHeader, SkeletonList, TextArea, TextField,
};
use std::collections::HashMap;

use crate::auth::use_client;
use crate::routes::Route;

/// Pending posts fetched for the approval queue.
const QUEUE_LIMIT: u32 = 50;

#[component]
pub fn AdminCreateAnnouncement() -> Element {
    rsx! { AnnouncementForm { role: Role::Admin } }
}

#[component]
pub fn StudentCreateAnnouncement() -> Element {
    rsx! { AnnouncementForm { role: Role::Student } }
}

fn newsfeed_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminNewsfeed { notification: None, focus: None, id: None, comment: None },
        Role::Student => Route::StudentNewsfeed { notification: None, focus: None, id: None, comment: None },
    }
}

/// New post form. Student posts go to the approval queue; admins may also
/// pin a post or flag it as an alert.
#[component]
fn AnnouncementForm(role: Role) -> Element {
    let client = use_client();
    let toasts = use_toast();

    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut is_alert = use_signal(|| false);
    let mut is_pinned = use_signal(|| false);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let service = client.announcements(role);
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let service = service.clone();
        async move {
            errors.set(HashMap::new());
            let category = category().trim().to_string();
            let req = CreateAnnouncementRequest {
                title: title().trim().to_string(),
                content: content().trim().to_string(),
                category: (!category.is_empty()).then_some(category),
                is_alert: role == Role::Admin && is_alert(),
                is_pinned: role == Role::Admin && is_pinned(),
            };

            saving.set(true);
            match service.create(&req).await {
                Ok(created) => {
                    tracing::info!(
                        announcement_id = created.announcement_id,
                        status = created.status.as_str(),
                        "Announcement submitted"
                    );
                    let message = if created.status == AnnouncementStatus::Pending {
                        "Post submitted for approval"
                    } else {
                        "Announcement published"
                    };
                    toast_done(toasts, message);
                    navigator().push(newsfeed_route(role));
                }
                Err(e) if !e.field_errors.is_empty() => errors.set(e.field_errors),
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
            saving.set(false);
        }
    };

    let field_error = move |key: &str| errors.read().get(key).cloned().unwrap_or_default();
    let subtitle = match role {
        Role::Admin => "Published immediately to the newsfeed",
        Role::Student => "An administrator reviews every post before it appears",
    };

    rsx! {
        div { class: "container",
            PageHeader { title: "New announcement", subtitle }

            Card {
                CardBody {
                    form { class: "announcement-form", onsubmit: submit,
                        TextField {
                            label: "Title",
                            name: "title",
                            required: true,
                            value: title(),
                            error: field_error("title"),
                            on_input: move |e: FormEvent| title.set(e.value()),
                        }
                        TextArea {
                            label: "Content",
                            name: "content",
                            rows: 6,
                            value: content(),
                            error: field_error("content"),
                            on_input: move |e: FormEvent| content.set(e.value()),
                        }
                        TextField {
                            label: "Category",
                            name: "category",
                            placeholder: "e.g. Academics, Sports",
                            value: category(),
                            on_input: move |e: FormEvent| category.set(e.value()),
                        }
                        if role == Role::Admin {
                            div { class: "form-row form-checks",
                                label {
                                    input {
                                        r#type: "checkbox",
                                        checked: is_alert(),
                                        onchange: move |e: FormEvent| is_alert.set(e.checked()),
                                    }
                                    " Alert"
                                }
                                label {
                                    input {
                                        r#type: "checkbox",
                                        checked: is_pinned(),
                                        onchange: move |e: FormEvent| is_pinned.set(e.checked()),
                                    }
                                    " Pin to top"
                                }
                            }
                        }
                        Button { button_type: "submit", loading: saving(), "Submit" }
                    }
                }
            }
        }
    }
}

/// Admin moderation queue for student posts.
#[component]
pub fn AdminApprovals() -> Element {
    let client = use_client();

    let mut queue = use_resource(move || {
        let service = client.announcements(Role::Admin);
        async move {
            service
                .list(Some(AnnouncementStatus::Pending), 1, QUEUE_LIMIT)
                .await
                .map(|page| page.items)
        }
    });

    rsx! {
        div { class: "container",
            PageHeader { title: "Approvals", subtitle: "Student posts awaiting review" }

            match &*queue.read() {
                Some(Ok(items)) if items.is_empty() => rsx! {
                    EmptyState { title: "All caught up", hint: "No posts are waiting for review." }
                },
                Some(Ok(items)) => rsx! {
                    div { class: "approval-queue",
                        for post in items.iter().cloned() {
                            ApprovalCard {
                                key: "{post.announcement_id}",
                                on_reviewed: move |_| queue.restart(),
                                announcement: post,
                            }
                        }
                    }
                },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| queue.restart() }
                    }
                }
                None => rsx! { SkeletonList { rows: 3 } },
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Review {
    Approve,
    Reject,
}

#[component]
fn ApprovalCard(announcement: Announcement, on_reviewed: EventHandler<()>) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let mut reason = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let id = announcement.announcement_id;
    let service = client.announcements(Role::Admin);
    let review = move |decision: Review| {
        let service = service.clone();
        spawn(async move {
            busy.set(true);
            let result = match decision {
                Review::Approve => service.approve(id).await,
                Review::Reject => {
                    let reason = reason().trim().to_string();
                    service.reject(id, (!reason.is_empty()).then_some(reason)).await
                }
            };
            busy.set(false);
            match result {
                Ok(()) => {
                    let verb = if decision == Review::Approve { "approved" } else { "rejected" };
                    tracing::info!(announcement_id = id, verb, "Announcement reviewed");
                    toast_done(toasts, format!("Post {verb}"));
                    on_reviewed.call(());
                }
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
        });
    };
    let reject = review.clone();

    rsx! {
        Card { anchor: announcement.anchor(),
            CardHeader {
                title: announcement.title.clone(),
                meta: format!("{} · {}", announcement.author_name, announcement.created_at),
            }
            CardBody {
                p { "{announcement.content}" }
                TextField {
                    label: "Rejection reason",
                    name: "reason",
                    placeholder: "Optional",
                    value: reason(),
                    on_input: move |e: FormEvent| reason.set(e.value()),
                }
            }
            CardFooter {
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: busy(),
                    onclick: move |_| review(Review::Approve),
                    "Approve"
                }
                Button {
                    variant: ButtonVariant::Danger,
                    disabled: busy(),
                    onclick: move |_| reject(Review::Reject),
                    "Reject"
                }
            }
        }
    }
}
