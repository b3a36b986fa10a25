use dioxus::prelude::*;
use shared_types::{Announcement, Comment, CreateCommentRequest, FocusQuery, Role, REACTION_TYPES};
use shared_ui::{
    toast_done, toast_failed, use_toast, Badge, BadgeTone, Button, ButtonVariant, Card, CardBody,
    CardFooter, CardHeader, EmptyState, ErrorBanner, PageHeader, SkeletonList, TextArea,
};

use crate::auth::use_client;
use crate::focus::use_focus_target;

/// Posts fetched per newsfeed load.
const FEED_LIMIT: u32 = 50;

#[component]
pub fn AdminNewsfeed(
    notification: Option<String>,
    focus: Option<String>,
    id: Option<String>,
    comment: Option<String>,
) -> Element {
    let query = FocusQuery::from_params(
        notification.as_deref(),
        focus.as_deref(),
        id.as_deref(),
        comment.as_deref(),
    );
    rsx! { Newsfeed { role: Role::Admin, query } }
}

#[component]
pub fn StudentNewsfeed(
    notification: Option<String>,
    focus: Option<String>,
    id: Option<String>,
    comment: Option<String>,
) -> Element {
    let query = FocusQuery::from_params(
        notification.as_deref(),
        focus.as_deref(),
        id.as_deref(),
        comment.as_deref(),
    );
    rsx! { Newsfeed { role: Role::Student, query } }
}

/// Approved posts, pinned first. A comment deep link expands the parent
/// post's thread and waits for it before scrolling.
#[component]
fn Newsfeed(role: Role, query: FocusQuery) -> Element {
    let client = use_client();
    let mut thread_ready = use_signal(|| false);

    let mut posts = use_resource(move || {
        let service = client.announcements(role);
        async move {
            let page = service.list(None, 1, FEED_LIMIT).await?;
            let mut visible: Vec<Announcement> =
                page.items.into_iter().filter(|a| a.status.is_visible()).collect();
            visible.sort_by(|a, b| b.is_pinned.cmp(&a.is_pinned));
            Ok::<_, shared_types::ApiError>(visible)
        }
    });

    let posts_loaded = matches!(&*posts.read(), Some(Ok(_)));
    let loaded = posts_loaded && (query.comment.is_none() || thread_ready());
    use_focus_target(query.clone(), loaded);

    let expand_for = query.comment.and(query.id);

    rsx! {
        div { class: "container",
            PageHeader {
                title: "Newsfeed",
                subtitle: "Announcements from across the school",
            }

            match &*posts.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    EmptyState {
                        title: "Nothing posted yet",
                        hint: "New announcements will appear here once approved.",
                    }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "feed",
                        for post in list.iter().cloned() {
                            AnnouncementCard {
                                key: "{post.announcement_id}",
                                role,
                                expanded: expand_for == Some(post.announcement_id),
                                on_thread_loaded: move |_| thread_ready.set(true),
                                on_archived: move |_| posts.restart(),
                                announcement: post,
                            }
                        }
                    }
                },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| posts.restart() }
                    }
                }
                None => rsx! { SkeletonList { rows: 4 } },
            }
        }
    }
}

#[component]
fn AnnouncementCard(
    role: Role,
    announcement: Announcement,
    expanded: bool,
    on_thread_loaded: EventHandler<()>,
    on_archived: EventHandler<()>,
) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let mut show_comments = use_signal(move || expanded);
    let mut reactions = use_signal(|| announcement.reaction_count);

    let id = announcement.announcement_id;
    let meta = if announcement.created_at.is_empty() {
        announcement.author_name.clone()
    } else {
        format!("{} · {}", announcement.author_name, announcement.created_at)
    };

    let react = {
        let service = client.announcements(role);
        move |kind: &'static str| {
            let service = service.clone();
            spawn(async move {
                match service.react(id, kind).await {
                    Ok(()) => reactions += 1,
                    Err(e) => toast_failed(toasts, e.friendly_message()),
                }
            });
        }
    };

    let archive = {
        let service = client.announcements(role);
        move |_| {
            let service = service.clone();
            spawn(async move {
                match service.archive(id).await {
                    Ok(()) => {
                        toast_done(toasts, "Announcement archived");
                        on_archived.call(());
                    }
                    Err(e) => toast_failed(toasts, e.friendly_message()),
                }
            });
        }
    };

    rsx! {
        Card { anchor: announcement.anchor(), class: "feed-post",
            CardHeader { title: announcement.title.clone(), meta,
                if announcement.is_pinned {
                    Badge { tone: BadgeTone::Info, "Pinned" }
                }
                if announcement.is_alert {
                    Badge { tone: BadgeTone::Danger, "Alert" }
                }
                if let Some(category) = announcement.category.clone() {
                    Badge { "{category}" }
                }
            }
            CardBody {
                p { class: "feed-content", "{announcement.content}" }
            }
            CardFooter {
                div { class: "feed-reactions",
                    for kind in REACTION_TYPES.iter().copied() {
                        Button {
                            key: "{kind}",
                            variant: ButtonVariant::Ghost,
                            onclick: {
                                let react = react.clone();
                                move |_| react(kind)
                            },
                            "{kind}"
                        }
                    }
                    span { class: "feed-reaction-count", "{reactions} reactions" }
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| show_comments.toggle(),
                    if show_comments() { "Hide comments" } else { "Comments ({announcement.comment_count})" }
                }
                if role == Role::Admin {
                    Button { variant: ButtonVariant::Danger, onclick: archive, "Archive" }
                }
            }
            if show_comments() {
                CommentThread { role, announcement_id: id, on_loaded: on_thread_loaded }
            }
        }
    }
}

#[component]
fn CommentThread(role: Role, announcement_id: i64, on_loaded: EventHandler<()>) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let mut draft = use_signal(String::new);
    let mut draft_error = use_signal(String::new);
    let mut posting = use_signal(|| false);

    let mut comments = use_resource(move || {
        let service = client.announcements(role);
        async move {
            let result = service.comments(announcement_id).await;
            if result.is_ok() {
                on_loaded.call(());
            }
            result
        }
    });

    let submit = {
        let service = client.announcements(role);
        move |evt: FormEvent| {
            evt.prevent_default();
            let service = service.clone();
            async move {
                posting.set(true);
                draft_error.set(String::new());
                let req = CreateCommentRequest {
                    content: draft().trim().to_string(),
                    parent_comment_id: None,
                };
                match service.add_comment(announcement_id, &req).await {
                    Ok(_) => {
                        draft.set(String::new());
                        comments.restart();
                    }
                    Err(e) if !e.field_errors.is_empty() => {
                        draft_error.set(e.field_errors.values().next().cloned().unwrap_or_default());
                    }
                    Err(e) => toast_failed(toasts, e.friendly_message()),
                }
                posting.set(false);
            }
        }
    };

    rsx! {
        section { class: "comment-thread",
            match &*comments.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "comment-empty", "No comments yet." }
                },
                Some(Ok(list)) => rsx! {
                    ul { class: "comment-list",
                        for c in list.iter() {
                            CommentItem { key: "{c.comment_id}", comment: c.clone() }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorBanner {
                        message: e.friendly_message(),
                        on_retry: move |_| comments.restart(),
                    }
                },
                None => rsx! { SkeletonList { rows: 2 } },
            }
            form { class: "comment-form", onsubmit: submit,
                TextArea {
                    name: "comment",
                    placeholder: "Write a comment...",
                    rows: 2,
                    value: draft(),
                    error: draft_error(),
                    on_input: move |e: FormEvent| draft.set(e.value()),
                }
                Button { button_type: "submit", loading: posting(), "Post comment" }
            }
        }
    }
}

#[component]
fn CommentItem(comment: Comment) -> Element {
    rsx! {
        li { id: comment.anchor(), class: "comment",
            div { class: "comment-meta",
                strong { "{comment.author_name}" }
                span { " {comment.created_at}" }
            }
            p { class: "comment-body", "{comment.content}" }
        }
    }
}
