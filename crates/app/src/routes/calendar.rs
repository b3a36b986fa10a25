use chrono::NaiveDate;
use dioxus::prelude::*;
use shared_types::{CalendarEvent, CreateCalendarEventRequest, FocusQuery, Role};
use shared_ui::{
    toast_done, toast_failed, use_toast, Badge, Button, ButtonVariant, Card, CardBody, CardFooter,
    CardHeader, EmptyState, ErrorBanner, PageHeader, SkeletonList, TextArea, TextField,
};
use std::collections::HashMap;

use crate::auth::use_client;
use crate::focus::use_focus_target;

const CALENDAR_LIMIT: u32 = 100;

#[component]
pub fn AdminCalendar(
    notification: Option<String>,
    focus: Option<String>,
    id: Option<String>,
) -> Element {
    let query = FocusQuery::from_params(notification.as_deref(), focus.as_deref(), id.as_deref(), None);
    rsx! { CalendarPage { role: Role::Admin, query } }
}

#[component]
pub fn StudentCalendar(
    notification: Option<String>,
    focus: Option<String>,
    id: Option<String>,
) -> Element {
    let query = FocusQuery::from_params(notification.as_deref(), focus.as_deref(), id.as_deref(), None);
    rsx! { CalendarPage { role: Role::Student, query } }
}

#[component]
fn CalendarPage(role: Role, query: FocusQuery) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let mut show_form = use_signal(|| false);
    let archive_service = client.calendar(role);

    let mut events = use_resource(move || {
        let service = client.calendar(role);
        async move {
            let page = service.list(1, CALENDAR_LIMIT).await?;
            let mut items = page.items;
            items.sort_by_key(|e| e.event_date);
            Ok::<_, shared_types::ApiError>(items)
        }
    });

    let loaded = matches!(&*events.read(), Some(Ok(_)));
    use_focus_target(query, loaded);

    let archive = move |calendar_id: i64| {
        let service = archive_service.clone();
        spawn(async move {
            match service.archive(calendar_id).await {
                Ok(()) => {
                    toast_done(toasts, "Event archived");
                    events.restart();
                }
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
        });
    };

    rsx! {
        div { class: "container",
            PageHeader { title: "School Calendar", subtitle: "Upcoming events and activities",
                if role == Role::Admin {
                    Button {
                        variant: if show_form() { ButtonVariant::Secondary } else { ButtonVariant::Primary },
                        onclick: move |_| show_form.toggle(),
                        if show_form() { "Cancel" } else { "New event" }
                    }
                }
            }

            if show_form() {
                EventForm {
                    on_created: move |_| {
                        show_form.set(false);
                        events.restart();
                    },
                }
            }

            match &*events.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    EmptyState { title: "No events scheduled" }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "calendar-list",
                        for event in list.iter().cloned() {
                            EventCard {
                                key: "{event.calendar_id}",
                                can_archive: role == Role::Admin,
                                on_archive: {
                                    let archive = archive.clone();
                                    move |id| archive(id)
                                },
                                event,
                            }
                        }
                    }
                },
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        ErrorBanner { message, on_retry: move |_| events.restart() }
                    }
                }
                None => rsx! { SkeletonList { rows: 4 } },
            }
        }
    }
}

fn date_label(event: &CalendarEvent) -> String {
    let start = event.event_date.format("%b %-d, %Y");
    match event.end_date {
        Some(end) if end != event.event_date => format!("{start} to {}", end.format("%b %-d, %Y")),
        _ => start.to_string(),
    }
}

#[component]
fn EventCard(event: CalendarEvent, can_archive: bool, on_archive: EventHandler<i64>) -> Element {
    let id = event.calendar_id;
    let mut meta = date_label(&event);
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        meta.push_str(&format!(" · {location}"));
    }

    rsx! {
        Card { anchor: event.anchor(), class: "calendar-event",
            CardHeader { title: event.title.clone(), meta,
                if let Some(category) = event.category.clone() {
                    Badge { "{category}" }
                }
            }
            if let Some(description) = event.description.clone() {
                CardBody {
                    p { "{description}" }
                }
            }
            if can_archive {
                CardFooter {
                    Button {
                        variant: ButtonVariant::Danger,
                        onclick: move |_| on_archive.call(id),
                        "Archive"
                    }
                }
            }
        }
    }
}

fn opt_str(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Admin-only event form. Dates come from `<input type="date">` as ISO strings.
#[component]
fn EventForm(on_created: EventHandler<()>) -> Element {
    let client = use_client();
    let toasts = use_toast();

    let mut title = use_signal(String::new);
    let mut event_date = use_signal(String::new);
    let mut end_date = use_signal(String::new);
    let mut location = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let service = client.calendar(Role::Admin);
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let service = service.clone();
        async move {
            errors.set(HashMap::new());
            let Ok(start) = NaiveDate::parse_from_str(event_date().trim(), "%Y-%m-%d") else {
                errors.set(HashMap::from([(
                    "event_date".to_string(),
                    "Pick a start date".to_string(),
                )]));
                return;
            };
            let end = match opt_str(&end_date()) {
                None => None,
                Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        errors.set(HashMap::from([(
                            "end_date".to_string(),
                            "End date is not a valid date".to_string(),
                        )]));
                        return;
                    }
                },
            };

            let req = CreateCalendarEventRequest {
                title: title().trim().to_string(),
                description: opt_str(&description()),
                event_date: start,
                end_date: end,
                location: opt_str(&location()),
                category: opt_str(&category()),
            };

            saving.set(true);
            match service.create(&req).await {
                Ok(created) => {
                    tracing::info!(calendar_id = created.calendar_id, "Calendar event created");
                    toast_done(toasts, "Event created");
                    on_created.call(());
                }
                Err(e) if !e.field_errors.is_empty() => errors.set(e.field_errors),
                Err(e) => toast_failed(toasts, e.friendly_message()),
            }
            saving.set(false);
        }
    };

    let field_error = move |key: &str| errors.read().get(key).cloned().unwrap_or_default();
    // Range checks are reported against the whole request.
    let range_error = {
        let e = field_error("end_date");
        if e.is_empty() { field_error("__all__") } else { e }
    };

    rsx! {
        Card { class: "calendar-form",
            CardHeader { title: "New event" }
            CardBody {
                form { onsubmit: submit,
                    TextField {
                        label: "Title",
                        name: "title",
                        required: true,
                        value: title(),
                        error: field_error("title"),
                        on_input: move |e: FormEvent| title.set(e.value()),
                    }
                    div { class: "form-row",
                        TextField {
                            label: "Start date",
                            name: "event_date",
                            input_type: "date",
                            required: true,
                            value: event_date(),
                            error: field_error("event_date"),
                            on_input: move |e: FormEvent| event_date.set(e.value()),
                        }
                        TextField {
                            label: "End date",
                            name: "end_date",
                            input_type: "date",
                            value: end_date(),
                            error: range_error,
                            on_input: move |e: FormEvent| end_date.set(e.value()),
                        }
                    }
                    div { class: "form-row",
                        TextField {
                            label: "Location",
                            name: "location",
                            value: location(),
                            on_input: move |e: FormEvent| location.set(e.value()),
                        }
                        TextField {
                            label: "Category",
                            name: "category",
                            value: category(),
                            on_input: move |e: FormEvent| category.set(e.value()),
                        }
                    }
                    TextArea {
                        label: "Description",
                        name: "description",
                        value: description(),
                        on_input: move |e: FormEvent| description.set(e.value()),
                    }
                    Button { button_type: "submit", loading: saving(), "Create event" }
                }
            }
        }
    }
}
