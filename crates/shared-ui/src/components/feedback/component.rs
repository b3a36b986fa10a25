use dioxus::prelude::*;

/// Inline error with an optional retry action.
#[component]
pub fn ErrorBanner(message: String, #[props(default)] on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            if let Some(retry) = on_retry {
                button {
                    class: "error-retry",
                    r#type: "button",
                    onclick: move |_| retry.call(()),
                    "Try again"
                }
            }
        }
    }
}

#[component]
pub fn EmptyState(title: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "empty-state",
            p { class: "empty-title", "{title}" }
            if let Some(hint) = hint {
                p { class: "empty-hint", "{hint}" }
            }
        }
    }
}
