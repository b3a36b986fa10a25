use dioxus::prelude::*;

/// Page title with optional subtitle; children render as right-aligned actions.
#[component]
pub fn PageHeader(title: String, #[props(default)] subtitle: Option<String>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}
