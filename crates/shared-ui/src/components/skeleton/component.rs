use dioxus::prelude::*;

/// Pulsing placeholder lines shown while a list loads.
#[component]
pub fn SkeletonList(#[props(default = 3)] rows: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "skeleton-list", "aria-busy": "true",
            for i in 0..rows {
                div { key: "{i}", class: "skeleton" }
            }
        }
    }
}
