use dioxus::prelude::*;

use crate::components::badge::CountBadge;

/// One tab of a [`TabStrip`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub key: String,
    pub label: String,
    pub count: i64,
}

/// Horizontal tab bar with optional counters.
#[component]
pub fn TabStrip(items: Vec<TabItem>, active: String, on_select: EventHandler<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "tab-strip", role: "tablist",
            for item in items.into_iter() {
                button {
                    key: "{item.key}",
                    r#type: "button",
                    role: "tab",
                    class: if item.key == active { "tab active" } else { "tab" },
                    "aria-selected": item.key == active,
                    onclick: {
                        let key = item.key.clone();
                        move |_| on_select.call(key.clone())
                    },
                    "{item.label}"
                    CountBadge { count: item.count }
                }
            }
        }
    }
}
