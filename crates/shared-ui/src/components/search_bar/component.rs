use dioxus::prelude::*;

/// Filter box with a clear button. Emits the raw text on every keystroke.
#[component]
pub fn SearchBox(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    let has_text = !value.is_empty();
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-box",
            input {
                r#type: "search",
                value: value,
                placeholder: placeholder,
                oninput: move |evt| on_search.call(evt.value()),
            }
            if has_text {
                button {
                    class: "search-clear",
                    r#type: "button",
                    "aria-label": "Clear search",
                    onclick: move |_| on_search.call(String::new()),
                    "×"
                }
            }
        }
    }
}

/// Rows-per-page picker.
#[component]
pub fn PageSizeSelect(value: usize, options: Vec<usize>, on_change: EventHandler<usize>) -> Element {
    rsx! {
        label { class: "page-size",
            "Show "
            select {
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(size) = evt.value().parse::<usize>() {
                        on_change.call(size);
                    }
                },
                for size in options.iter().copied() {
                    option { key: "{size}", value: "{size}", selected: size == value, "{size}" }
                }
            }
            " per page"
        }
    }
}

/// Row holding the search box, page-size picker and any extra filters.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar", {children} }
    }
}
