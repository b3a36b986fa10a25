use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Page-based Previous/Next controls. `page` is 1-based; the parent clamps.
/// `summary` is the "Showing 11-20 of 34" label.
#[component]
pub fn Pagination(
    page: usize,
    total_pages: usize,
    #[props(default)] summary: String,
    on_change: EventHandler<usize>,
) -> Element {
    let total_pages = total_pages.max(1);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination", "aria-label": "Pagination",
            span { class: "pagination-summary", "{summary}" }
            div { class: "pagination-controls",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: page <= 1,
                    onclick: move |_| on_change.call(page.saturating_sub(1).max(1)),
                    "Previous"
                }
                span { class: "pagination-info", "Page {page} of {total_pages}" }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: page >= total_pages,
                    onclick: move |_| on_change.call(page + 1),
                    "Next"
                }
            }
        }
    }
}
