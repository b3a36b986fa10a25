use dioxus::prelude::*;

/// Surface for a post, event or form. `anchor` becomes the element id so
/// deep links can scroll to it.
#[component]
pub fn Card(
    #[props(default)] anchor: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut base = vec![Attribute::new("class", "card", None, false)];
    if let Some(id) = anchor {
        base.push(Attribute::new("id", id, None, false));
    }
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        article {
            ..merged,
            {children}
        }
    }
}

/// Title row with an optional trailing action area.
#[component]
pub fn CardHeader(title: String, #[props(default)] meta: Option<String>, children: Element) -> Element {
    rsx! {
        header { class: "card-header",
            div {
                h3 { class: "card-title", "{title}" }
                if let Some(meta) = meta {
                    p { class: "card-meta", "{meta}" }
                }
            }
            div { class: "card-actions", {children} }
        }
    }
}

#[component]
pub fn CardBody(children: Element) -> Element {
    rsx! {
        div { class: "card-body", {children} }
    }
}

#[component]
pub fn CardFooter(children: Element) -> Element {
    rsx! {
        footer { class: "card-footer", {children} }
    }
}
