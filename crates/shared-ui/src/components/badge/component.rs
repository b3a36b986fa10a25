use dioxus::prelude::*;

/// Colour of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    pub fn class(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "neutral",
            BadgeTone::Info => "info",
            BadgeTone::Success => "success",
            BadgeTone::Warning => "warning",
            BadgeTone::Danger => "danger",
        }
    }
}

#[component]
pub fn Badge(
    #[props(default)] tone: BadgeTone,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-tone", tone.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

/// Text shown in a counter bubble: nothing at zero, `99+` past 99.
pub fn count_label(count: i64) -> Option<String> {
    match count {
        c if c <= 0 => None,
        c if c > 99 => Some("99+".to_string()),
        c => Some(c.to_string()),
    }
}

/// Unread/archived counter. Renders nothing when the count is zero.
#[component]
pub fn CountBadge(count: i64) -> Element {
    let Some(label) = count_label(count) else {
        return rsx! {};
    };
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span { class: "count-badge", "{label}" }
    }
}
