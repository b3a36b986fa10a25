use dioxus::prelude::*;

/// Labelled single-line input. A non-empty `error` marks the field invalid
/// and is shown under it.
#[component]
pub fn TextField(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] label: String,
    #[props(default)] name: String,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] error: String,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "field-input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);
    let invalid = !error.is_empty();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: if invalid { "field field-invalid" } else { "field" },
            if !label.is_empty() {
                label { class: "field-label", r#for: "{name}",
                    "{label}"
                    if required {
                        span { class: "field-required", " *" }
                    }
                }
            }
            input {
                id: "{name}",
                name: "{name}",
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                required: required,
                disabled: disabled,
                "aria-invalid": invalid,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if invalid {
                p { class: "field-error", role: "alert", "{error}" }
            }
        }
    }
}

/// Multi-line variant of [`TextField`] for post bodies and comments.
#[component]
pub fn TextArea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] label: String,
    #[props(default)] name: String,
    #[props(default)] placeholder: String,
    #[props(default = 4)] rows: u32,
    #[props(default)] error: String,
    #[props(default = false)] disabled: bool,
) -> Element {
    let invalid = !error.is_empty();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: if invalid { "field field-invalid" } else { "field" },
            if !label.is_empty() {
                label { class: "field-label", r#for: "{name}", "{label}" }
            }
            textarea {
                class: "field-input",
                id: "{name}",
                name: "{name}",
                rows: "{rows}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                "aria-invalid": invalid,
                oninput: move |evt| on_input.call(evt),
            }
            if invalid {
                p { class: "field-error", role: "alert", "{error}" }
            }
        }
    }
}
