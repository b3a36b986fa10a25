//! Scroll-to and highlight for deep-linked elements.

use dioxus::prelude::*;

/// Timing and styling of a focus request.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    /// DOM id of the element to bring into view.
    pub target: String,
    /// `smooth` or `auto`.
    pub behavior: String,
    /// Wait for the page to render before looking the element up.
    pub delay_ms: u32,
    /// Highlight class lifetime.
    pub highlight_ms: u32,
    pub highlight_class: String,
}

/// JS for a focus request. The element is looked up after `delay_ms`; a
/// missing element resolves to `false` instead of throwing.
pub fn focus_script(req: &FocusRequest) -> String {
    let target = js_string(&req.target);
    let class = js_string(&req.highlight_class);
    let behavior = js_string(&req.behavior);
    format!(
        r#"
        return await new Promise(function(resolve) {{
            setTimeout(function() {{
                var el = document.getElementById({target});
                if (!el) {{ resolve(false); return; }}
                el.scrollIntoView({{ behavior: {behavior}, block: 'center' }});
                el.classList.add({class});
                setTimeout(function() {{ el.classList.remove({class}); }}, {highlight_ms});
                resolve(true);
            }}, {delay_ms});
        }});
        "#,
        delay_ms = req.delay_ms,
        highlight_ms = req.highlight_ms,
    )
}

/// Run a focus request in the page. Returns whether the element was found.
pub async fn scroll_and_highlight(req: &FocusRequest) -> bool {
    let eval = document::eval(&focus_script(req));
    match eval.join::<bool>().await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(element = %req.target, error = ?e, "Focus script failed");
            false
        }
    }
}

/// Quote a value as a JS string literal.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
