//! Carries notification navigation state across a route change and applies
//! it once the destination has rendered its records.

use client::Navigator;
use dioxus::prelude::*;
use shared_types::{FocusQuery, NavigationState, Role, HIGHLIGHT_CLASS};
use shared_ui::focus::{scroll_and_highlight, FocusRequest};

use crate::auth::landing_route;
use crate::routes::Route;

/// State handed from the notification list to the page it opens. The router
/// has no history state, so it travels through context.
#[derive(Clone, Copy)]
pub struct PendingFocus(pub Signal<Option<NavigationState>>);

impl PendingFocus {
    pub fn new() -> Self {
        Self(Signal::new(None))
    }
}

/// [`Navigator`] over the Dioxus router. Unparseable paths fall back to the
/// role's landing route.
pub struct RouterNavigator {
    pub role: Role,
    pub pending: PendingFocus,
}

impl Navigator for RouterNavigator {
    fn navigate(&self, target: &shared_types::NavigationTarget) {
        let mut pending = self.pending.0;
        pending.set(target.state.clone());
        match target.path.parse::<Route>() {
            Ok(route) => {
                navigator().push(route);
            }
            Err(e) => {
                tracing::warn!(path = %target.path, error = %e, "Unroutable notification target");
                pending.set(None);
                navigator().push(landing_route(self.role));
            }
        }
    }
}

/// Scroll to and highlight the deep-link target once `loaded` turns true.
///
/// Pending state from a notification click wins over the query parameters
/// of a direct link. Runs again whenever the query changes.
pub fn use_focus_target(query: FocusQuery, loaded: bool) {
    let pending = use_context::<PendingFocus>();

    use_effect(use_reactive!(|query, loaded| {
        if !loaded {
            return;
        }
        let mut slot = pending.0;
        let state = slot.take().or_else(|| query.to_state());
        let Some(state) = state else {
            return;
        };
        if !state.highlight_target {
            return;
        }

        let ui = &client::config::config().ui;
        let request = FocusRequest {
            target: state.scroll_to.clone(),
            behavior: state.scroll_behavior.as_str().to_string(),
            delay_ms: ui.scroll_delay_ms,
            highlight_ms: ui.highlight_duration_ms,
            highlight_class: HIGHLIGHT_CLASS.to_string(),
        };
        spawn(async move {
            if !scroll_and_highlight(&request).await {
                tracing::warn!(element = %request.target, "Deep-link target not found on page");
            }
        });
    }));
}
