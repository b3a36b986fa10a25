use dioxus::prelude::*;

use crate::routes::Route;

/// 404 page for any path outside the two portals.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Page Not Found" }
                p { class: "not-found-message",
                    "The page "
                    code { "{path}" }
                    " does not exist on the bulletin board."
                }
                div { class: "not-found-links",
                    Link { to: Route::StudentLogin {}, class: "not-found-link", "Student sign in" }
                    Link { to: Route::AdminLogin {}, class: "not-found-link", "Staff sign in" }
                }
            }
        }
    }
}
