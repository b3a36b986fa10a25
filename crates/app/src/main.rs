use client::{BulletinClient, SessionScope};
use dioxus::prelude::*;
use shared_types::ClientConfig;
use std::sync::Arc;

mod auth;
mod focus;
mod routes;
mod storage;

use auth::{sign_out_scope, AuthState};
use focus::PendingFocus;
use routes::Route;
use storage::BrowserStore;

/// Build-time copy of the workspace `config.toml`.
const EMBEDDED_CONFIG: &str = include_str!("../../../config.toml");

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let config = ClientConfig::from_toml_or_default(EMBEDDED_CONFIG);
    client::config::install_config(config);

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let store = use_hook(BrowserStore::new);
    let client = use_context_provider({
        let store = store.clone();
        move || BulletinClient::new(client::config::config(), Arc::new(store))
    });
    let mut auth = use_context_provider(AuthState::new);
    use_context_provider(PendingFocus::new);

    use_hook(move || {
        client::register_unauthorized_handler(move |scope: SessionScope| {
            sign_out_scope(auth, scope);
        });
    });

    // Session keys must be in the mirror before any guard reads them.
    let hydrated = use_resource(move || {
        let store = store.clone();
        let client = client.clone();
        async move {
            store.hydrate().await;
            auth.sync_from(&client);
            true
        }
    });

    let ready = matches!(*hydrated.read(), Some(true));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::theme::ThemeSeed {}
        shared_ui::ToastProvider {
            if ready {
                Router::<Route> {}
            } else {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            }
        }
    }
}
