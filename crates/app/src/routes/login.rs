use crate::auth::{landing_route, use_auth, use_client};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{LoginRequest, Role};
use shared_ui::{Button, Card, CardBody, CardHeader, TextField};
use std::collections::HashMap;

#[component]
pub fn AdminLogin() -> Element {
    rsx! { LoginForm { role: Role::Admin } }
}

#[component]
pub fn StudentLogin() -> Element {
    rsx! { LoginForm { role: Role::Student } }
}

/// Email/password sign-in for one role. A role that is already signed in is
/// sent straight to its landing page.
#[component]
fn LoginForm(role: Role) -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth.is_authenticated(role) {
            navigator().replace(landing_route(role));
        }
    });

    let service = client.auth(role);
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let service = service.clone();
        async move {
            loading.set(true);
            error_msg.set(None);
            field_errors.set(HashMap::new());

            let credentials = LoginRequest {
                email: email().trim().to_string(),
                password: password(),
            };
            match service.login(&credentials).await {
                Ok(session) => {
                    auth.set_user(role, session.user);
                    navigator().push(landing_route(role));
                }
                Err(e) if !e.field_errors.is_empty() => field_errors.set(e.field_errors),
                Err(e) => error_msg.set(Some(e.friendly_message())),
            }
            loading.set(false);
        }
    };

    let (title, other_label, other_route) = match role {
        Role::Admin => ("Administrator sign in", "Student? Sign in here", Route::StudentLogin {}),
        Role::Student => ("Student sign in", "Staff? Sign in here", Route::AdminLogin {}),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader { title: title.to_string(), meta: "School e-Bulletin Board".to_string() }
                CardBody {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }
                    form { onsubmit: handle_login,
                        TextField {
                            label: "Email",
                            name: "email",
                            input_type: "email",
                            placeholder: "you@school.edu",
                            value: email(),
                            error: field_errors.read().get("email").cloned().unwrap_or_default(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        TextField {
                            label: "Password",
                            name: "password",
                            input_type: "password",
                            value: password(),
                            error: field_errors.read().get("password").cloned().unwrap_or_default(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Button { button_type: "submit", loading: loading(), class: "auth-submit",
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                    p { class: "auth-switch",
                        Link { to: other_route, "{other_label}" }
                    }
                }
            }
        }
    }
}
