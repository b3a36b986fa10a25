pub mod announcements;
pub mod archive;
pub mod calendar;
pub mod dashboard;
pub mod login;
pub mod newsfeed;
pub mod not_found;
pub mod notifications;

use crate::auth::{landing_route, login_route, use_auth, use_client};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBell, LdBookOpen, LdCalendar, LdFileText, LdFolder, LdLayoutDashboard, LdLock, LdUserCheck,
};
use dioxus_free_icons::Icon;
use shared_types::Role;
use shared_ui::theme::{set_theme, ColorScheme};
use shared_ui::CountBadge;

use announcements::{AdminApprovals, AdminCreateAnnouncement, StudentCreateAnnouncement};
use archive::AdminArchive;
use calendar::{AdminCalendar, StudentCalendar};
use dashboard::AdminDashboard;
use login::{AdminLogin, StudentLogin};
use newsfeed::{AdminNewsfeed, StudentNewsfeed};
use not_found::NotFound;
use notifications::{AdminNotifications, StudentNotifications};

/// Application routes. Everything under `/admin` and `/student` sits behind
/// that role's guard.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[redirect("/", || Route::StudentLogin {})]
    #[route("/admin/login")]
    AdminLogin {},
    #[route("/student/login")]
    StudentLogin {},

    #[nest("/admin")]
    #[layout(AdminShell)]
    #[route("/dashboard")]
    AdminDashboard {},
    #[route("/newsfeed?:notification&:focus&:id&:comment")]
    AdminNewsfeed {
        notification: Option<String>,
        focus: Option<String>,
        id: Option<String>,
        comment: Option<String>,
    },
    #[route("/calendar?:notification&:focus&:id")]
    AdminCalendar {
        notification: Option<String>,
        focus: Option<String>,
        id: Option<String>,
    },
    #[route("/announcements/new")]
    AdminCreateAnnouncement {},
    #[route("/approvals")]
    AdminApprovals {},
    #[route("/archive?:entity")]
    AdminArchive { entity: Option<String> },
    #[route("/notifications")]
    AdminNotifications {},
    #[end_layout]
    #[end_nest]

    #[nest("/student")]
    #[layout(StudentShell)]
    #[route("/newsfeed?:notification&:focus&:id&:comment")]
    StudentNewsfeed {
        notification: Option<String>,
        focus: Option<String>,
        id: Option<String>,
        comment: Option<String>,
    },
    #[route("/calendar?:notification&:focus&:id")]
    StudentCalendar {
        notification: Option<String>,
        focus: Option<String>,
        id: Option<String>,
    },
    #[route("/announcements/new")]
    StudentCreateAnnouncement {},
    #[route("/notifications")]
    StudentNotifications {},
    #[end_layout]
    #[end_nest]

    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn AdminShell() -> Element {
    rsx! { PortalShell { role: Role::Admin } }
}

#[component]
fn StudentShell() -> Element {
    rsx! { PortalShell { role: Role::Student } }
}

/// Guard plus layout for one role: redirects to the role's login page when
/// no session is stored, otherwise renders the nav bar and the page.
#[component]
fn PortalShell(role: Role) -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let route: Route = use_route();

    let mut unread = use_signal(|| 0_i64);
    let notifications = client.notifications(role);
    use_future(move || {
        let notifications = notifications.clone();
        async move {
            let poll_ms = client::config::config().ui.notification_poll_secs.max(5) * 1000;
            while auth.is_authenticated(role) {
                match notifications.unread_count().await {
                    Ok(count) => unread.set(count),
                    Err(e) if e.is_unauthorized() => break,
                    Err(e) => tracing::debug!(error = %e, "Unread count refresh failed"),
                }
                sleep_ms(poll_ms).await;
            }
        }
    });

    let mut scheme = use_signal(ColorScheme::default);
    let auth_service = client.auth(role);
    let logout = move |_| {
        let auth_service = auth_service.clone();
        spawn(async move {
            auth_service.logout().await;
            auth.clear(role);
        });
    };

    // Also fires when the unauthorized hook signs the role out mid-session.
    use_effect(move || {
        if !auth.is_authenticated(role) {
            navigator().replace(login_route(role));
        }
    });

    if !auth.is_authenticated(role) {
        return rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        };
    }

    let display_name = auth.user(role).map(|u| u.display_name()).unwrap_or_default();
    let items: Vec<(NavItem, bool)> = nav_items(role)
        .into_iter()
        .map(|item| {
            let active = item.is_active(&route);
            (item, active)
        })
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "portal", "data-role": role.as_str(),
            header { class: "portal-header",
                Link { to: landing_route(role), class: "portal-brand", "e-Bulletin" }
                nav { class: "portal-nav",
                    for (item, active) in items {
                        Link {
                            key: "{item.label}",
                            to: item.route.clone(),
                            class: if active { "nav-link active" } else { "nav-link" },
                            {item.icon}
                            span { "{item.label}" }
                            if item.label == "Notifications" {
                                CountBadge { count: unread() }
                            }
                        }
                    }
                }
                div { class: "portal-user",
                    button {
                        class: "theme-toggle",
                        r#type: "button",
                        title: "Switch colour scheme",
                        onclick: move |_| {
                            let next = scheme().next();
                            scheme.set(next);
                            set_theme(next);
                        },
                        "{scheme().display_name()}"
                    }
                    span { class: "portal-user-name", "{display_name}" }
                    button { class: "nav-link", r#type: "button", onclick: logout,
                        Icon::<LdLock> { icon: LdLock, width: 16, height: 16 }
                        "Sign out"
                    }
                }
            }
            main { class: "portal-main",
                Outlet::<Route> {}
            }
        }
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
    icon: Element,
}

impl NavItem {
    fn is_active(&self, current: &Route) -> bool {
        std::mem::discriminant(&self.route) == std::mem::discriminant(current)
    }
}

fn nav_items(role: Role) -> Vec<NavItem> {
    let newsfeed = match role {
        Role::Admin => Route::AdminNewsfeed { notification: None, focus: None, id: None, comment: None },
        Role::Student => Route::StudentNewsfeed { notification: None, focus: None, id: None, comment: None },
    };
    let calendar = match role {
        Role::Admin => Route::AdminCalendar { notification: None, focus: None, id: None },
        Role::Student => Route::StudentCalendar { notification: None, focus: None, id: None },
    };
    let create = match role {
        Role::Admin => Route::AdminCreateAnnouncement {},
        Role::Student => Route::StudentCreateAnnouncement {},
    };
    let notifications = match role {
        Role::Admin => Route::AdminNotifications {},
        Role::Student => Route::StudentNotifications {},
    };

    let mut items = Vec::new();
    if role == Role::Admin {
        items.push(NavItem {
            label: "Dashboard",
            route: Route::AdminDashboard {},
            icon: rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 } },
        });
    }
    items.push(NavItem {
        label: "Newsfeed",
        route: newsfeed,
        icon: rsx! { Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 } },
    });
    items.push(NavItem {
        label: "Calendar",
        route: calendar,
        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 16, height: 16 } },
    });
    items.push(NavItem {
        label: "Post",
        route: create,
        icon: rsx! { Icon::<LdBookOpen> { icon: LdBookOpen, width: 16, height: 16 } },
    });
    if role == Role::Admin {
        items.push(NavItem {
            label: "Approvals",
            route: Route::AdminApprovals {},
            icon: rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 16, height: 16 } },
        });
        items.push(NavItem {
            label: "Archive",
            route: Route::AdminArchive { entity: None },
            icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 16, height: 16 } },
        });
    }
    items.push(NavItem {
        label: "Notifications",
        route: notifications,
        icon: rsx! { Icon::<LdBell> { icon: LdBell, width: 16, height: 16 } },
    });
    items
}

/// Browser-side sleep; there is no timer runtime in the SPA.
pub async fn sleep_ms(ms: u32) {
    let eval = document::eval(&format!(
        "await new Promise(function(r) {{ setTimeout(r, {ms}); }}); return true;"
    ));
    let _ = eval.join::<bool>().await;
}
