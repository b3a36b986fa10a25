use client::{BulletinClient, SessionScope};
use dioxus::prelude::*;
use shared_types::{AuthUser, Role};

use crate::routes::Route;

/// Signed-in user per role. Mirrors the session store so components
/// re-render on login and logout.
///
/// Slots are sync signals so the client's unauthorized hook can sign a role
/// out from inside any request future.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub admin: SyncSignal<Option<AuthUser>>,
    pub student: SyncSignal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            admin: Signal::new_maybe_sync(None),
            student: Signal::new_maybe_sync(None),
        }
    }

    fn slot(&self, role: Role) -> SyncSignal<Option<AuthUser>> {
        match role {
            Role::Admin => self.admin,
            Role::Student => self.student,
        }
    }

    pub fn user(&self, role: Role) -> Option<AuthUser> {
        self.slot(role).read().clone()
    }

    pub fn is_authenticated(&self, role: Role) -> bool {
        self.slot(role).read().is_some()
    }

    pub fn set_user(&mut self, role: Role, user: AuthUser) {
        self.slot(role).set(Some(user));
    }

    pub fn clear(&mut self, role: Role) {
        self.slot(role).set(None);
    }

    /// Re-read both roles from storage. Expired sessions count as signed out.
    pub fn sync_from(&mut self, client: &BulletinClient) {
        for role in Role::ALL {
            let auth = client.auth(role);
            let user = if auth.is_authenticated() {
                auth.current_user()
            } else {
                None
            };
            self.slot(role).set(user);
        }
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

pub fn use_client() -> BulletinClient {
    use_context::<BulletinClient>()
}

/// Called by the client after the server rejects a role's token. The token
/// is already gone from storage; dropping the user here lets the portal guard
/// send the role back to its login page.
pub fn sign_out_scope(mut auth: AuthState, scope: SessionScope) {
    let Some(role) = scope.role() else {
        return;
    };
    tracing::warn!(%role, "Session rejected by the server; signing out");
    auth.clear(role);
}

pub fn login_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminLogin {},
        Role::Student => Route::StudentLogin {},
    }
}

pub fn landing_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard {},
        Role::Student => Route::StudentNewsfeed {
            notification: None,
            focus: None,
            id: None,
            comment: None,
        },
    }
}
