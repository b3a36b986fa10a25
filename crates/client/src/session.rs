//! Role-scoped token storage.
//!
//! Admin and student sessions live under distinct keys so both can be signed
//! in from one browser. A legacy general set of keys is read as a fallback.

use std::collections::HashMap;

use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{AuthUser, Role, Session};

use crate::storage::SharedStore;

/// Which set of storage keys a token manager owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionScope {
    /// Legacy keys written by older builds.
    General,
    Role(Role),
}

impl SessionScope {
    pub fn keys(&self) -> SessionKeys {
        match self {
            SessionScope::General => GENERAL_KEYS,
            SessionScope::Role(Role::Admin) => ADMIN_KEYS,
            SessionScope::Role(Role::Student) => STUDENT_KEYS,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionScope::General => None,
            SessionScope::Role(role) => Some(*role),
        }
    }
}

impl From<Role> for SessionScope {
    fn from(role: Role) -> Self {
        SessionScope::Role(role)
    }
}

/// Storage key names for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: &'static str,
    pub user: &'static str,
    pub refresh_token: &'static str,
}

pub const GENERAL_KEYS: SessionKeys = SessionKeys {
    token: "token",
    user: "user",
    refresh_token: "refreshToken",
};

pub const ADMIN_KEYS: SessionKeys = SessionKeys {
    token: "adminToken",
    user: "adminUser",
    refresh_token: "adminRefreshToken",
};

pub const STUDENT_KEYS: SessionKeys = SessionKeys {
    token: "studentToken",
    user: "studentUser",
    refresh_token: "studentRefreshToken",
};

/// Order in which a token is looked up when the caller does not know which
/// role is signed in.
pub const FALLBACK_ORDER: [SessionScope; 3] = [
    SessionScope::General,
    SessionScope::Role(Role::Admin),
    SessionScope::Role(Role::Student),
];

/// Reads and writes one scope's token, user and refresh token.
#[derive(Clone)]
pub struct TokenManager {
    store: SharedStore,
    scope: SessionScope,
}

impl TokenManager {
    pub fn new(store: SharedStore, scope: SessionScope) -> Self {
        Self { store, scope }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    pub fn get_token(&self) -> Option<String> {
        self.store
            .get(self.scope.keys().token)
            .filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(self.scope.keys().token, token);
    }

    pub fn remove_token(&self) {
        self.store.remove(self.scope.keys().token);
    }

    /// `Authorization: Bearer <token>`, or an empty map without a token.
    pub fn get_auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(token) = self.get_token() {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.store
            .get(self.scope.keys().refresh_token)
            .filter(|t| !t.is_empty())
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.store.set(self.scope.keys().refresh_token, token);
    }

    pub fn get_user<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.store.get(self.scope.keys().user)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(scope = ?self.scope, error = %e, "Discarding unreadable stored user");
                None
            }
        }
    }

    pub fn set_user<T: Serialize>(&self, user: &T) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(self.scope.keys().user, &json),
            Err(e) => tracing::warn!(scope = ?self.scope, error = %e, "Failed to serialize user"),
        }
    }

    /// Remove the token, user and refresh token of this scope.
    pub fn clear(&self) {
        let keys = self.scope.keys();
        self.store.remove(keys.token);
        self.store.remove(keys.user);
        self.store.remove(keys.refresh_token);
    }
}

/// Role-keyed session persistence over a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn manager(&self, role: Role) -> TokenManager {
        TokenManager::new(self.store.clone(), SessionScope::Role(role))
    }

    pub fn general(&self) -> TokenManager {
        TokenManager::new(self.store.clone(), SessionScope::General)
    }

    pub fn save(&self, role: Role, session: &Session) {
        let manager = self.manager(role);
        manager.set_token(&session.access_token);
        manager.set_user(&session.user);
        match &session.refresh_token {
            Some(refresh) => manager.set_refresh_token(refresh),
            None => self.store.remove(SessionScope::Role(role).keys().refresh_token),
        }
    }

    /// The stored session for `role`; needs both a token and a user.
    pub fn load(&self, role: Role) -> Option<Session> {
        let manager = self.manager(role);
        let access_token = manager.get_token()?;
        let user: AuthUser = manager.get_user()?;
        Some(Session {
            user,
            access_token,
            refresh_token: manager.get_refresh_token(),
            expires_in: None,
        })
    }

    /// Clear `role`'s keys, and the legacy keys when they belong to the same role.
    pub fn clear(&self, role: Role) {
        self.manager(role).clear();
        let general = self.general();
        let legacy_role = general.get_user::<AuthUser>().map(|u| u.role);
        if legacy_role == Some(role) {
            general.clear();
        }
    }

    /// First token found in [`FALLBACK_ORDER`].
    pub fn any_token(&self) -> Option<(SessionScope, String)> {
        FALLBACK_ORDER.iter().find_map(|scope| {
            TokenManager::new(self.store.clone(), *scope)
                .get_token()
                .map(|t| (*scope, t))
        })
    }

    /// Role of the first signed-in scope in fallback order. A legacy token is
    /// attributed to the role of the legacy user record.
    pub fn active_role(&self) -> Option<Role> {
        let (scope, _) = self.any_token()?;
        match scope {
            SessionScope::Role(role) => Some(role),
            SessionScope::General => self.general().get_user::<AuthUser>().map(|u| u.role),
        }
    }
}

/// `exp` claim of a JWT, read without verifying the signature.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}

/// Expired, or unreadable, tokens are treated alike.
pub fn is_token_expired(token: &str, now_secs: i64) -> bool {
    match token_expiry(token) {
        Some(exp) => exp <= now_secs,
        None => true,
    }
}
