use serde::de::IgnoredAny;
use serde_json::Value;
use shared_types::{ApiError, AuthUser, LoginRequest, LoginResponse, Role, Session};
use validator::Validate;

use crate::http::{unwrap_data, ApiClient};
use crate::session::{is_token_expired, SessionStore};

/// Login and logout for one role.
#[derive(Clone)]
pub struct AuthService {
    role: Role,
    api: ApiClient,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(role: Role, api: ApiClient, sessions: SessionStore) -> Self {
        Self {
            role,
            api,
            sessions,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Validate the credentials locally, then post them to the role's login
    /// endpoint and persist the returned session under the role's keys.
    #[tracing::instrument(skip(self, credentials), fields(role = %self.role, email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Session, ApiError> {
        credentials.validate()?;

        let value: Value = self
            .api
            .post(self.role.login_endpoint(), credentials)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login failed");
                e
            })?;
        let response: LoginResponse = unwrap_data(value)?;

        let mut session = response.into_session();
        // Some backends omit the role on the user payload.
        session.user.role = self.role;
        self.sessions.save(self.role, &session);
        tracing::info!(user_id = session.user.id, "Signed in");
        Ok(session)
    }

    /// Tell the backend we are leaving, then clear the role's keys whatever
    /// the backend said.
    #[tracing::instrument(skip(self), fields(role = %self.role))]
    pub async fn logout(&self) {
        if self.api.tokens().get_token().is_some() {
            let result: Result<IgnoredAny, ApiError> =
                self.api.post("/auth/logout", &serde_json::json!({})).await;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Logout request failed; clearing local session anyway");
            }
        }
        self.sessions.clear(self.role);
        tracing::info!("Signed out");
    }

    pub fn current_session(&self) -> Option<Session> {
        self.sessions.load(self.role)
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.current_session().map(|s| s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some() && !self.session_expired()
    }

    /// True when there is no token or its `exp` has passed.
    pub fn session_expired(&self) -> bool {
        match self.api.tokens().get_token() {
            Some(token) => is_token_expired(&token, chrono::Utc::now().timestamp()),
            None => true,
        }
    }
}
