use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Who a session belongs to. Each role keeps its own token in storage so an
/// admin and a student can be signed in from the same browser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    /// Parse a role name. Unknown values are rejected rather than defaulted,
    /// so a bad value never grants admin routes.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "super_admin" | "superadmin" => Some(Role::Admin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    /// Path prefix of every route owned by this role.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Student => "/student",
        }
    }

    /// Where the role lands after login and when a deep link cannot be resolved.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Student => "/student/newsfeed",
        }
    }

    pub fn login_route(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/login",
            Role::Student => "/student/login",
        }
    }

    /// Backend endpoint that issues tokens for this role.
    pub fn login_endpoint(&self) -> &'static str {
        match self {
            Role::Admin => "/auth/admin/login",
            Role::Student => "/auth/student/login",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user info as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    #[serde(alias = "admin_id", alias = "student_id")]
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// A signed-in session. Owned by the browser tab: created on login, replaced
/// on refresh and destroyed on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Body of a successful login. Backends have used both `token` and
/// `accessToken` for the access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AuthUser,
    #[serde(alias = "token", alias = "access_token")]
    pub access_token: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "expires_in")]
    pub expires_in: Option<i64>,
}

impl LoginResponse {
    pub fn into_session(self) -> Session {
        Session {
            user: self.user,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
        }
    }
}
