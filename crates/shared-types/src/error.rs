use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Categorization of API client errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend could not be reached at all (status 0).
    Network,
    /// Client-side or server-side field validation failed.
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    /// 5xx from the backend.
    Server,
    /// Any other non-2xx status.
    Http,
    /// A 2xx response whose body did not match the expected shape.
    Decode,
}

impl ApiErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            0 => ApiErrorKind::Network,
            400 | 422 => ApiErrorKind::Validation,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Http,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "Network"),
            ApiErrorKind::Validation => write!(f, "Validation"),
            ApiErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ApiErrorKind::Forbidden => write!(f, "Forbidden"),
            ApiErrorKind::NotFound => write!(f, "NotFound"),
            ApiErrorKind::Conflict => write!(f, "Conflict"),
            ApiErrorKind::RateLimited => write!(f, "RateLimited"),
            ApiErrorKind::Server => write!(f, "Server"),
            ApiErrorKind::Http => write!(f, "Http"),
            ApiErrorKind::Decode => write!(f, "Decode"),
        }
    }
}

/// Status reported by validation that fails before any request is sent.
pub const LOCAL_VALIDATION_STATUS: u16 = 422;

/// Status reported when a successful response carries an unusable body.
pub const DECODE_STATUS: u16 = 200;

/// Normalized error returned by every client call.
///
/// `status` is the HTTP status, and `0` only when the backend could not be
/// reached. Errors raised before a request is sent report
/// [`LOCAL_VALIDATION_STATUS`]; a 2xx body that cannot be decoded reports
/// [`DECODE_STATUS`]. Branch on `kind` rather than `status`. `data` holds the
/// parsed JSON body, the raw text when the body is not JSON, or `null` when
/// there was no body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub message: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl ApiError {
    /// Transport failure: the configured backend is unreachable.
    pub fn network(base_url: &str, detail: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: 0,
            message: format!(
                "Cannot connect to server at {base_url}. Please check that the API is running. ({detail})"
            ),
            data: Value::Null,
            field_errors: HashMap::new(),
        }
    }

    /// Build an error from a non-2xx response body.
    ///
    /// The message comes from the body's `message` or `error` field when
    /// present, otherwise `HTTP <status>`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        let message = message_from_body(&data).unwrap_or_else(|| format!("HTTP {status}"));
        let field_errors = field_errors_from_body(&data);

        Self {
            kind: ApiErrorKind::from_status(status),
            status,
            message,
            data,
            field_errors,
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            status: LOCAL_VALIDATION_STATUS,
            message: message.into(),
            data: Value::Null,
            field_errors,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: DECODE_STATUS,
            message: message.into(),
            data: Value::Null,
            field_errors: HashMap::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_network(&self) -> bool {
        self.kind == ApiErrorKind::Network
    }

    /// True when the backend sent no message of its own.
    fn has_generic_message(&self) -> bool {
        self.message.starts_with("HTTP ")
    }

    /// Message suitable for an inline error banner. The server's own message
    /// is kept; bare 401 and 5xx statuses get a readable fallback.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Unauthorized if self.has_generic_message() => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiErrorKind::Server if self.has_generic_message() => {
                "Something went wrong. Please try again.".to_string()
            }
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        ApiError::validation("Validation failed", field_errors)
    }
}

fn message_from_body(data: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| data.get(key).and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Backends report field errors either as `{"errors": {"field": "msg"}}` or
/// `{"errors": [{"field": "...", "message": "..."}]}`.
fn field_errors_from_body(data: &Value) -> HashMap<String, String> {
    let mut out = HashMap::new();
    match data.get("errors") {
        Some(Value::Object(map)) => {
            for (field, msg) in map {
                if let Some(m) = msg.as_str() {
                    out.insert(field.clone(), m.to_string());
                }
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                let field = item.get("field").and_then(Value::as_str);
                let msg = item.get("message").and_then(Value::as_str);
                if let (Some(f), Some(m)) = (field, msg) {
                    out.insert(f.to_string(), m.to_string());
                }
            }
        }
        _ => {}
    }
    out
}
