//! Thin wrapper over `reqwest` shared by every service.

use std::collections::HashMap;
use std::sync::OnceLock;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::ApiError;

use crate::session::{SessionScope, TokenManager};

type UnauthorizedHandler = Box<dyn Fn(SessionScope) + Send + Sync>;

static UNAUTHORIZED_HANDLER: OnceLock<UnauthorizedHandler> = OnceLock::new();

/// Install the process-wide 401 callback. Only the first registration takes
/// effect; returns `false` when a handler was already installed.
pub fn register_unauthorized_handler<F>(handler: F) -> bool
where
    F: Fn(SessionScope) + Send + Sync + 'static,
{
    UNAUTHORIZED_HANDLER.set(Box::new(handler)).is_ok()
}

fn notify_unauthorized(scope: SessionScope) {
    if let Some(handler) = UNAUTHORIZED_HANDLER.get() {
        handler(scope);
    }
}

/// One part of a multipart form.
#[derive(Debug, Clone)]
pub enum MultipartField {
    Text { name: String, value: String },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl MultipartField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        MultipartField::Text {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<MultipartField>),
}

impl RequestBody {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| {
                ApiError::validation(format!("Failed to encode request body: {e}"), HashMap::new())
            })
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Defaults, then caller headers, then auth headers; later entries replace
/// earlier ones case-insensitively. Multipart requests drop `Content-Type`
/// so the transport can set the boundary.
pub fn merge_headers(
    caller: &HashMap<String, String>,
    auth: HashMap<String, String>,
    multipart: bool,
) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = HashMap::new();
    let defaults = [
        ("Accept", "application/json"),
        ("Content-Type", "application/json"),
    ];
    let layers = defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .chain(caller.iter().map(|(k, v)| (k.clone(), v.clone())))
        .chain(auth);

    for (name, value) in layers {
        merged.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        merged.insert(name, value);
    }
    if multipart {
        merged.retain(|name, _| !name.eq_ignore_ascii_case("content-type"));
    }
    merged
}

/// Take the `data` field of a `{success, data}` envelope, or the whole value
/// when the backend answered without one.
pub fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let inner = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner)
        .map_err(|e| ApiError::decode(format!("Unexpected response shape: {e}")))
}

/// A list response plus the backend's total, when it reported one.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<usize>,
}

/// Accepts a bare array, `{data: [...]}` or `{data: [...], pagination|meta:
/// {total}}`.
pub fn unwrap_page<T: DeserializeOwned>(value: Value) -> Result<Page<T>, ApiError> {
    let total = ["pagination", "meta"]
        .iter()
        .find_map(|key| value.get(key).and_then(|m| m.get("total")))
        .or_else(|| value.get("total"))
        .and_then(Value::as_u64)
        .map(|t| t as usize);
    let items: Vec<T> = unwrap_data(value)?;
    Ok(Page { items, total })
}

/// HTTP client bound to one session scope.
///
/// Each role gets its own instance so a 401 on the admin client never signs
/// the student out.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenManager,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenManager) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: build_http_client(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, &[], RequestBody::Empty, &HashMap::new())
            .await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, RequestBody::Empty, &HashMap::new())
            .await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], RequestBody::json(body)?, &HashMap::new())
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, &[], RequestBody::json(body)?, &HashMap::new())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, &[], RequestBody::Empty, &HashMap::new())
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<MultipartField>,
    ) -> Result<T, ApiError> {
        self.request(
            Method::POST,
            path,
            &[],
            RequestBody::Multipart(fields),
            &HashMap::new(),
        )
        .await
    }

    /// Send a request and decode the body. An empty 2xx body decodes as JSON
    /// `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
        headers: &HashMap<String, String>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, query, body, headers).await?;
        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ApiError::decode(format!("Response was not valid JSON: {e}")))?
        };
        serde_json::from_value(value)
            .map_err(|e| ApiError::decode(format!("Unexpected response shape: {e}")))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
        headers: &HashMap<String, String>,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        let merged = merge_headers(headers, self.tokens.get_auth_headers(), body.is_multipart());
        tracing::debug!(%method, %url, scope = ?self.tokens.scope(), "API request");

        let mut builder = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        for (name, value) in &merged {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.body(json.to_string()),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "API request failed to reach backend");
            ApiError::network(&self.base_url, e)
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(&self.base_url, e))?;

        if status.is_success() {
            return Ok(text);
        }

        let error = ApiError::from_response(status.as_u16(), &text);
        if error.is_unauthorized() {
            let scope = self.tokens.scope();
            tracing::warn!(?scope, %url, "Unauthorized response, clearing token");
            self.tokens.remove_token();
            notify_unauthorized(scope);
        } else {
            tracing::debug!(%method, %url, status = status.as_u16(), message = %error.message, "API error");
        }
        Err(error)
    }
}

fn build_form(fields: Vec<MultipartField>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| ApiError::validation(format!("Invalid file type: {e}"), HashMap::new()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}
