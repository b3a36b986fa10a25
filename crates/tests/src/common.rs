use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use client::{BulletinClient, MemoryStore, SessionScope};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{ApiConfig, ClientConfig, Role};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once, OnceLock};

const JWT_SECRET: &[u8] = b"bulletin-board-test-secret";

/// Password the mock rejects on both login endpoints.
pub const WRONG_PASSWORD: &str = "wrong-password";

/// Student email that receives an already-expired token.
pub const EXPIRED_EMAIL: &str = "expired@school.edu";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub exp: i64,
}

/// Sign a token for `role` that expires `ttl_secs` from now (negative for an
/// expired one).
pub fn mint_token(user_id: i64, role: Role, ttl_secs: i64) -> String {
    let claims = Claims {
        sub: user_id,
        role: role.as_str().to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET))
        .expect("Failed to sign test token")
}

/// One request as the mock backend saw it. Header names are lowercase.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
}

/// Mutable backend state shared between handlers and the test body.
#[derive(Debug, Default)]
pub struct MockState {
    pub requests: Vec<RecordedRequest>,
    /// Roles whose otherwise valid tokens are answered with 401.
    pub revoked: HashSet<String>,
    pub fail_mark_read: bool,
    pub fail_calendar: bool,
    pub read: Vec<i64>,
    pub approved: Vec<i64>,
    pub rejected: Vec<(i64, Option<String>)>,
    pub restored: Vec<(String, i64)>,
    pub reactions: Vec<(i64, String)>,
    /// Raw multipart bodies received on `/uploads`.
    pub uploads: Vec<String>,
}

pub type SharedState = Arc<Mutex<MockState>>;

/// In-process backend on an ephemeral port, speaking the bulletin board API
/// under `/api`.
pub struct MockBackend {
    pub base_url: String,
    pub state: SharedState,
}

impl MockBackend {
    pub async fn start() -> Self {
        init_tracing();
        install_unauthorized_recorder();

        let state = SharedState::default();
        let app = Router::new().nest("/api", api_router(state.clone()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend stopped");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// A fresh client with its own empty session store.
    pub fn client(&self) -> BulletinClient {
        client_for(&self.base_url)
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().expect("mock state poisoned");
        f(&mut state)
    }

    /// Most recent request whose path ends with `suffix`.
    pub fn last_request(&self, method: &str, suffix: &str) -> Option<RecordedRequest> {
        self.with_state(|s| {
            s.requests
                .iter()
                .rev()
                .find(|r| r.method == method && r.path.ends_with(suffix))
                .cloned()
        })
    }

    pub fn request_count(&self, method: &str, suffix: &str) -> usize {
        self.with_state(|s| {
            s.requests
                .iter()
                .filter(|r| r.method == method && r.path.ends_with(suffix))
                .count()
        })
    }

    /// Sign `role` in with a working password.
    pub async fn login(&self, client: &BulletinClient, role: Role) -> shared_types::Session {
        let email = match role {
            Role::Admin => "principal@school.edu",
            Role::Student => "juan@school.edu",
        };
        client
            .auth(role)
            .login(&shared_types::LoginRequest {
                email: email.to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .expect("Login against the mock backend failed")
    }
}

pub fn client_for(base_url: &str) -> BulletinClient {
    let config = ClientConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        ..ClientConfig::default()
    };
    BulletinClient::new(&config, Arc::new(MemoryStore::new()))
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Throwaway listener has no address");
    drop(listener);
    format!("http://{addr}/api")
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn unauthorized_log() -> &'static Mutex<Vec<SessionScope>> {
    static LOG: OnceLock<Mutex<Vec<SessionScope>>> = OnceLock::new();
    LOG.get_or_init(|| Mutex::new(Vec::new()))
}

fn install_unauthorized_recorder() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        client::register_unauthorized_handler(|scope| {
            unauthorized_log()
                .lock()
                .expect("unauthorized log poisoned")
                .push(scope);
        });
    });
}

/// Scopes reported through the global 401 hook so far, across all tests in
/// this process.
pub fn unauthorized_scopes() -> Vec<SessionScope> {
    unauthorized_log()
        .lock()
        .expect("unauthorized log poisoned")
        .clone()
}

fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/auth/admin/login", post(admin_login))
        .route("/auth/student/login", post(student_login))
        .route("/auth/logout", post(logout))
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", put(read_all))
        .route("/notifications/{id}/read", put(mark_read))
        .route("/announcements", get(list_announcements).post(create_announcement))
        .route("/announcements/{id}", delete(archive_announcement))
        .route("/announcements/{id}/approve", put(approve_announcement))
        .route("/announcements/{id}/reject", put(reject_announcement))
        .route("/announcements/{id}/comments", get(list_comments).post(add_comment))
        .route("/announcements/{id}/reactions", post(react))
        .route("/calendar", get(list_calendar))
        .route("/calendar/{id}", delete(archive_calendar))
        .route("/archive/counts", get(archive_counts))
        .route("/archive/{entity}", get(list_archive))
        .route("/archive/{entity}/{id}/restore", put(restore_archived))
        .route("/uploads", post(upload))
        .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

/// Record every request, then require a valid bearer token everywhere except
/// the login endpoints.
async fn record_and_authorize(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_lowercase(), v.to_str().ok()?.to_string())))
        .collect();
    let path = req.uri().path().to_string();
    state.lock().expect("mock state poisoned").requests.push(RecordedRequest {
        method: req.method().to_string(),
        path: path.clone(),
        query: req.uri().query().unwrap_or_default().to_string(),
        headers: headers.clone(),
    });

    if path.ends_with("/login") {
        return next.run(req).await;
    }

    let Some(token) = headers
        .get("authorization")
        .and_then(|h| h.strip_prefix("Bearer "))
    else {
        return error(StatusCode::UNAUTHORIZED, "Authentication required");
    };
    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET),
        &Validation::default(),
    ) {
        Ok(data) => data.claims,
        Err(_) => return error(StatusCode::UNAUTHORIZED, "Token expired"),
    };
    if state
        .lock()
        .expect("mock state poisoned")
        .revoked
        .contains(&claims.role)
    {
        return error(StatusCode::UNAUTHORIZED, "Session revoked");
    }
    next.run(req).await
}

fn login_response(role: Role, body: &Value) -> Response {
    if body["password"] == WRONG_PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let email = body["email"].as_str().unwrap_or_default();
    let ttl = if email == EXPIRED_EMAIL { -3600 } else { 3600 };
    let (id_key, id) = match role {
        Role::Admin => ("admin_id", 1),
        Role::Student => ("student_id", 7),
    };
    Json(json!({
        "success": true,
        "data": {
            "user": {
                id_key: id,
                "email": email,
                "first_name": "Maria",
                "last_name": "Santos",
            },
            "accessToken": mint_token(id, role, ttl),
            "expiresIn": ttl,
        }
    }))
    .into_response()
}

async fn admin_login(Json(body): Json<Value>) -> Response {
    login_response(Role::Admin, &body)
}

async fn student_login(Json(body): Json<Value>) -> Response {
    login_response(Role::Student, &body)
}

async fn logout() -> Json<Value> {
    Json(json!({ "success": true, "message": "Logged out" }))
}

async fn list_notifications() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {
                "notification_id": 1,
                "recipient_type": "student",
                "recipient_id": 7,
                "type": "new_announcement",
                "related_announcement_id": 42,
                "context_metadata": "{\"type\":\"announcement\",\"target_id\":42}",
                "is_read": 0,
                "created_at": "2026-03-01T08:00:00Z",
                "title": "New announcement",
            },
            {
                "notification_id": 2,
                "recipient_type": "student",
                "recipient_id": 7,
                "type": "comment_reply",
                "related_announcement_id": 3,
                "related_comment_id": 7,
                "is_read": true,
                "created_at": "2026-03-01T09:00:00Z",
            }
        ],
        "pagination": { "page": 1, "limit": 20, "total": 2 }
    }))
}

async fn unread_count() -> Json<Value> {
    Json(json!({ "success": true, "data": { "unread_count": 4 } }))
}

async fn read_all() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn mark_read(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().expect("mock state poisoned");
    if state.fail_mark_read {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Notification store unavailable");
    }
    state.read.push(id);
    Json(json!({ "success": true })).into_response()
}

fn announcement(id: i64, status: &str) -> Value {
    json!({
        "announcement_id": id,
        "title": format!("Announcement {id}"),
        "content": "Classes resume on Monday.",
        "status": status,
        "author_name": "Maria Santos",
        "created_at": "2026-03-01T08:00:00Z",
    })
}

async fn list_announcements(
    axum::extract::Query(params): axum::extract::Query<HashMap<String, String>>,
) -> Json<Value> {
    let status = params.get("status").map(String::as_str).unwrap_or("approved");
    Json(json!({
        "success": true,
        "data": [announcement(3, status), announcement(4, status)],
        "meta": { "total": 2 }
    }))
}

async fn create_announcement(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = announcement(99, "pending");
    created["title"] = body["title"].clone();
    created["content"] = body["content"].clone();
    (StatusCode::CREATED, Json(json!({ "success": true, "data": created })))
}

async fn archive_announcement() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn approve_announcement(State(state): State<SharedState>, Path(id): Path<i64>) -> Json<Value> {
    state.lock().expect("mock state poisoned").approved.push(id);
    Json(json!({ "success": true }))
}

async fn reject_announcement(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let reason = body["reason"].as_str().map(str::to_string);
    state.lock().expect("mock state poisoned").rejected.push((id, reason));
    Json(json!({ "success": true }))
}

async fn list_comments(Path(id): Path<i64>) -> Json<Value> {
    Json(json!([
        {
            "comment_id": 7,
            "announcement_id": id,
            "author_name": "Juan Dela Cruz",
            "content": "Thanks for the update!",
            "created_at": "2026-03-01T09:00:00Z",
        }
    ]))
}

async fn add_comment(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "comment_id": 8,
            "announcement_id": id,
            "author_name": "Juan Dela Cruz",
            "content": body["content"].clone(),
        }
    }))
}

async fn react(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let kind = body["reaction_type"].as_str().unwrap_or_default().to_string();
    state.lock().expect("mock state poisoned").reactions.push((id, kind));
    Json(json!({ "success": true }))
}

async fn upload(State(state): State<SharedState>, body: Bytes) -> Json<Value> {
    let size = body.len();
    let raw = String::from_utf8_lossy(&body).into_owned();
    state.lock().expect("mock state poisoned").uploads.push(raw);
    Json(json!({ "success": true, "data": { "size": size } }))
}

async fn list_calendar(State(state): State<SharedState>) -> Response {
    if state.lock().expect("mock state poisoned").fail_calendar {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Database offline");
    }
    Json(json!({
        "success": true,
        "data": [
            { "event_id": 5, "title": "Foundation Day", "event_date": "2026-08-20" },
            { "calendar_id": 6, "title": "Sports Fest", "event_date": "2026-09-10", "end_date": "2026-09-12" }
        ]
    }))
    .into_response()
}

/// Unknown ids answer 404 with an empty body.
async fn archive_calendar(Path(id): Path<i64>) -> StatusCode {
    if id == 404 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn archive_counts(State(state): State<SharedState>) -> Json<Value> {
    let restored = state.lock().expect("mock state poisoned").restored.len() as i64;
    Json(json!({
        "success": true,
        "data": { "announcements": 2, "students": 12 - restored, "welcome_cards": 1 }
    }))
}

const STUDENT_NAMES: [(&str, &str); 12] = [
    ("Juan", "Dela Cruz"),
    ("Maria", "Reyes"),
    ("Jose", "Rizal"),
    ("Ana", "Reyes"),
    ("Pedro", "Penduko"),
    ("Liza", "Soberano"),
    ("Carlo", "Reyes"),
    ("Bea", "Alonzo"),
    ("Miguel", "Tan"),
    ("Sofia", "Lim"),
    ("Paolo", "Garcia"),
    ("Isabel", "Cruz"),
];

async fn list_archive(Path(entity): Path<String>) -> Response {
    match entity.as_str() {
        "students" => {
            let rows: Vec<Value> = STUDENT_NAMES
                .iter()
                .enumerate()
                .map(|(i, (first, last))| {
                    json!({
                        "student_id": i as i64 + 1,
                        "student_number": format!("2026-{:04}", i + 1),
                        "first_name": first,
                        "last_name": last,
                        "email": format!("{}.{}@school.edu", first.to_lowercase(), i + 1),
                        "grade_level": "10",
                        "deleted_at": "2026-02-01T00:00:00Z",
                    })
                })
                .collect();
            Json(json!({ "success": true, "data": rows, "pagination": { "total": 12 } }))
                .into_response()
        }
        "welcome-cards" => Json(json!([
            { "card_id": 1, "title": "Welcome back!", "content": "A new school year begins.", "deleted_at": "2026-01-05" }
        ]))
        .into_response(),
        _ => Json(json!({ "success": true, "data": [] })).into_response(),
    }
}

async fn restore_archived(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, i64)>,
) -> Json<Value> {
    state.lock().expect("mock state poisoned").restored.push((entity, id));
    Json(json!({ "success": true, "message": "Restored" }))
}
