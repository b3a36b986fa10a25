//! HTTP client and session handling for the bulletin board SPA.

pub mod announcements;
pub mod archive;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod http;
pub mod notifications;
pub mod session;
pub mod storage;

use shared_types::{ClientConfig, Role};

pub use announcements::AnnouncementService;
pub use archive::ArchiveService;
pub use auth::AuthService;
pub use calendar::CalendarService;
pub use http::{register_unauthorized_handler, ApiClient, MultipartField, Page};
pub use notifications::{open_notification, MarkRead, Navigator, NotificationService};
pub use session::{SessionScope, SessionStore, TokenManager};
pub use storage::{KeyValueStore, MemoryStore, SharedStore};

/// One API client per role over a shared store, plus service constructors.
#[derive(Clone)]
pub struct BulletinClient {
    sessions: SessionStore,
    admin: ApiClient,
    student: ApiClient,
    fetch_limit: u32,
}

impl BulletinClient {
    pub fn new(config: &ClientConfig, store: SharedStore) -> Self {
        let sessions = SessionStore::new(store);
        let base_url = config.base_url();
        Self {
            admin: ApiClient::new(base_url, sessions.manager(Role::Admin)),
            student: ApiClient::new(base_url, sessions.manager(Role::Student)),
            sessions,
            fetch_limit: config.archive.fetch_limit,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn api(&self, role: Role) -> &ApiClient {
        match role {
            Role::Admin => &self.admin,
            Role::Student => &self.student,
        }
    }

    pub fn auth(&self, role: Role) -> AuthService {
        AuthService::new(role, self.api(role).clone(), self.sessions.clone())
    }

    pub fn notifications(&self, role: Role) -> NotificationService {
        NotificationService::new(self.api(role).clone())
    }

    pub fn announcements(&self, role: Role) -> AnnouncementService {
        AnnouncementService::new(self.api(role).clone())
    }

    pub fn calendar(&self, role: Role) -> CalendarService {
        CalendarService::new(self.api(role).clone())
    }

    /// Archive management is admin-only.
    pub fn archive(&self) -> ArchiveService {
        ArchiveService::new(self.admin.clone(), self.fetch_limit)
    }
}
