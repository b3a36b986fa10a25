//! Notification feed and click-through navigation.

use serde::de::IgnoredAny;
use serde_json::Value;
use shared_types::{navigation_for, ApiError, NavigationTarget, Notification, Role, UnreadCount};

use crate::http::{unwrap_data, unwrap_page, ApiClient, Page};

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Notification>, ApiError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value: Value = self.api.get_query("/notifications", &query).await?;
        unwrap_page(value)
    }

    pub async fn unread_count(&self) -> Result<i64, ApiError> {
        let value: Value = self.api.get("/notifications/unread-count").await?;
        let count: UnreadCount = unwrap_data(value)?;
        Ok(count.unread_count)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_read(&self, notification_id: i64) -> Result<(), ApiError> {
        let path = format!("/notifications/{notification_id}/read");
        let _: IgnoredAny = self.api.put(&path, &serde_json::json!({})).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .api
            .put("/notifications/read-all", &serde_json::json!({}))
            .await?;
        Ok(())
    }
}

/// Marks a notification read. Implemented by [`NotificationService`]; tests
/// substitute failing or recording fakes.
#[allow(async_fn_in_trait)]
pub trait MarkRead {
    async fn mark_read(&self, notification_id: i64) -> Result<(), ApiError>;
}

impl MarkRead for NotificationService {
    async fn mark_read(&self, notification_id: i64) -> Result<(), ApiError> {
        NotificationService::mark_read(self, notification_id).await
    }
}

/// Performs the in-app navigation. The SPA implements this over the router.
pub trait Navigator {
    fn navigate(&self, target: &NavigationTarget);
}

/// Mark the notification read when it is unread, then navigate to where it
/// points. A mark-read failure is logged and does not stop the navigation.
/// Returns the target that was navigated to.
pub async fn open_notification<M, N>(
    role: Role,
    notification: &Notification,
    marker: &M,
    navigator: &N,
) -> NavigationTarget
where
    M: MarkRead,
    N: Navigator,
{
    if !notification.is_read {
        if let Err(e) = marker.mark_read(notification.notification_id).await {
            tracing::warn!(
                notification_id = notification.notification_id,
                error = %e,
                "Failed to mark notification read"
            );
        }
    }

    let target = navigation_for(role, notification);
    if target.is_landing(role) {
        tracing::debug!(
            notification_id = notification.notification_id,
            type_name = %notification.type_name,
            "Notification has no resolvable target, opening landing page"
        );
    }
    navigator.navigate(&target);
    target
}
