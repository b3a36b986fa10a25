use serde::de::IgnoredAny;
use serde_json::Value;
use shared_types::{
    Announcement, AnnouncementStatus, ApiError, Comment, CreateAnnouncementRequest,
    CreateCommentRequest, ReactionRequest, ReviewAnnouncementRequest, REACTION_TYPES,
};
use validator::Validate;

use crate::http::{unwrap_data, unwrap_page, ApiClient, Page};

/// Newsfeed posts, moderation, comments and reactions.
#[derive(Clone)]
pub struct AnnouncementService {
    api: ApiClient,
}

impl AnnouncementService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        status: Option<AnnouncementStatus>,
        page: u32,
        limit: u32,
    ) -> Result<Page<Announcement>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        let value: Value = self.api.get_query("/announcements", &query).await?;
        unwrap_page(value)
    }

    #[tracing::instrument(skip(self, req), fields(title = %req.title))]
    pub async fn create(&self, req: &CreateAnnouncementRequest) -> Result<Announcement, ApiError> {
        req.validate()?;
        let value: Value = self.api.post("/announcements", req).await?;
        let created: Announcement = unwrap_data(value)?;
        tracing::info!(announcement_id = created.announcement_id, "Announcement created");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn approve(&self, announcement_id: i64) -> Result<(), ApiError> {
        let path = format!("/announcements/{announcement_id}/approve");
        let _: IgnoredAny = self.api.put(&path, &serde_json::json!({})).await?;
        tracing::info!("Announcement approved");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn reject(&self, announcement_id: i64, reason: Option<String>) -> Result<(), ApiError> {
        let path = format!("/announcements/{announcement_id}/reject");
        let body = ReviewAnnouncementRequest { reason };
        let _: IgnoredAny = self.api.put(&path, &body).await?;
        tracing::info!("Announcement rejected");
        Ok(())
    }

    /// Soft delete; the post moves to the archive.
    #[tracing::instrument(skip(self))]
    pub async fn archive(&self, announcement_id: i64) -> Result<(), ApiError> {
        let path = format!("/announcements/{announcement_id}");
        let _: IgnoredAny = self.api.delete(&path).await?;
        tracing::info!("Announcement archived");
        Ok(())
    }

    pub async fn comments(&self, announcement_id: i64) -> Result<Vec<Comment>, ApiError> {
        let path = format!("/announcements/{announcement_id}/comments");
        let value: Value = self.api.get(&path).await?;
        Ok(unwrap_page(value)?.items)
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn add_comment(
        &self,
        announcement_id: i64,
        req: &CreateCommentRequest,
    ) -> Result<Comment, ApiError> {
        req.validate()?;
        let path = format!("/announcements/{announcement_id}/comments");
        let value: Value = self.api.post(&path, req).await?;
        unwrap_data(value)
    }

    #[tracing::instrument(skip(self))]
    pub async fn react(&self, announcement_id: i64, reaction_type: &str) -> Result<(), ApiError> {
        if !REACTION_TYPES.contains(&reaction_type) {
            return Err(ApiError::validation(
                format!("Unknown reaction '{reaction_type}'"),
                Default::default(),
            ));
        }
        let path = format!("/announcements/{announcement_id}/reactions");
        let body = ReactionRequest {
            reaction_type: reaction_type.to_string(),
        };
        let _: IgnoredAny = self.api.post(&path, &body).await?;
        Ok(())
    }
}
