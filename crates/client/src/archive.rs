use serde::de::IgnoredAny;
use serde_json::Value;
use shared_types::{
    ApiError, ArchiveCounts, ArchiveEntity, ArchiveRecord, ArchiveRow, ArchivedAdmin,
    ArchivedAnnouncement, ArchivedCalendarEvent, ArchivedCarouselImage, ArchivedCategory,
    ArchivedStudent, ArchivedWelcomeCard,
};

use crate::http::{unwrap_data, unwrap_page, ApiClient, Page};

/// Archived records: bulk fetch, restore and per-entity counts.
///
/// Fetches take one large page (`fetch_limit`) and the UI filters and
/// paginates in memory. The backend total, when reported, only seeds the
/// list's counter.
#[derive(Clone)]
pub struct ArchiveService {
    api: ApiClient,
    fetch_limit: u32,
}

impl ArchiveService {
    pub fn new(api: ApiClient, fetch_limit: u32) -> Self {
        Self {
            api,
            fetch_limit: fetch_limit.max(1),
        }
    }

    #[tracing::instrument(skip(self), fields(entity = R::ENTITY.slug()))]
    pub async fn fetch<R: ArchiveRecord>(&self) -> Result<Page<R>, ApiError> {
        let path = format!("/archive/{}", R::ENTITY.slug());
        let query = [("page", "1".to_string()), ("limit", self.fetch_limit.to_string())];
        let value: Value = self.api.get_query(&path, &query).await?;
        let page: Page<R> = unwrap_page(value)?;
        tracing::debug!(rows = page.items.len(), total = ?page.total, "Archive fetched");
        Ok(page)
    }

    /// Fetch any entity as display rows.
    pub async fn fetch_rows(&self, entity: ArchiveEntity) -> Result<Page<ArchiveRow>, ApiError> {
        match entity {
            ArchiveEntity::Announcements => self.rows::<ArchivedAnnouncement>().await,
            ArchiveEntity::CalendarEvents => self.rows::<ArchivedCalendarEvent>().await,
            ArchiveEntity::Students => self.rows::<ArchivedStudent>().await,
            ArchiveEntity::Admins => self.rows::<ArchivedAdmin>().await,
            ArchiveEntity::Categories => self.rows::<ArchivedCategory>().await,
            ArchiveEntity::WelcomeCards => self.rows::<ArchivedWelcomeCard>().await,
            ArchiveEntity::CarouselImages => self.rows::<ArchivedCarouselImage>().await,
        }
    }

    async fn rows<R: ArchiveRecord>(&self) -> Result<Page<ArchiveRow>, ApiError> {
        let page = self.fetch::<R>().await?;
        Ok(Page {
            items: page.items.iter().map(|r| r.to_row()).collect(),
            total: page.total,
        })
    }

    #[tracing::instrument(skip(self), fields(entity = entity.slug()))]
    pub async fn restore(&self, entity: ArchiveEntity, id: i64) -> Result<(), ApiError> {
        let path = format!("/archive/{}/{id}/restore", entity.slug());
        let _: IgnoredAny = self.api.put(&path, &serde_json::json!({})).await?;
        tracing::info!(id, "Record restored");
        Ok(())
    }

    pub async fn counts(&self) -> Result<ArchiveCounts, ApiError> {
        let value: Value = self.api.get("/archive/counts").await?;
        unwrap_data(value)
    }
}
