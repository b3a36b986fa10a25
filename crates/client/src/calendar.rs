use serde::de::IgnoredAny;
use serde_json::Value;
use shared_types::{ApiError, CalendarEvent, CreateCalendarEventRequest};
use validator::Validate;

use crate::http::{unwrap_data, unwrap_page, ApiClient, Page};

#[derive(Clone)]
pub struct CalendarService {
    api: ApiClient,
}

impl CalendarService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<CalendarEvent>, ApiError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value: Value = self.api.get_query("/calendar", &query).await?;
        unwrap_page(value)
    }

    #[tracing::instrument(skip(self, req), fields(title = %req.title))]
    pub async fn create(&self, req: &CreateCalendarEventRequest) -> Result<CalendarEvent, ApiError> {
        req.validate()?;
        let value: Value = self.api.post("/calendar", req).await?;
        let event: CalendarEvent = unwrap_data(value)?;
        tracing::info!(calendar_id = event.calendar_id, "Calendar event created");
        Ok(event)
    }

    #[tracing::instrument(skip(self))]
    pub async fn archive(&self, calendar_id: i64) -> Result<(), ApiError> {
        let path = format!("/calendar/{calendar_id}");
        let _: IgnoredAny = self.api.delete(&path).await?;
        tracing::info!("Calendar event archived");
        Ok(())
    }
}
