use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A school calendar entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    #[serde(alias = "event_id")]
    pub calendar_id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl CalendarEvent {
    pub fn anchor(&self) -> String {
        format!("event-{}", self.calendar_id)
    }

    /// Whether the event covers `day` (inclusive of a multi-day range).
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        let end = self.end_date.unwrap_or(self.event_date);
        self.event_date <= day && day <= end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
#[cfg_attr(feature = "validation", validate(schema(function = "validate_event_range")))]
pub struct CreateCalendarEventRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(feature = "validation")]
fn validate_event_range(req: &CreateCalendarEventRequest) -> Result<(), validator::ValidationError> {
    match req.end_date {
        Some(end) if end < req.event_date => {
            let mut err = validator::ValidationError::new("end_before_start");
            err.message = Some("End date cannot be before the start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}
