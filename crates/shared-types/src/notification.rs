use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A notification addressed to an admin or a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub notification_id: i64,
    #[serde(default)]
    pub recipient_type: String,
    #[serde(default)]
    pub recipient_id: i64,
    #[serde(alias = "type")]
    pub type_name: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub related_announcement_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub related_comment_id: Option<i64>,
    /// Either a JSON object, a JSON-encoded string (sometimes encoded twice),
    /// or absent.
    #[serde(default)]
    pub context_metadata: Option<Value>,
    #[serde(default, deserialize_with = "de_flag")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What a notification points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    Announcement,
    Comment,
    Calendar,
    #[default]
    #[serde(other)]
    General,
}

/// Navigation target of a notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NotificationContext {
    #[serde(rename = "type", default)]
    pub kind: ContextType,
    #[serde(default, alias = "targetId", deserialize_with = "de_opt_id")]
    pub target_id: Option<i64>,
    /// Parent announcement of a comment target.
    #[serde(default, alias = "announcementId", deserialize_with = "de_opt_id")]
    pub announcement_id: Option<i64>,
    #[serde(default, alias = "scrollTo", skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<String>,
}

const COMMENT_TYPES: &[&str] = &["comment_reply", "comment_reaction", "comment_flagged"];
const ANNOUNCEMENT_TYPES: &[&str] = &[
    "new_announcement",
    "alert_announcement",
    "announcement_reaction",
    "pinned_post",
];
const CALENDAR_TYPE: &str = "calendar_event";

impl NotificationContext {
    fn general() -> Self {
        Self::default()
    }

    /// DOM id of the element a page should scroll to for this context.
    pub fn anchor(&self) -> Option<String> {
        if let Some(explicit) = self.scroll_to.as_ref().filter(|s| !s.is_empty()) {
            return Some(explicit.clone());
        }
        let id = self.target_id?;
        match self.kind {
            ContextType::Comment => Some(format!("comment-{id}")),
            ContextType::Announcement => Some(format!("announcement-{id}")),
            ContextType::Calendar => Some(format!("event-{id}")),
            ContextType::General => None,
        }
    }
}

/// Decode `context_metadata` into a context.
///
/// Strings are JSON-decoded, once more if the first pass yields another
/// string. Objects are used as-is. Anything else, or malformed JSON, yields
/// `None` so the caller can fall back to [`infer_context`].
pub fn parse_context_metadata(raw: Option<&Value>) -> Option<NotificationContext> {
    let value = match raw? {
        Value::String(s) => {
            let decoded: Value = serde_json::from_str(s).ok()?;
            match decoded {
                Value::String(inner) => serde_json::from_str(&inner).ok()?,
                other => other,
            }
        }
        obj @ Value::Object(_) => obj.clone(),
        _ => return None,
    };
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Infer a context from the notification type and related ids. Used when the
/// backend did not send structured metadata.
///
/// `related_announcement_id` doubles as the event id for `calendar_event`.
pub fn infer_context(
    type_name: &str,
    related_announcement_id: Option<i64>,
    related_comment_id: Option<i64>,
) -> NotificationContext {
    if COMMENT_TYPES.contains(&type_name) {
        NotificationContext {
            kind: ContextType::Comment,
            target_id: related_comment_id,
            announcement_id: related_announcement_id,
            scroll_to: related_comment_id.map(|id| format!("comment-{id}")),
        }
    } else if ANNOUNCEMENT_TYPES.contains(&type_name) {
        NotificationContext {
            kind: ContextType::Announcement,
            target_id: related_announcement_id,
            announcement_id: related_announcement_id,
            scroll_to: related_announcement_id.map(|id| format!("announcement-{id}")),
        }
    } else if type_name == CALENDAR_TYPE {
        NotificationContext {
            kind: ContextType::Calendar,
            target_id: related_announcement_id,
            announcement_id: None,
            scroll_to: related_announcement_id.map(|id| format!("event-{id}")),
        }
    } else {
        NotificationContext::general()
    }
}

impl Notification {
    /// Structured metadata when present and readable, otherwise inferred.
    /// Gaps in parsed metadata are filled from the related-id columns.
    pub fn context(&self) -> NotificationContext {
        let Some(mut ctx) = parse_context_metadata(self.context_metadata.as_ref()) else {
            return infer_context(
                &self.type_name,
                self.related_announcement_id,
                self.related_comment_id,
            );
        };

        match ctx.kind {
            ContextType::Comment => {
                if ctx.target_id.is_none() {
                    ctx.target_id = self.related_comment_id;
                }
                if ctx.announcement_id.is_none() {
                    ctx.announcement_id = self.related_announcement_id;
                }
            }
            ContextType::Announcement | ContextType::Calendar => {
                if ctx.target_id.is_none() {
                    ctx.target_id = self.related_announcement_id;
                }
            }
            ContextType::General => {}
        }
        if ctx.scroll_to.is_none() {
            ctx.scroll_to = ctx.anchor();
        }
        ctx
    }
}

/// Ids arrive as numbers or numeric strings depending on the endpoint.
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `is_read` comes back as a bool or as a 0/1 integer.
fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    })
}

/// Unread count envelope from `GET /notifications/unread-count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UnreadCount {
    #[serde(alias = "unreadCount", alias = "count")]
    pub unread_count: i64,
}
