use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Moderation state of an announcement. Student posts start `Pending` until
/// an admin approves them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Published,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Pending => "pending",
            AnnouncementStatus::Approved => "approved",
            AnnouncementStatus::Rejected => "rejected",
            AnnouncementStatus::Published => "published",
        }
    }

    /// Visible on the student newsfeed.
    pub fn is_visible(&self) -> bool {
        matches!(self, AnnouncementStatus::Approved | AnnouncementStatus::Published)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub announcement_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub status: AnnouncementStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_alert: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub reaction_count: i64,
    #[serde(default)]
    pub comment_count: i64,
}

impl Announcement {
    /// DOM id used for deep-link scrolling.
    pub fn anchor(&self) -> String {
        format!("announcement-{}", self.announcement_id)
    }
}

/// Request DTO for creating an announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateAnnouncementRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))
    )]
    pub title: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Content is required"))
    )]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_alert: bool,
    #[serde(default)]
    pub is_pinned: bool,
}

/// Reason attached when an admin rejects a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReviewAnnouncementRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub comment_id: i64,
    pub announcement_id: i64,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<i64>,
}

impl Comment {
    pub fn anchor(&self) -> String {
        format!("comment-{}", self.comment_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCommentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))
    )]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<i64>,
}

/// Reaction kinds offered on newsfeed posts.
pub const REACTION_TYPES: &[&str] = &["like", "heart", "celebrate"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionRequest {
    pub reaction_type: String,
}
