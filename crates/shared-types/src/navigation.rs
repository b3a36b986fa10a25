//! Deep-link routing for notifications.
//!
//! Everything here is pure: the side-effecting half (mark read, navigate,
//! scroll) lives in the client and app crates.

use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::notification::{ContextType, Notification, NotificationContext};

/// CSS class applied to the focused element while it is highlighted.
pub const HIGHLIGHT_CLASS: &str = "notification-highlight";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Auto,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Auto => "auto",
        }
    }
}

/// State carried alongside a navigation so the destination page can scroll
/// to and highlight the target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub from_notification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,
    pub highlight_target: bool,
    pub scroll_to: String,
    #[serde(default)]
    pub scroll_behavior: ScrollBehavior,
}

/// Where to go, and with what state.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationTarget {
    pub path: String,
    pub state: Option<NavigationState>,
}

impl NavigationTarget {
    pub fn landing(role: Role) -> Self {
        Self {
            path: role.landing_route().to_string(),
            state: None,
        }
    }

    pub fn is_landing(&self, role: Role) -> bool {
        self.path == role.landing_route()
    }
}

/// Build the in-app path for a context, or `None` when it cannot be resolved
/// (general notifications, missing ids).
pub fn build_route(role: Role, ctx: &NotificationContext) -> Option<String> {
    let prefix = role.route_prefix();
    match ctx.kind {
        ContextType::Comment => {
            let comment = ctx.target_id?;
            let announcement = ctx.announcement_id?;
            Some(format!(
                "{prefix}/newsfeed?focus=announcement&id={announcement}&comment={comment}"
            ))
        }
        ContextType::Announcement => {
            let id = ctx.target_id?;
            Some(format!("{prefix}/newsfeed?focus=announcement&id={id}"))
        }
        ContextType::Calendar => {
            let id = ctx.target_id?;
            Some(format!("{prefix}/calendar?focus=event&id={id}"))
        }
        ContextType::General => None,
    }
}

/// Resolve a notification into a navigation. Unresolvable notifications go to
/// the role's landing route with no state.
pub fn navigation_for(role: Role, notification: &Notification) -> NavigationTarget {
    let ctx = notification.context();
    let Some(path) = build_route(role, &ctx) else {
        return NavigationTarget::landing(role);
    };
    let state = ctx.anchor().map(|scroll_to| NavigationState {
        from_notification: true,
        notification_id: Some(notification.notification_id),
        highlight_target: true,
        scroll_to,
        scroll_behavior: ScrollBehavior::Smooth,
    });
    NavigationTarget { path, state }
}

/// `focus` query parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    Announcement,
    Event,
    Comment,
}

impl FocusKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "announcement" => Some(FocusKind::Announcement),
            "event" => Some(FocusKind::Event),
            "comment" => Some(FocusKind::Comment),
            _ => None,
        }
    }
}

/// Deep-link query parameters consumed by the newsfeed and calendar pages:
/// `notification`, `focus`, `id`, `comment`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusQuery {
    pub notification: Option<i64>,
    pub focus: Option<FocusKind>,
    pub id: Option<i64>,
    pub comment: Option<i64>,
}

impl FocusQuery {
    pub fn from_params(
        notification: Option<&str>,
        focus: Option<&str>,
        id: Option<&str>,
        comment: Option<&str>,
    ) -> Self {
        let num = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self {
            notification: num(notification),
            focus: focus.and_then(FocusKind::parse),
            id: num(id),
            comment: num(comment),
        }
    }

    /// Parse a raw query string such as `focus=event&id=3` (leading `?`
    /// allowed). Unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let mut notification = None;
        let mut focus = None;
        let mut id = None;
        let mut comment = None;
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            match key {
                "notification" => notification = Some(value),
                "focus" => focus = Some(value),
                "id" => id = Some(value),
                "comment" => comment = Some(value),
                _ => {}
            }
        }
        Self::from_params(
            notification.as_deref(),
            focus.as_deref(),
            id.as_deref(),
            comment.as_deref(),
        )
    }

    /// DOM id to scroll to. A comment id wins over its parent announcement.
    pub fn scroll_target(&self) -> Option<String> {
        if let Some(c) = self.comment {
            return Some(format!("comment-{c}"));
        }
        let id = self.id?;
        Some(match self.focus? {
            FocusKind::Announcement => format!("announcement-{id}"),
            FocusKind::Event => format!("event-{id}"),
            FocusKind::Comment => format!("comment-{id}"),
        })
    }

    /// Reconstruct navigation state for a direct deep link. Direct loads jump
    /// instead of animating.
    pub fn to_state(&self) -> Option<NavigationState> {
        Some(NavigationState {
            from_notification: self.notification.is_some(),
            notification_id: self.notification,
            highlight_target: true,
            scroll_to: self.scroll_target()?,
            scroll_behavior: ScrollBehavior::Auto,
        })
    }
}
