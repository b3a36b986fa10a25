//! Soft-deleted records and their restore screens.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::listing::Searchable;

/// Kinds of records that can be archived and restored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveEntity {
    Announcements,
    CalendarEvents,
    Students,
    Admins,
    Categories,
    WelcomeCards,
    CarouselImages,
}

impl ArchiveEntity {
    pub const ALL: [ArchiveEntity; 7] = [
        ArchiveEntity::Announcements,
        ArchiveEntity::CalendarEvents,
        ArchiveEntity::Students,
        ArchiveEntity::Admins,
        ArchiveEntity::Categories,
        ArchiveEntity::WelcomeCards,
        ArchiveEntity::CarouselImages,
    ];

    /// URL segment used by both the backend and the SPA routes.
    pub fn slug(&self) -> &'static str {
        match self {
            ArchiveEntity::Announcements => "announcements",
            ArchiveEntity::CalendarEvents => "calendar-events",
            ArchiveEntity::Students => "students",
            ArchiveEntity::Admins => "admins",
            ArchiveEntity::Categories => "categories",
            ArchiveEntity::WelcomeCards => "welcome-cards",
            ArchiveEntity::CarouselImages => "carousel-images",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArchiveEntity::Announcements => "Announcements",
            ArchiveEntity::CalendarEvents => "Calendar Events",
            ArchiveEntity::Students => "Students",
            ArchiveEntity::Admins => "Admins",
            ArchiveEntity::Categories => "Categories",
            ArchiveEntity::WelcomeCards => "Welcome Cards",
            ArchiveEntity::CarouselImages => "Carousel Images",
        }
    }

    /// Placeholder for the search box.
    pub fn search_hint(&self) -> &'static str {
        match self {
            ArchiveEntity::Announcements => "Search by title, content or author...",
            ArchiveEntity::CalendarEvents => "Search by title, description or location...",
            ArchiveEntity::Students => "Search by name, email or student number...",
            ArchiveEntity::Admins => "Search by name, email or role...",
            ArchiveEntity::Categories => "Search by name or description...",
            ArchiveEntity::WelcomeCards => "Search by title or content...",
            ArchiveEntity::CarouselImages => "Search by title or file...",
        }
    }
}

/// Uniform projection of any archived record, rendered by the shared
/// archive list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRow {
    pub id: i64,
    pub entity: ArchiveEntity,
    pub title: String,
    pub subtitle: String,
    pub deleted_at: String,
    search_terms: Vec<String>,
}

impl Searchable for ArchiveRow {
    fn record_id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        self.search_terms.iter().map(String::as_str).collect()
    }
}

/// An archived record type with its backend entity and display projection.
pub trait ArchiveRecord: Searchable + DeserializeOwned + Clone {
    const ENTITY: ArchiveEntity;

    fn title(&self) -> String;
    fn subtitle(&self) -> String;
    fn deleted_at(&self) -> &str;

    fn to_row(&self) -> ArchiveRow {
        ArchiveRow {
            id: self.record_id(),
            entity: Self::ENTITY,
            title: self.title(),
            subtitle: self.subtitle(),
            deleted_at: self.deleted_at().to_string(),
            search_terms: self.search_fields().into_iter().map(str::to_string).collect(),
        }
    }
}

fn opt(s: &Option<String>) -> &str {
    s.as_deref().unwrap_or("")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedAnnouncement {
    pub announcement_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedAnnouncement {
    fn record_id(&self) -> i64 {
        self.announcement_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str(), self.author_name.as_str()]
    }
}

impl ArchiveRecord for ArchivedAnnouncement {
    const ENTITY: ArchiveEntity = ArchiveEntity::Announcements;

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        format!("by {}", self.author_name)
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedCalendarEvent {
    #[serde(alias = "event_id")]
    pub calendar_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedCalendarEvent {
    fn record_id(&self) -> i64 {
        self.calendar_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), opt(&self.description), opt(&self.location)]
    }
}

impl ArchiveRecord for ArchivedCalendarEvent {
    const ENTITY: ArchiveEntity = ArchiveEntity::CalendarEvents;

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        match &self.location {
            Some(loc) if !loc.is_empty() => format!("{} at {}", self.event_date, loc),
            _ => self.event_date.clone(),
        }
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedStudent {
    pub student_id: i64,
    #[serde(default)]
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedStudent {
    fn record_id(&self) -> i64 {
        self.student_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.student_number.as_str(),
            opt(&self.section),
        ]
    }
}

impl ArchiveRecord for ArchivedStudent {
    const ENTITY: ArchiveEntity = ArchiveEntity::Students;

    fn title(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn subtitle(&self) -> String {
        match (&self.grade_level, &self.section) {
            (Some(g), Some(s)) => format!("{} · Grade {} {}", self.email, g, s),
            (Some(g), None) => format!("{} · Grade {}", self.email, g),
            _ => self.email.clone(),
        }
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedAdmin {
    pub admin_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedAdmin {
    fn record_id(&self) -> i64 {
        self.admin_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
        ]
    }
}

impl ArchiveRecord for ArchivedAdmin {
    const ENTITY: ArchiveEntity = ArchiveEntity::Admins;

    fn title(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn subtitle(&self) -> String {
        format!("{} · {}", self.email, self.role)
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

/// Categories and their subcategories share one archive list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedCategory {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedCategory {
    fn record_id(&self) -> i64 {
        self.category_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), opt(&self.description), opt(&self.parent_name)]
    }
}

impl ArchiveRecord for ArchivedCategory {
    const ENTITY: ArchiveEntity = ArchiveEntity::Categories;

    fn title(&self) -> String {
        match &self.parent_name {
            Some(parent) => format!("{} › {}", parent, self.name),
            None => self.name.clone(),
        }
    }

    fn subtitle(&self) -> String {
        opt(&self.description).to_string()
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedWelcomeCard {
    pub card_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedWelcomeCard {
    fn record_id(&self) -> i64 {
        self.card_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl ArchiveRecord for ArchivedWelcomeCard {
    const ENTITY: ArchiveEntity = ArchiveEntity::WelcomeCards;

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        self.content.chars().take(80).collect()
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchivedCarouselImage {
    pub image_id: i64,
    #[serde(default)]
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub deleted_at: String,
}

impl Searchable for ArchivedCarouselImage {
    fn record_id(&self) -> i64 {
        self.image_id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.image_url.as_str()]
    }
}

impl ArchiveRecord for ArchivedCarouselImage {
    const ENTITY: ArchiveEntity = ArchiveEntity::CarouselImages;

    fn title(&self) -> String {
        if self.title.is_empty() {
            "Untitled image".to_string()
        } else {
            self.title.clone()
        }
    }

    fn subtitle(&self) -> String {
        self.image_url.clone()
    }

    fn deleted_at(&self) -> &str {
        &self.deleted_at
    }
}

/// Archived-row totals per entity, shown as badges on the archive tabs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ArchiveCounts {
    #[serde(default)]
    pub announcements: i64,
    #[serde(default)]
    pub calendar_events: i64,
    #[serde(default)]
    pub students: i64,
    #[serde(default)]
    pub admins: i64,
    #[serde(default)]
    pub categories: i64,
    #[serde(default)]
    pub welcome_cards: i64,
    #[serde(default)]
    pub carousel_images: i64,
}

impl ArchiveCounts {
    pub fn get(&self, entity: ArchiveEntity) -> i64 {
        match entity {
            ArchiveEntity::Announcements => self.announcements,
            ArchiveEntity::CalendarEvents => self.calendar_events,
            ArchiveEntity::Students => self.students,
            ArchiveEntity::Admins => self.admins,
            ArchiveEntity::Categories => self.categories,
            ArchiveEntity::WelcomeCards => self.welcome_cards,
            ArchiveEntity::CarouselImages => self.carousel_images,
        }
    }

    pub fn total(&self) -> i64 {
        ArchiveEntity::ALL.iter().map(|e| self.get(*e)).sum()
    }
}
