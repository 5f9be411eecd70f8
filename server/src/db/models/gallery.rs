//! Gallery Model
//!
//! Media records only; upload to object storage is handled elsewhere.

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GalleryMediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub url: String,
    pub media_type: GalleryMediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Which event the media came from, if any ("YYYY-MM-DD")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create gallery item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItemCreate {
    pub url: String,
    pub media_type: GalleryMediaType,
    pub caption: Option<String>,
    pub event_date: Option<String>,
}
