//! Broadcast Model
//!
//! Record of an admin announcement. Actual delivery (email/push fan-out)
//! happens in an external collaborator; this core only keeps the record.

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastAudience {
    All,
    Booked,
    PastAttendees,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastChannel {
    Email,
    Push,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub message: String,
    pub audience: BroadcastAudience,
    pub channel: BroadcastChannel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_count: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Create broadcast payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastCreate {
    pub title: String,
    pub message: String,
    pub audience: BroadcastAudience,
    pub channel: BroadcastChannel,
}
