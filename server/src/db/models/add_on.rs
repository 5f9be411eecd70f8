//! Add-on (drinks menu) Model

use super::serde_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddOnCategory {
    Wine,
    Beer,
    SoftDrink,
    Spirit,
    Other,
}

/// Purchasable drink add-on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOn {
    #[serde(default, with = "serde_id::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_pence: i64,
    pub category: AddOnCategory,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnCreate {
    pub name: String,
    pub description: Option<String>,
    pub price_pence: i64,
    pub category: AddOnCategory,
    pub active: Option<bool>,
}

/// Update add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_pence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AddOnCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
