//! Availability slots published by doctors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A slot as returned by the API. Timestamps arrive as RFC 3339 and are
/// normalized to UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    /// Not every endpoint echoes the owner back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Body of slot create and update calls.
///
/// `start` and `end` are canonical UTC timestamps
/// (`2023-01-01T10:00:00.000Z`), produced by the slot form validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
