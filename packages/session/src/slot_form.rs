//! # Slot time validation
//!
//! Doctors type slot bounds as local wall-clock text (`2023-01-01T10:00`).
//! [`SlotDraft::validate`] checks them and converts both to canonical UTC
//! timestamps ready for the slots API. Nothing is validated until it is
//! called, so a half-typed draft has no side effects.

use api::{Slot, SlotRequest};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// Accepted input layouts. Seconds and fractions are optional.
const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Layout used to pre-fill an edit form.
const EDIT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Inline messages shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotFormError {
    #[error("fill in start and end")]
    MissingBounds,
    #[error("start must be before end")]
    StartNotBeforeEnd,
    /// Unparseable text, or a wall-clock time skipped by a DST change.
    #[error("invalid date")]
    InvalidDate,
}

/// Unvalidated slot form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotDraft {
    pub start: String,
    pub end: String,
    pub metadata: Option<serde_json::Value>,
}

impl SlotDraft {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Draft for editing an existing slot, bounds shown in `tz`.
    pub fn from_slot_in<Tz: TimeZone>(slot: &Slot, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let local = |at: &DateTime<Utc>| at.with_timezone(tz).format(EDIT_FORMAT).to_string();
        Self {
            start: local(&slot.start),
            end: local(&slot.end),
            metadata: slot.metadata.clone(),
        }
    }

    /// Draft for editing an existing slot in the system time zone.
    pub fn from_slot(slot: &Slot) -> Self {
        Self::from_slot_in(slot, &Local)
    }

    /// Validates against the system time zone.
    pub fn validate(&self) -> Result<SlotRequest, SlotFormError> {
        self.validate_in(&Local)
    }

    /// Validates, reading the bounds as wall-clock times in `tz`.
    pub fn validate_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<SlotRequest, SlotFormError> {
        let (start, end) = (self.start.trim(), self.end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(SlotFormError::MissingBounds);
        }

        let start = to_utc(start, tz)?;
        let end = to_utc(end, tz)?;
        if start >= end {
            return Err(SlotFormError::StartNotBeforeEnd);
        }

        Ok(SlotRequest {
            start: canonical(&start),
            end: canonical(&end),
            metadata: self.metadata.clone(),
        })
    }
}

fn to_utc<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, SlotFormError> {
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or(SlotFormError::InvalidDate)?;

    // On a DST fold the earlier instant wins
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or(SlotFormError::InvalidDate)
}

/// `2023-01-01T10:00:00.000Z`
fn canonical(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
