//! Ping domain model.
//!
//! # Responsibility
//! - Define the canonical ping record and its creation/update inputs.
//! - Provide advisory validation for UI-entered ping data.
//!
//! # Invariants
//! - `id` is stable and never reused for another ping.
//! - `timestamp` is a store-assigned creation-order key, not wall-clock
//!   time; it is set once and never patched.
//! - `minute = None` means "unspecified", which display and ordering math
//!   treat as `0`. The distinction is preserved in the model itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every ping.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PingId = Uuid;

/// Open-ended key/value bag attached to a ping.
///
/// Values are opaque to the core; collaborators may store whatever JSON
/// shape they need without schema changes here.
pub type PingMetadata = BTreeMap<String, serde_json::Value>;

/// Minutes in a full calendar day, the denominator for proportional layout.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A user-created, colored, time-of-day-stamped annotation on one calendar
/// day.
///
/// Pings are created only through [`CalendarStore::add`], which assigns
/// `id` and `timestamp`; all other fields come from a [`PingDraft`].
///
/// [`CalendarStore::add`]: crate::store::CalendarStore::add
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    /// Stable global ID used for view keys, removal and updates.
    pub id: PingId,
    /// Color token (hex-like `#rrggbb` by convention). Opaque to the core,
    /// only non-emptiness is ever checked, and only advisorily.
    pub color: String,
    /// Hour of day, expected range `0..=23`.
    pub hour: u8,
    /// Minute of hour, expected range `0..=59` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    /// Creation-order key assigned by the store. Strictly increasing across
    /// the whole store, so equal wall-clock inputs stay orderable.
    pub timestamp: u64,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Optional extensibility bag, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PingMetadata>,
}

impl Ping {
    /// Minutes elapsed since midnight, with an unspecified minute read as 0.
    ///
    /// This is the sole time value the layout projector consumes.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute.unwrap_or(0))
    }
}

/// Creation input for a ping: everything the user supplies, nothing the
/// store assigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingDraft {
    pub color: String,
    pub hour: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PingMetadata>,
}

impl PingDraft {
    /// Creates a draft with just the required fields.
    pub fn new(color: impl Into<String>, hour: u8) -> Self {
        Self {
            color: color.into(),
            hour,
            minute: None,
            annotation: None,
            metadata: None,
        }
    }

    /// Sets the minute component.
    pub fn at_minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    /// Sets the free-text annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Checks draft fields against the advisory domain ranges.
    ///
    /// # Contract
    /// - `color` must be non-empty.
    /// - `hour` must be in `0..=23`.
    /// - `minute`, when present, must be in `0..=59`.
    ///
    /// The store never calls this; callers decide whether an invalid draft
    /// may still be committed (it may, by design).
    pub fn validate(&self) -> Result<(), PingValidationError> {
        if self.color.is_empty() {
            return Err(PingValidationError::EmptyColor);
        }
        if self.hour > 23 {
            return Err(PingValidationError::HourOutOfRange(self.hour));
        }
        if let Some(minute) = self.minute {
            if minute > 59 {
                return Err(PingValidationError::MinuteOutOfRange(minute));
            }
        }
        Ok(())
    }
}

/// Advisory validation failure for a [`PingDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingValidationError {
    /// Color token is empty.
    EmptyColor,
    /// Hour outside `0..=23`.
    HourOutOfRange(u8),
    /// Minute outside `0..=59`.
    MinuteOutOfRange(u8),
}

impl Display for PingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyColor => write!(f, "ping color must be a non-empty token"),
            Self::HourOutOfRange(hour) => {
                write!(f, "ping hour {hour} outside supported range 0..=23")
            }
            Self::MinuteOutOfRange(minute) => {
                write!(f, "ping minute {minute} outside supported range 0..=59")
            }
        }
    }
}

impl Error for PingValidationError {}

/// Partial update for an existing ping.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears an optional
/// field. `id` and `timestamp` are deliberately absent, so patching cannot
/// violate their immutability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PingPatch {
    pub color: Option<String>,
    pub hour: Option<u8>,
    pub minute: Option<Option<u8>>,
    pub annotation: Option<Option<String>>,
    pub metadata: Option<Option<PingMetadata>>,
}

impl PingPatch {
    /// Returns `true` when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.annotation.is_none()
            && self.metadata.is_none()
    }

    /// Applies this patch to a ping in place.
    ///
    /// `id` and `timestamp` are untouchable by construction.
    pub(crate) fn apply_to(&self, ping: &mut Ping) {
        if let Some(color) = &self.color {
            ping.color = color.clone();
        }
        if let Some(hour) = self.hour {
            ping.hour = hour;
        }
        if let Some(minute) = self.minute {
            ping.minute = minute;
        }
        if let Some(annotation) = &self.annotation {
            ping.annotation = annotation.clone();
        }
        if let Some(metadata) = &self.metadata {
            ping.metadata = metadata.clone();
        }
    }
}
