//! Calendar date keys and per-day records.
//!
//! # Responsibility
//! - Validate the `YYYY-MM-DD` date key that addresses every day record.
//! - Define the day container and the seed-data marking variants.
//!
//! # Invariants
//! - `DateKey` only ever holds zero-padded ISO dates, so lexicographic
//!   ordering of keys equals chronological ordering.
//! - A `DayRecord` with no pings and no other attribute must not survive a
//!   `remove`; the store enforces this pruning.

use crate::model::ping::{Ping, PingDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date key regex"));

/// Fallback color for legacy single-ping day markings that carried none.
pub(crate) const LEGACY_PING_COLOR: &str = "#ef4444";

/// Zero-padded ISO `YYYY-MM-DD` calendar date key.
///
/// This is the core's only wire format: range queries rely on lexicographic
/// comparison being chronological, which only holds for zero-padded keys,
/// so arbitrary strings are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(String);

impl DateKey {
    /// Parses and validates a date key.
    ///
    /// # Errors
    /// - [`DateKeyError::InvalidFormat`] when the input is not a plausible
    ///   zero-padded `YYYY-MM-DD` string (month `01..=12`, day `01..=31`).
    pub fn new(raw: impl Into<String>) -> Result<Self, DateKeyError> {
        let raw = raw.into();
        let Some(captures) = DATE_KEY_RE.captures(&raw) else {
            return Err(DateKeyError::InvalidFormat(raw));
        };

        // Captures 1..=3 always parse; the regex pins digit counts well
        // below the u16 range.
        let month: u16 = captures[2].parse().expect("two-digit month");
        let day: u16 = captures[3].parse().expect("two-digit day");
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(DateKeyError::InvalidFormat(raw));
        }

        Ok(Self(raw))
    }

    /// Borrows the underlying `YYYY-MM-DD` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.0
    }
}

/// Date key parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input is not a zero-padded `YYYY-MM-DD` calendar date.
    InvalidFormat(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(raw) => {
                write!(f, "invalid date key `{raw}`: expected zero-padded YYYY-MM-DD")
            }
        }
    }
}

impl Error for DateKeyError {}

/// Per-date container for pings and day-level attributes.
///
/// Pings are unordered at rest; every read path that needs ordering sorts
/// by `timestamp` on the way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day-level highlight flag, independent of pings.
    #[serde(default)]
    pub marked: bool,
    /// Pings attached to this day.
    #[serde(default)]
    pub pings: Vec<Ping>,
}

impl DayRecord {
    /// Returns `true` when the record carries nothing worth keeping.
    ///
    /// Used by the store's pruning invariant: an empty, unmarked record is
    /// removed from the map instead of lingering as a placeholder.
    pub fn is_prunable(&self) -> bool {
        !self.marked && self.pings.is_empty()
    }
}

/// Seed-data marking for one day, as the mobile shell ships it.
///
/// Seed files in the wild mix two generations of shapes: legacy
/// single-ping fields and the newer ping-list form. Both are accepted here
/// and normalized to plain drafts at the store boundary
/// ([`CalendarStore::from_markings`]), so everything past the store only
/// ever sees `Vec<Ping>`.
///
/// [`CalendarStore::from_markings`]: crate::store::CalendarStore::from_markings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMarking {
    /// Nothing attached; ingestion skips the day entirely unless marked.
    Empty,
    /// Legacy single-ping fields from the first data-file generation.
    Legacy {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        hour: u8,
        #[serde(default)]
        marked: bool,
    },
    /// Current multi-ping form.
    Pings {
        #[serde(default)]
        marked: bool,
        pings: Vec<PingDraft>,
    },
}

impl DayMarking {
    /// Normalizes this marking into `(marked, drafts)`.
    ///
    /// Legacy markings become exactly one draft, falling back to the stock
    /// marker color when none was recorded.
    pub(crate) fn normalize(self) -> (bool, Vec<PingDraft>) {
        match self {
            Self::Empty => (false, Vec::new()),
            Self::Legacy { color, hour, marked } => {
                let draft = PingDraft::new(
                    color.unwrap_or_else(|| LEGACY_PING_COLOR.to_string()),
                    hour,
                );
                (marked, vec![draft])
            }
            Self::Pings { marked, pings } => (marked, pings),
        }
    }
}
