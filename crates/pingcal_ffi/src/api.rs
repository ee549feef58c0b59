//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the one process-wide session slot and translate its errors into
//!   response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every fallible call returns an envelope with `ok` plus a
//!   human-readable `message`; payload fields are empty on failure.
//! - Calling any store/query/layout function before `session_init` fails
//!   with the session-not-initialized message (wiring misuse, surfaced
//!   immediately rather than absorbed).

use log::warn;
use pingcal_core::{
    core_version as core_version_inner, count_in_range, filter_by_color, group_by_hour,
    init_logging as init_logging_inner, is_valid_ping, project_month, project_week,
    CalendarSession, DateKey, DayMarking, MonthLayout, Ping, PingDraft, PingId, PingPatch,
    SessionError, WeekLayout,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

static SESSION: Mutex<Option<CalendarSession>> = Mutex::new(None);

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Starts a fresh calendar session with an empty store.
///
/// Replaces any previous session; the UI shell calls this once when a
/// calendar screen session begins.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn session_init() -> String {
    *session_slot() = Some(CalendarSession::new());
    String::new()
}

/// Starts a fresh calendar session seeded from day markings JSON.
///
/// The seed is a JSON object mapping `YYYY-MM-DD` keys to day markings in
/// either the legacy single-ping or the ping-list shape; both normalize at
/// the store boundary.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Returns empty string on success, parse error message on failure (the
///   previous session, if any, stays active on failure).
#[flutter_rust_bridge::frb(sync)]
pub fn session_init_with_seed(markings_json: String) -> String {
    let markings: BTreeMap<DateKey, DayMarking> = match serde_json::from_str(&markings_json) {
        Ok(markings) => markings,
        Err(err) => {
            warn!("event=session_seed module=ffi status=error reason=parse");
            return format!("session seed rejected: {err}");
        }
    };

    *session_slot() = Some(CalendarSession::with_markings(markings));
    String::new()
}

/// Discards the active session, if any.
///
/// # FFI contract
/// - Sync call, never panics, idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn session_close() {
    *session_slot() = None;
}

/// Returns whether a calendar session is currently active.
#[flutter_rust_bridge::frb(sync)]
pub fn session_is_active() -> bool {
    session_slot().is_some()
}

/// Ping view returned to the UI: id and timestamp in string/number form,
/// metadata flattened to a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct PingView {
    pub id: String,
    pub color: String,
    pub hour: u8,
    pub minute: Option<u8>,
    pub timestamp: u64,
    pub annotation: Option<String>,
    pub metadata_json: Option<String>,
}

/// Generic action response envelope for ping mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct PingActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Created/affected ping ID when meaningful.
    pub ping_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PingActionResponse {
    fn success(message: impl Into<String>, ping_id: Option<String>) -> Self {
        Self {
            ok: true,
            ping_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            ping_id: None,
            message: message.into(),
        }
    }
}

/// List response envelope for per-day ping reads.
#[derive(Debug, Clone, PartialEq)]
pub struct PingListResponse {
    pub ok: bool,
    pub items: Vec<PingView>,
    pub message: String,
}

/// Count response envelope for range queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CountResponse {
    pub ok: bool,
    pub count: u64,
    pub message: String,
}

/// One hour bucket of the by-hour grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct HourGroup {
    pub hour: u8,
    pub items: Vec<PingView>,
}

/// Grouping response envelope; only hours that have pings appear.
#[derive(Debug, Clone, PartialEq)]
pub struct HourGroupResponse {
    pub ok: bool,
    pub groups: Vec<HourGroup>,
    pub message: String,
}

/// One day of a color-filtered subset.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPings {
    pub date: String,
    pub marked: bool,
    pub items: Vec<PingView>,
}

/// Color filter response envelope; days without matches are excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFilterResponse {
    pub ok: bool,
    pub days: Vec<DayPings>,
    pub message: String,
}

/// One month-cell dot position.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDotView {
    pub id: String,
    pub top: f32,
    pub right: f32,
    pub color: String,
}

/// Month layout response envelope for one day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayoutResponse {
    pub ok: bool,
    pub dots: Vec<MonthDotView>,
    pub message: String,
}

/// One week-bar marker position.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekMarkerView {
    pub id: String,
    pub top: f32,
    pub color: String,
}

/// Week layout response envelope for one day bar.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayoutResponse {
    pub ok: bool,
    pub markers: Vec<WeekMarkerView>,
    pub ping_count: u64,
    pub message: String,
}

/// Adds a ping to a day.
///
/// The draft is checked with the advisory validator first: the UI disables
/// its save action on invalid input, and this boundary enforces the same
/// gate.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Returns the created ping ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn ping_add(
    date: String,
    color: String,
    hour: u8,
    minute: Option<u8>,
    annotation: Option<String>,
) -> PingActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return PingActionResponse::failure(message),
    };

    let mut draft = PingDraft::new(color, hour);
    draft.minute = minute;
    draft.annotation = annotation;
    if let Err(err) = draft.validate() {
        return PingActionResponse::failure(format!("ping_add rejected: {err}"));
    }

    match with_session(|session| session.add_ping(&date, draft)) {
        Ok(ping) => PingActionResponse::success("Ping added.", Some(ping.id.to_string())),
        Err(message) => PingActionResponse::failure(message),
    }
}

/// Removes a ping from a day. Unknown date or ping ID is a successful
/// no-op, matching the store contract.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ping_remove(date: String, ping_id: String) -> PingActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return PingActionResponse::failure(message),
    };
    let id = match parse_ping_id(&ping_id) {
        Ok(id) => id,
        Err(message) => return PingActionResponse::failure(message),
    };

    match with_session(|session| session.remove_ping(&date, id)) {
        Ok(()) => PingActionResponse::success("Ping removed.", Some(ping_id)),
        Err(message) => PingActionResponse::failure(message),
    }
}

/// Patches a ping in place.
///
/// `minute`/`annotation` follow a set-or-clear shape: passing a value sets
/// the field, the matching `clear_*` flag clears it, and neither leaves it
/// unchanged. The ping's `id` and `timestamp` can never change.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unknown date or ping ID is a successful no-op.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn ping_update(
    date: String,
    ping_id: String,
    color: Option<String>,
    hour: Option<u8>,
    minute: Option<u8>,
    clear_minute: bool,
    annotation: Option<String>,
    clear_annotation: bool,
) -> PingActionResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return PingActionResponse::failure(message),
    };
    let id = match parse_ping_id(&ping_id) {
        Ok(id) => id,
        Err(message) => return PingActionResponse::failure(message),
    };

    let patch = PingPatch {
        color,
        hour,
        minute: set_or_clear(minute, clear_minute),
        annotation: set_or_clear(annotation, clear_annotation),
        metadata: None,
    };

    match with_session(|session| session.update_ping(&date, id, patch)) {
        Ok(()) => PingActionResponse::success("Ping updated.", Some(ping_id)),
        Err(message) => PingActionResponse::failure(message),
    }
}

/// Returns all pings for a day, ascending by creation order.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unknown dates yield an empty list, not a failure.
#[flutter_rust_bridge::frb(sync)]
pub fn pings_for_date(date: String) -> PingListResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => {
            return PingListResponse {
                ok: false,
                items: Vec::new(),
                message,
            }
        }
    };

    match with_session(|session| session.pings_for(&date)) {
        Ok(pings) => PingListResponse {
            message: format!("{} ping(s).", pings.len()),
            items: pings.into_iter().map(to_ping_view).collect(),
            ok: true,
        },
        Err(message) => PingListResponse {
            ok: false,
            items: Vec::new(),
            message,
        },
    }
}

/// Counts pings across days, optionally restricted to an inclusive date
/// range. Inverted ranges yield zero, not an error.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ping_count_in_range(start: Option<String>, end: Option<String>) -> CountResponse {
    let start = match parse_optional_date(start) {
        Ok(start) => start,
        Err(message) => return CountResponse { ok: false, count: 0, message },
    };
    let end = match parse_optional_date(end) {
        Ok(end) => end,
        Err(message) => return CountResponse { ok: false, count: 0, message },
    };

    match with_session(|session| count_in_range(session.store(), start.as_ref(), end.as_ref())) {
        Ok(count) => CountResponse {
            ok: true,
            count: count as u64,
            message: format!("{count} ping(s) in range."),
        },
        Err(message) => CountResponse { ok: false, count: 0, message },
    }
}

/// Groups pings by hour, for one day or the whole store.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Hours with no pings are absent from `groups`.
#[flutter_rust_bridge::frb(sync)]
pub fn pings_by_hour(date: Option<String>) -> HourGroupResponse {
    let date = match parse_optional_date(date) {
        Ok(date) => date,
        Err(message) => {
            return HourGroupResponse {
                ok: false,
                groups: Vec::new(),
                message,
            }
        }
    };

    match with_session(|session| group_by_hour(session.store(), date.as_ref())) {
        Ok(groups) => HourGroupResponse {
            message: format!("{} hour bucket(s).", groups.len()),
            groups: groups
                .into_iter()
                .map(|(hour, pings)| HourGroup {
                    hour,
                    items: pings.into_iter().map(to_ping_view).collect(),
                })
                .collect(),
            ok: true,
        },
        Err(message) => HourGroupResponse {
            ok: false,
            groups: Vec::new(),
            message,
        },
    }
}

/// Returns the store subset whose pings match `color` exactly.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Days without a matching ping are excluded entirely.
#[flutter_rust_bridge::frb(sync)]
pub fn pings_with_color(color: String) -> ColorFilterResponse {
    match with_session(|session| filter_by_color(session.store(), &color)) {
        Ok(subset) => {
            let days: Vec<DayPings> = subset
                .iter_days()
                .map(|(date, record)| DayPings {
                    date: date.to_string(),
                    marked: record.marked,
                    items: record.pings.iter().cloned().map(to_ping_view).collect(),
                })
                .collect();
            ColorFilterResponse {
                message: format!("{} day(s) with color {color}.", days.len()),
                days,
                ok: true,
            }
        }
        Err(message) => ColorFilterResponse {
            ok: false,
            days: Vec::new(),
            message,
        },
    }
}

/// Advisory draft validity check backing the UI's save gate.
///
/// # FFI contract
/// - Sync call, pure, never panics, needs no session.
#[flutter_rust_bridge::frb(sync)]
pub fn ping_is_valid(color: String, hour: u8, minute: Option<u8>) -> bool {
    let mut draft = PingDraft::new(color, hour);
    draft.minute = minute;
    is_valid_ping(&draft)
}

/// Projects one day's pings onto month-cell dot positions using the
/// standard cell geometry.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unknown dates yield an empty dot list.
#[flutter_rust_bridge::frb(sync)]
pub fn month_day_layout(date: String) -> MonthLayoutResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => {
            return MonthLayoutResponse {
                ok: false,
                dots: Vec::new(),
                message,
            }
        }
    };

    match with_session(|session| project_month(&session.pings_for(&date), &MonthLayout::default()))
    {
        Ok(dots) => MonthLayoutResponse {
            message: format!("{} dot(s).", dots.len()),
            dots: dots
                .into_iter()
                .map(|dot| MonthDotView {
                    id: dot.id.to_string(),
                    top: dot.top,
                    right: dot.right,
                    color: dot.color,
                })
                .collect(),
            ok: true,
        },
        Err(message) => MonthLayoutResponse {
            ok: false,
            dots: Vec::new(),
            message,
        },
    }
}

/// Projects one day's pings onto week-bar marker positions using the
/// standard bar geometry.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Unknown dates yield an empty bar with a zero count.
#[flutter_rust_bridge::frb(sync)]
pub fn week_day_layout(date: String) -> WeekLayoutResponse {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => {
            return WeekLayoutResponse {
                ok: false,
                markers: Vec::new(),
                ping_count: 0,
                message,
            }
        }
    };

    match with_session(|session| project_week(&session.pings_for(&date), &WeekLayout::default())) {
        Ok(bar) => WeekLayoutResponse {
            message: format!("{} marker(s).", bar.markers.len()),
            markers: bar
                .markers
                .into_iter()
                .map(|marker| WeekMarkerView {
                    id: marker.id.to_string(),
                    top: marker.top,
                    color: marker.color,
                })
                .collect(),
            ping_count: bar.ping_count as u64,
            ok: true,
        },
        Err(message) => WeekLayoutResponse {
            ok: false,
            markers: Vec::new(),
            ping_count: 0,
            message,
        },
    }
}

fn session_slot() -> std::sync::MutexGuard<'static, Option<CalendarSession>> {
    // Poisoning cannot leave the Option in a torn state; recover the guard
    // rather than panicking across the FFI boundary.
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_session<T>(f: impl FnOnce(&mut CalendarSession) -> T) -> Result<T, String> {
    let mut slot = session_slot();
    match slot.as_mut() {
        Some(session) => Ok(f(session)),
        None => {
            warn!("event=session_guard module=ffi status=error reason=not_initialized");
            Err(SessionError::NotInitialized.to_string())
        }
    }
}

fn parse_date(raw: &str) -> Result<DateKey, String> {
    DateKey::new(raw).map_err(|err| err.to_string())
}

fn parse_optional_date(raw: Option<String>) -> Result<Option<DateKey>, String> {
    raw.map(|raw| parse_date(&raw)).transpose()
}

fn parse_ping_id(raw: &str) -> Result<PingId, String> {
    uuid::Uuid::parse_str(raw).map_err(|_| format!("invalid ping id `{raw}`"))
}

fn set_or_clear<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    match (value, clear) {
        (Some(value), _) => Some(Some(value)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

fn to_ping_view(ping: Ping) -> PingView {
    let metadata_json = ping
        .metadata
        .as_ref()
        .and_then(|metadata| serde_json::to_string(metadata).ok());
    PingView {
        id: ping.id.to_string(),
        color: ping.color,
        hour: ping.hour,
        minute: ping.minute,
        timestamp: ping.timestamp,
        annotation: ping.annotation,
        metadata_json,
    }
}
