//! Core domain logic for PingCal.
//! This crate is the single source of truth for ping data invariants: the
//! calendar store, its query engine and the month/week layout projection.

pub mod layout;
pub mod logging;
pub mod model;
pub mod query;
pub mod session;
pub mod store;

pub use layout::{
    project_month, project_week, MonthDot, MonthLayout, WeekBar, WeekLayout, WeekMarker,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::{DateKey, DateKeyError, DayMarking, DayRecord};
pub use model::ping::{
    Ping, PingDraft, PingId, PingMetadata, PingPatch, PingValidationError, MINUTES_PER_DAY,
};
pub use query::{count_in_range, filter_by_color, group_by_hour, is_valid_ping};
pub use session::{CalendarSession, SessionError};
pub use store::CalendarStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
