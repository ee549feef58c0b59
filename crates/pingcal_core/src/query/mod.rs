//! Read-only aggregation over a store snapshot.
//!
//! # Responsibility
//! - Derive counts, hour groupings and color subsets without mutating the
//!   store.
//! - Expose the advisory draft validity predicate used by UI save gates.
//!
//! # Invariants
//! - Every function here takes `&CalendarStore` and never returns a handle
//!   into it that could mutate it.
//! - Range bounds are inclusive and compared lexicographically, which is
//!   chronological for valid `DateKey`s. Inverted ranges yield empty
//!   results, not errors.

use crate::model::day::{DateKey, DayRecord};
use crate::model::ping::{Ping, PingDraft};
use crate::store::CalendarStore;
use std::collections::BTreeMap;

/// Counts pings across all days, optionally restricted to an inclusive
/// `[start, end]` date range.
///
/// Both bounds absent counts everything. A single bound restricts one side
/// only. `start > end` yields `0` by the same inclusive-bounds predicate,
/// with no ordering precondition enforced.
pub fn count_in_range(
    store: &CalendarStore,
    start: Option<&DateKey>,
    end: Option<&DateKey>,
) -> usize {
    store
        .iter_days()
        .filter(|(date, _)| in_range(date, start, end))
        .map(|(_, record)| record.pings.len())
        .sum()
}

/// Groups pings by their raw `hour` field.
///
/// With `date` given, only that day's pings are grouped (in creation
/// order); otherwise all days' pings are flattened first. Hours without
/// pings are absent from the map rather than present with an empty list.
pub fn group_by_hour(store: &CalendarStore, date: Option<&DateKey>) -> BTreeMap<u8, Vec<Ping>> {
    let pings: Vec<Ping> = match date {
        Some(date) => store.pings_for(date),
        None => store
            .iter_days()
            .flat_map(|(_, record)| record.pings.iter().cloned())
            .collect(),
    };

    let mut groups: BTreeMap<u8, Vec<Ping>> = BTreeMap::new();
    for ping in pings {
        groups.entry(ping.hour).or_default().push(ping);
    }
    groups
}

/// Returns a store-shaped subset containing only pings whose color matches
/// `color` exactly (case-sensitive token equality).
///
/// Days with zero matching pings are excluded entirely, mirroring the
/// store's pruning invariant; day-level attributes of surviving days are
/// carried over unchanged.
pub fn filter_by_color(store: &CalendarStore, color: &str) -> CalendarStore {
    let days: BTreeMap<DateKey, DayRecord> = store
        .iter_days()
        .filter_map(|(date, record)| {
            let matching: Vec<Ping> = record
                .pings
                .iter()
                .filter(|ping| ping.color == color)
                .cloned()
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some((
                date.clone(),
                DayRecord {
                    marked: record.marked,
                    pings: matching,
                },
            ))
        })
        .collect();

    store.with_days(days)
}

/// Advisory validity predicate for UI-entered drafts.
///
/// `true` iff the color token is non-empty, `hour` is in `0..=23` and
/// `minute` is absent or in `0..=59`. The store accepts drafts regardless;
/// this only informs the caller's save gate.
pub fn is_valid_ping(draft: &PingDraft) -> bool {
    draft.validate().is_ok()
}

fn in_range(date: &DateKey, start: Option<&DateKey>, end: Option<&DateKey>) -> bool {
    if start.is_some_and(|start| date < start) {
        return false;
    }
    if end.is_some_and(|end| date > end) {
        return false;
    }
    true
}
