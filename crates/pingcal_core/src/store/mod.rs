//! Pure in-memory calendar store.
//!
//! # Responsibility
//! - Own the date → day-record mapping and all ping CRUD on it.
//! - Assign stable ids and creation-order timestamps on `add`.
//!
//! # Invariants
//! - Every operation takes `&self` and returns a new store; inputs are
//!   never mutated, so interleaved reads always see a fixed snapshot.
//! - `next_seq` only ever grows. Removal does not recycle sequence numbers,
//!   which keeps `timestamp` strictly increasing across the whole store.
//! - `remove` prunes a day record that ends up empty and unmarked; absent
//!   keys are never errors, on any operation.

use crate::model::day::{DateKey, DayMarking, DayRecord};
use crate::model::ping::{Ping, PingDraft, PingId, PingPatch};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The full date → day-record mapping plus the store's logical clock.
///
/// This is the core's sole persistent data structure. It is a plain value:
/// the owning session threads it through mutations and decides when to
/// replace its held snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarStore {
    days: BTreeMap<DateKey, DayRecord>,
    /// Next creation-order key to hand out. Strictly monotonic.
    next_seq: u64,
}

impl CalendarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed-data markings.
    ///
    /// Normalizes every [`DayMarking`] to plain drafts and commits them
    /// through the same id/sequence assignment as [`CalendarStore::add`],
    /// so legacy single-ping days are indistinguishable from fresh adds
    /// afterwards. Days that normalize to nothing (and are unmarked) are
    /// not inserted at all, mirroring the pruning invariant.
    pub fn from_markings(markings: impl IntoIterator<Item = (DateKey, DayMarking)>) -> Self {
        let mut store = Self::new();
        for (date, marking) in markings {
            let (marked, drafts) = marking.normalize();
            for draft in drafts {
                store = store.add(&date, draft).0;
            }
            if marked {
                store
                    .days
                    .entry(date)
                    .or_default()
                    .marked = true;
            }
        }
        store
    }

    /// Returns `true` when no day records exist.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of day records currently held.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total ping count across all days.
    pub fn total_pings(&self) -> usize {
        self.days.values().map(|record| record.pings.len()).sum()
    }

    /// Borrows one day record, if present.
    pub fn day(&self, date: &DateKey) -> Option<&DayRecord> {
        self.days.get(date)
    }

    /// Iterates day records in date order.
    pub fn iter_days(&self) -> impl Iterator<Item = (&DateKey, &DayRecord)> {
        self.days.iter()
    }

    /// Adds a ping to `date`, creating the day record if absent.
    ///
    /// Assigns a fresh `id` and the next creation-order `timestamp`, then
    /// returns the new store together with the committed ping.
    ///
    /// # Contract
    /// - Never rejects the draft; validation is advisory and happens (or
    ///   not) in the caller via [`PingDraft::validate`].
    /// - The returned ping's `timestamp` is strictly greater than that of
    ///   every ping committed before it, on any date.
    pub fn add(&self, date: &DateKey, draft: PingDraft) -> (Self, Ping) {
        let mut next = self.clone();
        let ping = Ping {
            id: Uuid::new_v4(),
            color: draft.color,
            hour: draft.hour,
            minute: draft.minute,
            timestamp: next.next_seq,
            annotation: draft.annotation,
            metadata: draft.metadata,
        };
        next.next_seq += 1;

        let record = next.days.entry(date.clone()).or_default();
        record.pings.push(ping.clone());

        debug!(
            "event=ping_add module=store status=ok date={date} ping_id={} seq={}",
            ping.id, ping.timestamp
        );
        (next, ping)
    }

    /// Removes the ping with `id` from `date`.
    ///
    /// # Contract
    /// - Unknown `date` or `id` is a no-op returning an equal store.
    /// - When removal empties the ping list and the day carries no other
    ///   attribute, the whole day record is deleted (pruning invariant).
    pub fn remove(&self, date: &DateKey, id: PingId) -> Self {
        let mut next = self.clone();
        let Some(record) = next.days.get_mut(date) else {
            return next;
        };

        let before = record.pings.len();
        record.pings.retain(|ping| ping.id != id);
        if record.pings.len() == before {
            return next;
        }

        if record.is_prunable() {
            next.days.remove(date);
            debug!("event=day_prune module=store status=ok date={date}");
        }
        debug!("event=ping_remove module=store status=ok date={date} ping_id={id}");
        next
    }

    /// Merges `patch` into the ping with `id` on `date`.
    ///
    /// # Contract
    /// - Unknown `date` or `id` is a no-op returning an equal store.
    /// - `id` and `timestamp` cannot change; [`PingPatch`] has no such
    ///   fields.
    pub fn update(&self, date: &DateKey, id: PingId, patch: PingPatch) -> Self {
        let mut next = self.clone();
        let Some(record) = next.days.get_mut(date) else {
            return next;
        };
        let Some(ping) = record.pings.iter_mut().find(|ping| ping.id == id) else {
            return next;
        };

        patch.apply_to(ping);
        debug!("event=ping_update module=store status=ok date={date} ping_id={id}");
        next
    }

    /// Returns all pings for `date`, ascending by `timestamp`.
    ///
    /// Pure derivation: repeated calls on the same store yield identical
    /// sequences. Absent dates yield an empty vector.
    pub fn pings_for(&self, date: &DateKey) -> Vec<Ping> {
        let Some(record) = self.days.get(date) else {
            return Vec::new();
        };
        let mut pings = record.pings.clone();
        pings.sort_by_key(|ping| ping.timestamp);
        pings
    }

    /// Rebuilds a store from filtered day records, keeping the logical
    /// clock of the source so later adds on the subset stay monotonic.
    pub(crate) fn with_days(&self, days: BTreeMap<DateKey, DayRecord>) -> Self {
        Self {
            days,
            next_seq: self.next_seq,
        }
    }
}
