//! Owning session for the calendar store.
//!
//! # Responsibility
//! - Hold the one live store value per active UI session and thread the
//!   pure store operations through it.
//! - Name the single hard failure of the core contract: calling in before
//!   a session exists.
//!
//! # Invariants
//! - The store is never a hidden process-wide singleton inside the core;
//!   whoever creates the session owns it and decides its lifetime.
//! - Session methods replace the held snapshot atomically per call; reads
//!   issued between mutations always observe a fixed snapshot.

use crate::model::day::{DateKey, DayMarking};
use crate::model::ping::{Ping, PingDraft, PingId, PingPatch};
use crate::store::CalendarStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-layer failure.
///
/// Missing dates and ping ids are deliberately *not* here; the store
/// defines those as no-ops. The only hard failure is wiring misuse:
/// invoking core operations before any session was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An operation was invoked with no active session. This indicates a
    /// collaborator wiring mistake (use before init), not a data problem,
    /// and must surface immediately instead of being absorbed.
    NotInitialized,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(
                f,
                "calendar session not initialized: create a session before calling core operations"
            ),
        }
    }
}

impl Error for SessionError {}

/// The controlling component's state holder for one UI session.
///
/// Created at session start, discarded at session end. All mutations go
/// through the pure store operations; this type only swaps the held value.
#[derive(Debug, Clone, Default)]
pub struct CalendarSession {
    store: CalendarStore,
}

impl CalendarSession {
    /// Starts a session with an empty store.
    pub fn new() -> Self {
        info!("event=session_init module=session status=ok seed=empty");
        Self {
            store: CalendarStore::new(),
        }
    }

    /// Starts a session seeded from day markings (legacy or ping-list
    /// form), normalized at the store boundary.
    pub fn with_markings(markings: impl IntoIterator<Item = (DateKey, DayMarking)>) -> Self {
        let store = CalendarStore::from_markings(markings);
        info!(
            "event=session_init module=session status=ok seed=markings days={} pings={}",
            store.day_count(),
            store.total_pings()
        );
        Self { store }
    }

    /// Starts a session around an existing store snapshot.
    pub fn with_store(store: CalendarStore) -> Self {
        Self { store }
    }

    /// Borrows the current snapshot for derivations (queries, layout).
    pub fn store(&self) -> &CalendarStore {
        &self.store
    }

    /// Replaces the held snapshot wholesale.
    pub fn replace(&mut self, store: CalendarStore) {
        self.store = store;
    }

    /// Commits a ping and returns it with its assigned id and timestamp.
    pub fn add_ping(&mut self, date: &DateKey, draft: PingDraft) -> Ping {
        let (store, ping) = self.store.add(date, draft);
        self.store = store;
        ping
    }

    /// Removes a ping; unknown date/id leaves the session unchanged.
    pub fn remove_ping(&mut self, date: &DateKey, id: PingId) {
        self.store = self.store.remove(date, id);
    }

    /// Patches a ping; unknown date/id leaves the session unchanged.
    pub fn update_ping(&mut self, date: &DateKey, id: PingId, patch: PingPatch) {
        self.store = self.store.update(date, id, patch);
    }

    /// Sorted pings for one day, from the current snapshot.
    pub fn pings_for(&self, date: &DateKey) -> Vec<Ping> {
        self.store.pings_for(date)
    }
}
