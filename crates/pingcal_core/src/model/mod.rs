//! Domain model for calendar ping annotations.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one ping-centric shape shared by month and week projections.
//!
//! # Invariants
//! - Every ping is identified by a stable `PingId`.
//! - Field validation is advisory; model constructors never reject domain
//!   data (the session/UI layer decides what to do with invalid drafts).

pub mod day;
pub mod ping;
