//! Flutter-facing FFI crate for PingCal.
//!
//! All exported functions live in [`api`]; this crate only adds the bridge
//! surface and owns the process-wide session slot for the mobile shell.

pub mod api;
