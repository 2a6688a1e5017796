//! # Telemetry
//!
//! Logging setup for the console binary. Library code only emits `tracing`
//! events; installing a subscriber is the binary's job.

pub mod logger;

pub use logger::{init, LogGuard};
