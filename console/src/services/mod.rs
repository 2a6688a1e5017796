//! # Services
//!
//! - [`api`]: HTTP client for the backend admin API
//! - [`session`]: the persisted admin session and its stores

pub mod api;
pub mod session;
