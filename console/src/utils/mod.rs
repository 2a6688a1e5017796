//! # Utility Functions
//!
//! - **[`validation`]**: Input checks run before a request leaves the console
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Display helpers (short ids, amounts)
//! - [`crate::core`]: Error types

pub mod validation;
