//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the admin console and the backend admin API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Admin login, profile and password DTOs
//!   - **[`dto::users`]**: Platform user records and filters
//!   - **[`dto::kyc`]**: KYC submissions
//!   - **[`dto::documents`]**: Marketplace documents
//!   - **[`dto::funding`]**: Deposit and withdrawal requests
//!   - **[`dto::transactions`]**: Ledger transactions
//!   - **[`dto::audit`]**: Audit log entries
//!   - **[`dto::dashboard`]**: Aggregate dashboard metrics
//!   - **[`dto::settings`]**: Platform settings bundle and its schema
//!   - **[`dto::pagination`]**: Paginated list envelope
//! - **[`utils`]**: Display helpers shared by front ends
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case** in Rust and JSON
//! - Optional request fields are omitted when `None`, except where the backend expects an explicit `null`
//! - Status enums serialize to lowercase strings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::auth::AdminLoginRequest;
//!
//! let request = AdminLoginRequest {
//!     email: "ops@example.com".to_string(),
//!     password: "secret".to_string(),
//!     totp_code: None,
//! };
//! let body = serde_json::to_string(&request).unwrap();
//! assert!(body.contains("\"totp_code\":null"));
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
