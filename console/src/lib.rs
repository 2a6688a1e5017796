//! # Coinvault Admin Console - Library Root
//!
//! Client for the platform's admin API plus the page controllers an operator
//! console is built from. The `admin-console` binary (`main.rs`) is a thin
//! command line front end over this crate.
//!
//! ## Architecture
//!
//! ### Technology Stack
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              admin-console (this crate)                │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client                           │
//! │  parking_lot   - Page state locks                      │
//! │  async-channel - Notifications to the front end        │
//! │  tracing       - Structured logging                    │
//! │  clap          - Command line front end                │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP + Bearer token
//!          ▼
//! ┌─────────────────────────┐
//! │  Backend API `/admin/*` │
//! └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Page controllers and the [`app::App`] orchestrator
//!   - `list`: generic paginated list controller
//!   - `pages`: users, KYC, documents, deposits, withdrawals, transactions, audit logs
//!   - `settings`, `dashboard`, `auth`: the remaining pages
//!   - `registry`: cache invalidation keys shared between pages
//!   - `notifications`: success/error toasts as a channel
//!
//! - **services**: External integrations
//!   - `api`: Admin HTTP client, one submodule per endpoint group
//!   - `session`: Token and profile persistence
//!
//! - **core**: [`core::AdminApi`] service trait and [`core::AppError`]
//! - **config**: Environment-driven [`config::ConsoleConfig`]
//! - **telemetry**: `tracing` subscriber setup for the binary
//! - **utils**: Input validation
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── config, telemetry
//!   │
//!   └── app (controllers, state, notifications)
//!       └── core::AdminApi
//!           └── services::api::ApiClient
//!               └── services::session (file or memory)
//! ```
//!
//! ## Core Concepts
//!
//! ### State Management
//!
//! Each controller keeps its render state in `Arc<RwLock<State>>`. Locks are
//! taken briefly and never held across an `.await`.
//!
//! ### Testing
//!
//! Controllers depend on `dyn AdminApi`, so unit tests run against an
//! in-memory fake. The HTTP client is tested against `mockito`.

pub mod app;
pub mod config;
pub mod core;
pub mod services;
pub mod telemetry;
pub mod utils;
