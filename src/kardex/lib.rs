//! # Kardex Architecture
//!
//! Kardex is a **UI-agnostic catalog library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, render.rs, wired by main.rs)           │
//! │  - Parses arguments, draws cards, handles terminal I/O      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - validate → confirm → store call, one module per command  │
//! │  - Returns structured CmdResult, never prints               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store.rs, view.rs, filter.rs, page.rs, validate.rs)  │
//! │  - Store: the authoritative collection, confirmed-only CRUD │
//! │  - View: filter → paginate → publish to a ViewSink          │
//! │  - Behind trait seams: ProductApi, CatalogCache, Clock,     │
//! │    ConfirmGate, ViewSink — swapped for fakes in tests       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From the command layer inward, code takes regular Rust arguments,
//! returns regular Rust types, **never** writes to stdout/stderr and
//! **never** assumes a terminal. The same core could sit under a TUI or a
//! web front end.
//!
//! ## Data Flow
//!
//! The store syncs three copies of the catalog: the remote API's (the
//! system of record), the local file cache (a mirror, rewritten after
//! every successful mutation), and the in-memory collection everything
//! reads from. Mutations are confirmed-only — memory changes strictly
//! after the server says yes. The view recomputes the visible slice
//! (filter, then paginate) on every mutation, criteria change or page
//! change, and publishes products first, controls second.
//!
//! ## Module Overview
//!
//! - [`store`]: the product store — sync, CRUD, degradation policy
//! - [`view`]: view orchestration and the `ViewSink` rendering seam
//! - [`commands`]: business logic for each command
//! - [`remote`]: the `ProductApi` trait, HTTP client and wire mapping
//! - [`cache`]: the two-key local mirror
//! - [`filter`]: pure filter/sort pipeline
//! - [`page`]: pure pagination window + control layout
//! - [`validate`]: per-field form validation
//! - [`confirm`]: yes/no gate for destructive actions
//! - [`config`]: persisted settings
//! - [`model`]: core data types (`Product`, `FilterCriteria`, …)
//! - [`error`]: error types

pub mod cache;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod model;
pub mod page;
pub mod remote;
pub mod store;
pub mod validate;
pub mod view;
