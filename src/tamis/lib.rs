//! # Tamis Architecture
//!
//! Tamis is the filter-resolution core of an entity-list admin panel: given
//! declarative filter handlers, it resolves each filter's effective value for
//! a request and serializes filter configuration for a front end. It is a
//! **web-stack-agnostic library** — the host framework supplies raw query
//! parameters and a session capability, and consumes resolved values when
//! building its queries.
//!
//! ## The Two Core Components
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  FilterRegistry (registry.rs)                               │
//! │  - One handler per filter name, in registration order       │
//! │  - Classifies handlers by declared capabilities             │
//! │  - describe(): FilterConfig records for the front end       │
//! │  - default_value_for(): request-independent resolution      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ consulted by
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  FilterValueStore (store.rs)                                │
//! │  - One instance per request                                 │
//! │  - ingest(): filter_* query parameters                      │
//! │  - filter_for(): lazily decoded values                      │
//! │  - put_retained_values_in_session(): end-of-request write   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ persists through
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session/)                                   │
//! │  - Abstract SessionStore trait (get/put/forget/flush)       │
//! │  - FileSession (standalone), MemorySession (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Value Resolution
//!
//! A filter's effective value comes from the strongest available source:
//! forced value, then request input, then session-retained value, then the
//! handler's required default, then nothing. Composite values (multi-select
//! lists, date ranges) travel as flat delimited strings — see [`encoding`] —
//! so session slots and query-string parameters share one representation.
//!
//! ## Request Lifecycle
//!
//! 1. Build a [`registry::FilterRegistry`] once per list definition.
//! 2. Per request, construct a [`store::FilterValueStore`] with the session,
//!    `ingest` the query parameters, then `fill_default_values`.
//! 3. Query-building code calls `filter_for(name)` any number of times.
//! 4. Before the response is finalized, `put_retained_values_in_session`
//!    writes retained values and flushes the session.
//!
//! ## Module Overview
//!
//! - [`registry`]: handler registration, classification, config description
//! - [`store`]: per-request value resolution and session retention
//! - [`handler`]: the `FilterHandler` trait and capability model
//! - [`encoding`]: the flat-string wire codec for composite values
//! - [`session`]: session capability trait and backends
//! - [`model`]: value types (`FilterValue`, `DateRange`, inputs)
//! - [`error`]: error types

pub mod encoding;
pub mod error;
pub mod handler;
pub mod model;
pub mod registry;
pub mod session;
pub mod store;
