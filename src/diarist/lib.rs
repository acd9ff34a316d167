//! # Diarist Architecture
//!
//! Diarist is a **UI-agnostic diary library**: PIN-gated diaries holding an
//! append-only log of text, drawing, image and audio entries, persisted in a
//! local key-value storage. The `diarist` binary is one client of it; a web
//! client can bind the same display lists and pointer events to a page.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prompts for PINs, prints, exit codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, applies configured defaults                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Registry: create, list, unlock, view                     │
//! │  - Entry log: append, entries, upload, draw                 │
//! │  - Preferences: theme, config                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Alongside the layers sit the drawing surface ([`canvas`], [`capture`]) and
//! the entry renderer ([`render`]).
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns
//! `Result<CmdResult>`. It never prints, never exits, and only logs through
//! `tracing`.
//!
//! ## The PIN
//!
//! PINs and entries are stored in cleartext. The PIN keeps the UI closed to a
//! casual reader and nothing more.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`DiaryRecord`, `Entry`, `Theme`)
//! - [`canvas`]: RGBA drawing surface and PNG serialization
//! - [`capture`]: Pointer/touch state machine driving a canvas
//! - [`render`]: Entry display lists and HTML output
//! - [`data_url`]: Base64 data URLs for media entries
//! - [`ids`]: Short random identifiers for diaries and entries
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup for clients
//! - [`error`]: Error types

pub mod api;
pub mod canvas;
pub mod capture;
pub mod commands;
pub mod config;
pub mod data_url;
pub mod error;
pub mod ids;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;
