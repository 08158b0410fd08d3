//! # Blocknote Architecture
//!
//! Blocknote is a **UI-agnostic client library** for a block-based notes service.
//! A note is a titled document made of typed blocks (text, todo list, table,
//! calendar); the service stores them and this crate edits them. The `blocknote`
//! CLI is one client of it; a TUI or GUI would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI (e.g. the blocknote CLI)                                │
//! │  - Parses input, renders output, owns stdout/exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, turns user references into selectors        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/) · Dashboard · Editor (editor/)        │
//! │  - Business logic, optimistic edits, debounced saves        │
//! │  - Block payload edits (blocks/) are pure functions         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend Layer (backend/)                                   │
//! │  - NotesBackend trait                                       │
//! │  - HttpBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Who Owns the Data
//!
//! The service does. Everything held here, the editor's open note included, is a
//! cache of server state. Block edits are applied locally first and saved after a
//! quiet period; if a save fails the local copy keeps the edit and the failure is
//! logged. There is no retry and no conflict resolution: the last write wins.
//!
//! ## No I/O Assumptions in Core
//!
//! Apart from the backend's HTTP calls and `tracing` events, nothing in this crate
//! writes to the terminal or exits the process.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by UIs
//! - [`backend`]: the REST contract and its implementations
//! - [`blocks`]: typed block edits
//! - [`commands`]: list/create/delete/view notes, add/remove/edit blocks
//! - [`config`]: layered configuration
//! - [`dashboard`]: the note list
//! - [`editor`]: the open-note state manager and its save debouncer
//! - [`error`]: error type
//! - [`index`]: display indexes and selectors
//! - [`model`]: notes, blocks and payloads

pub mod api;
pub mod backend;
pub mod blocks;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod index;
pub mod model;
