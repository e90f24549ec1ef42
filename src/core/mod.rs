//! # Core Application Logic
//!
//! This module contains Clipchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Timeline (entries)   │
//!                    │  • Session (app data)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  headless  │      │   another  │
//!     │  Adapter   │      │   driver   │      │   adapter  │
//!     │ (ratatui)  │      │  (tests)   │      │  (future)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`timeline`]: The append-only conversation log and its entry types
//! - [`state`]: The `Session` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: TOML configuration with a defaults → file → env → CLI hierarchy

pub mod action;
pub mod config;
pub mod state;
pub mod timeline;
