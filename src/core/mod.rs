//! # Core Browsing Logic
//!
//! This module contains the note browser's state machine. It knows nothing
//! about terminals or key codes; the TUI adapter translates input into
//! [`action::Action`] values and draws whatever the state says.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ NoteIndex  │      │RenderCache │      │  Viewport  │
//!     │ (cursor)   │      │ (memo)     │      │  × 2       │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all browsing state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`note`]: Directory scan, note filtering, selection cursor
//! - [`cache`]: Render memoization keyed by note name
//! - [`viewport`]: Pane sizing and scroll offsets
//! - [`render`]: The `ContentRenderer` seam
//! - [`editor`]: Foreground editor process
//! - [`config`]: Config file + env resolution

pub mod action;
pub mod cache;
pub mod config;
pub mod editor;
pub mod note;
pub mod render;
pub mod state;
pub mod viewport;
