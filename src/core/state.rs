//! # Application State
//!
//! Core business state for Clipchat. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Session
//! ├── timeline: Timeline            // append-only conversation log
//! ├── pending_url: String           // not-yet-submitted URL field
//! ├── pending_prompt: String        // not-yet-submitted prompt field
//! ├── busy: bool                    // run in flight, gates resubmission
//! ├── generation: u64               // current run's generation token
//! ├── active_run: Option<ActiveRun> // submitted url/prompt of the run
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.
//!
//! `busy` is the sole admission gate: at most one run may be in flight, and
//! it is a global gate, not a per-URL one. `generation` is bumped on every
//! submission and on every terminal entry, so callbacks scheduled by a run
//! that has since terminated can detect that they are stale and no-op.

use crate::core::timeline::Timeline;

/// The url/prompt pair of the run currently in flight. The result card and
/// embed-ID derivation read the *submitted* URL from here rather than from
/// the fetched metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRun {
    pub url: String,
    pub prompt: String,
}

pub struct Session {
    pub timeline: Timeline,
    pub pending_url: String,
    pub pending_prompt: String,
    pub busy: bool,
    pub generation: u64,
    pub active_run: Option<ActiveRun>,
    pub status_message: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            timeline: Timeline::new(),
            pending_url: String::new(),
            pending_prompt: String::new(),
            busy: false,
            generation: 0,
            active_run: None,
            status_message: String::from("Welcome to Clipchat!"),
        }
    }

    /// True when `generation` identifies the run currently in flight.
    /// Scheduled callbacks from terminated runs fail this check and no-op.
    pub fn run_is_current(&self, generation: u64) -> bool {
        self.busy && generation == self.generation
    }
}
