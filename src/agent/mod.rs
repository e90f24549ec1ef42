//! The agent sequencer: the scripted status pacing and the background tasks
//! that drive a run. The pure state transitions live in `core::action`; this
//! module is the I/O side that feeds it.

pub mod script;
pub mod sequencer;

pub use script::Pacing;
pub use sequencer::{RunMode, spawn_run};
