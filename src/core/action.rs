//! # Actions
//!
//! Everything that can happen in Clipchat becomes an `Action`.
//! User presses Enter on the form? That's `Action::Submit`.
//! A scheduled status timer fires? That's `Action::ScriptedStatus`.
//! The oEmbed lookup resolves? That's `Action::MetadataFetched`.
//!
//! The `update()` function takes the current session and an action and
//! mutates the session. No side effects here. I/O happens elsewhere: the
//! returned `Effect` tells the caller what to do next (spawn a run, quit).
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! This is the whole agent sequencer as a testable state machine. Every
//! action produced by a background task carries the generation of the run it
//! belongs to; `update()` drops deliveries whose generation is stale, which
//! is what keeps status text from a terminated run off the timeline.

use log::{debug, info, warn};

use crate::backend::embed;
use crate::backend::provider::{BackendError, FetchError};
use crate::core::state::{ActiveRun, Session};
use crate::core::timeline::{Entry, GeneratedClips, Payload, RenderTag, VideoMetadata};

/// First scripted status, appended synchronously on submission so the user
/// entry and the acknowledgement always land before anything asynchronous.
pub const ACKNOWLEDGEMENT: &str = "Got it — let me take a look at that video.";

/// Single user-visible message for every metadata-lookup failure. The
/// network/status/parse distinction is kept in the log only.
pub const FETCH_FAILED_TEXT: &str =
    "Sorry — I couldn't look that video up. Double-check the link and try again.";

/// Generic terminal message for the simulated variant's failure path.
pub const RUN_FAILED_TEXT: &str =
    "Something went wrong while putting your clips together. Please try again.";

const RESULT_VIDEO_TEXT: &str = "Here's what I found — ready to clip.";
const RESULT_CLIPS_TEXT: &str = "Done! Your clips are ready.";

#[derive(Debug)]
pub enum Action {
    /// The one semantic event the presentation layer produces.
    Submit { url: String, prompt: String },
    /// A cosmetic status timer fired.
    ScriptedStatus {
        generation: u64,
        text: String,
        tag: RenderTag,
    },
    /// The oEmbed lookup finished (live variant).
    MetadataFetched {
        generation: u64,
        result: Result<VideoMetadata, FetchError>,
    },
    /// Transcript extraction finished (simulated variant).
    TranscriptReady { generation: u64, chars: usize },
    /// Clip generation finished (simulated variant).
    ClipsReady {
        generation: u64,
        result: Result<GeneratedClips, BackendError>,
    },
    Quit,
}

/// What the caller should do after an `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn the timers and the backend task for a freshly admitted run.
    StartRun {
        generation: u64,
        url: String,
        prompt: String,
    },
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::Submit { url, prompt } => submit(session, url, prompt),

        Action::ScriptedStatus {
            generation,
            text,
            tag,
        } => {
            if !session.run_is_current(generation) {
                debug!("Dropping stale scripted status (generation {generation})");
                return Effect::None;
            }
            session.timeline.push(Entry::status(text, tag));
            Effect::None
        }

        Action::MetadataFetched { generation, result } => {
            if !session.run_is_current(generation) {
                debug!("Dropping stale metadata result (generation {generation})");
                return Effect::None;
            }
            match result {
                Ok(meta) => finish_with_video(session, meta),
                Err(e) => {
                    warn!("Metadata lookup failed: {e}");
                    session
                        .timeline
                        .push(Entry::status(FETCH_FAILED_TEXT, RenderTag::Plain));
                    terminate_run(session);
                }
            }
            Effect::None
        }

        Action::TranscriptReady { generation, chars } => {
            if !session.run_is_current(generation) {
                debug!("Dropping stale transcript notice (generation {generation})");
                return Effect::None;
            }
            session.timeline.push(Entry::status(
                format!("Transcript received ({chars} characters)."),
                RenderTag::Icon,
            ));
            Effect::None
        }

        Action::ClipsReady { generation, result } => {
            if !session.run_is_current(generation) {
                debug!("Dropping stale clip result (generation {generation})");
                return Effect::None;
            }
            match result {
                Ok(clips) => finish_with_clips(session, clips),
                Err(e) => {
                    warn!("Clip generation failed: {e}");
                    session
                        .timeline
                        .push(Entry::status(RUN_FAILED_TEXT, RenderTag::Plain));
                    terminate_run(session);
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Admission control: blank fields and in-flight runs are rejected without
/// touching the timeline.
fn submit(session: &mut Session, url: String, prompt: String) -> Effect {
    let url = url.trim().to_string();
    let prompt = prompt.trim().to_string();

    if url.is_empty() || prompt.is_empty() {
        session.status_message = String::from("A video link and a prompt are both required.");
        return Effect::None;
    }
    if session.busy {
        debug!("Submission rejected: a run is already in flight");
        return Effect::None;
    }

    session.busy = true;
    session.generation += 1;
    session.pending_url.clear();
    session.pending_prompt.clear();
    session.active_run = Some(ActiveRun {
        url: url.clone(),
        prompt: prompt.clone(),
    });
    session.status_message = String::from("Working...");

    session.timeline.push(Entry::user(format!("{url}\n{prompt}")));
    session
        .timeline
        .push(Entry::status(ACKNOWLEDGEMENT, RenderTag::Icon));

    info!("Run {} admitted for {url}", session.generation);
    Effect::StartRun {
        generation: session.generation,
        url,
        prompt,
    }
}

fn finish_with_video(session: &mut Session, meta: VideoMetadata) {
    let run = session.active_run.clone();
    let prompt = run.as_ref().map(|r| r.prompt.clone()).unwrap_or_default();

    // Prefer the URL the user actually submitted; the oEmbed author_url is a
    // channel link more often than a video link.
    let embed_id = run
        .as_ref()
        .and_then(|r| embed::embed_id(&r.url))
        .or_else(|| embed::embed_id(&meta.source_url));
    if embed_id.is_none() {
        info!("No embeddable ID derivable; result card falls back to the thumbnail");
    }

    session.timeline.push(Entry::result(
        RESULT_VIDEO_TEXT,
        Payload::Video {
            meta,
            embed_id,
            prompt,
        },
    ));
    terminate_run(session);
}

fn finish_with_clips(session: &mut Session, clips: GeneratedClips) {
    let prompt = session
        .active_run
        .as_ref()
        .map(|r| r.prompt.clone())
        .unwrap_or_default();
    session
        .timeline
        .push(Entry::result(RESULT_CLIPS_TEXT, Payload::Clips { clips, prompt }));
    terminate_run(session);
}

/// Releases the admission gate and bumps the generation so timers still
/// queued for this run become no-ops.
fn terminate_run(session: &mut Session) {
    session.busy = false;
    session.active_run = None;
    session.generation += 1;
    session.status_message = String::from("Ready.");
}
