//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! sequencer and the timeline are adapter-agnostic (the integration tests
//! drive them headless).
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (run in flight): draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::sync::mpsc;

use crate::agent::sequencer::{RunMode, spawn_run};
use crate::backend::{ClipSimulator, MetadataFetcher, MockSimulator, OembedFetcher};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, InputForm, TimelineListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub timeline_list: TimelineListState,
    pub form: InputForm,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            timeline_list: TimelineListState::new(),
            form: InputForm::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the run collaborators from a resolved config's backend name.
pub fn build_run_mode(config: &ResolvedConfig) -> RunMode {
    let mode = match config.backend.as_str() {
        "mock" => RunMode::Simulated {
            simulator: Arc::new(MockSimulator::new(
                config.transcript_delay,
                config.generate_delay,
            )),
        },
        _ => {
            // Default to the live oEmbed lookup
            RunMode::Live {
                fetcher: Arc::new(OembedFetcher::new(Some(config.relay_url.clone()))),
            }
        }
    };
    match &mode {
        RunMode::Live { fetcher } => info!("Metadata backend: {}", fetcher.name()),
        RunMode::Simulated { simulator } => info!("Clip backend: {}", simulator.name()),
    }
    mode
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mode = build_run_mode(&config);
    let mut session = Session::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    // Abort handles for the current run's timers and backend task
    let mut active_abort_handles: Vec<tokio::task::AbortHandle> = Vec::new();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        // Sync presentation props with core state
        tui.form.dimmed = session.busy;

        if session.busy {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while the spinner runs, long when idle
        let timeout = if session.busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut session, Action::Quit) == Effect::Quit {
                    break 'outer;
                }
                continue;
            }

            // Scroll events always go to the timeline
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.timeline_list.handle_event(&event);
                continue;
            }

            // Everything else belongs to the form
            if let Some(form_event) = tui.form.handle_event(&event) {
                match form_event {
                    FormEvent::Submit { url, prompt } => {
                        let effect = update(&mut session, Action::Submit { url, prompt });
                        if let Effect::StartRun {
                            generation,
                            url,
                            prompt,
                        } = effect
                        {
                            // Tasks of a previous run are stale by generation
                            // anyway; abort them outright.
                            for handle in active_abort_handles.drain(..) {
                                handle.abort();
                            }
                            active_abort_handles = spawn_run(
                                generation,
                                url,
                                prompt,
                                mode.clone(),
                                config.pacing,
                                tx.clone(),
                            );
                            tui.form.clear();
                        }
                    }
                    FormEvent::Changed => {
                        session.pending_url = tui.form.url.clone();
                        session.pending_prompt = tui.form.prompt.clone();
                    }
                }
            }
        }

        // Handle background task actions (timers, backend completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut session, action) == Effect::Quit {
                break 'outer;
            }
        }
    }

    for handle in active_abort_handles.drain(..) {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}
