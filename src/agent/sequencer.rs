//! Background tasks for a run.
//!
//! `spawn_run` launches one timer task per scripted status plus one backend
//! task, all sending `Action`s back to the event loop over an unbounded
//! channel. Every action carries the run's generation token; the reducer
//! drops deliveries from runs that have since terminated, so nothing here
//! needs to coordinate with anything else.
//!
//! The returned abort handles let the caller tear the tasks down outright
//! (on quit, or when a terminated run's timers are no longer worth keeping
//! around). Dropping them is also fine: a stale task that does fire is a
//! no-op at the reducer.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;
use tokio::time::{Instant, sleep, sleep_until, timeout};

use crate::agent::script::Pacing;
use crate::backend::provider::{BackendError, ClipSimulator, MetadataFetcher};
use crate::core::action::Action;

/// One simulator call may not outlive this; the admission gate must not
/// deadlock on a call that never resolves.
const SIMULATOR_DEADLINE: Duration = Duration::from_secs(30);

/// Which collaborators drive the run.
#[derive(Clone)]
pub enum RunMode {
    /// Real metadata through the oEmbed relay.
    Live { fetcher: Arc<dyn MetadataFetcher> },
    /// Everything simulated in-process.
    Simulated { simulator: Arc<dyn ClipSimulator> },
}

/// Spawns the scripted status timers and the backend task for an admitted
/// run. Call only after the reducer returned `Effect::StartRun`.
pub fn spawn_run(
    generation: u64,
    url: String,
    prompt: String,
    mode: RunMode,
    pacing: Pacing,
    tx: UnboundedSender<Action>,
) -> Vec<AbortHandle> {
    info!("Spawning run {generation} for {url}");
    let mut handles = Vec::new();

    // Cosmetic progress, each on its own timer. Independent of the backend
    // task by design.
    for step in pacing.steps() {
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            sleep(step.offset).await;
            if tx
                .send(Action::ScriptedStatus {
                    generation,
                    text: step.text.to_string(),
                    tag: step.tag,
                })
                .is_err()
            {
                warn!("Failed to send scripted status: receiver dropped");
            }
        });
        handles.push(handle.abort_handle());
    }

    let backend_handle = match mode {
        RunMode::Live { fetcher } => tokio::spawn(live_run(generation, url, fetcher, pacing, tx)),
        RunMode::Simulated { simulator } => {
            tokio::spawn(simulated_run(generation, url, prompt, simulator, tx))
        }
    };
    handles.push(backend_handle.abort_handle());

    handles
}

/// Live variant: one metadata lookup. Errors surface immediately; a success
/// is held back to the scripted result offset so the pacing survives a fast
/// network.
async fn live_run(
    generation: u64,
    url: String,
    fetcher: Arc<dyn MetadataFetcher>,
    pacing: Pacing,
    tx: UnboundedSender<Action>,
) {
    let started = Instant::now();
    let result = fetcher.fetch(&url).await;

    if result.is_ok() {
        sleep_until(started + pacing.result).await;
    }

    if tx
        .send(Action::MetadataFetched { generation, result })
        .is_err()
    {
        warn!("Failed to send metadata result: receiver dropped");
    }
}

/// Simulated variant: transcript, then clips, sequentially. Each await is
/// fenced by a deadline so a hung simulator cannot wedge the session.
async fn simulated_run(
    generation: u64,
    url: String,
    prompt: String,
    simulator: Arc<dyn ClipSimulator>,
    tx: UnboundedSender<Action>,
) {
    let transcript = match timeout(SIMULATOR_DEADLINE, simulator.fetch_transcript(&url)).await {
        Ok(Ok(transcript)) => transcript,
        Ok(Err(e)) => {
            if tx
                .send(Action::ClipsReady {
                    generation,
                    result: Err(e),
                })
                .is_err()
            {
                warn!("Failed to send transcript failure: receiver dropped");
            }
            return;
        }
        Err(_) => {
            warn!("Transcript call exceeded {SIMULATOR_DEADLINE:?}");
            let _ = tx.send(Action::ClipsReady {
                generation,
                result: Err(BackendError::Timeout),
            });
            return;
        }
    };

    if tx
        .send(Action::TranscriptReady {
            generation,
            chars: transcript.chars().count(),
        })
        .is_err()
    {
        warn!("Failed to send transcript notice: receiver dropped");
        return;
    }

    let result = match timeout(
        SIMULATOR_DEADLINE,
        simulator.generate_clips(&prompt, &transcript),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => {
            warn!("Clip generation exceeded {SIMULATOR_DEADLINE:?}");
            Err(BackendError::Timeout)
        }
    };

    if tx
        .send(Action::ClipsReady { generation, result })
        .is_err()
    {
        warn!("Failed to send clip result: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockSimulator;
    use crate::test_support::{FailingSimulator, StaticFetcher};
    use tokio::sync::mpsc;

    fn fast_pacing() -> Pacing {
        Pacing::scaled_ms(10, 20, 30, 80)
    }

    #[tokio::test]
    async fn test_live_run_emits_three_statuses_then_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_run(
            1,
            "https://youtu.be/abc123".to_string(),
            "clip it".to_string(),
            RunMode::Live {
                fetcher: Arc::new(StaticFetcher),
            },
            fast_pacing(),
            tx,
        );

        let mut statuses = 0;
        loop {
            match rx.recv().await.expect("channel open until tasks finish") {
                Action::ScriptedStatus { generation: 1, .. } => statuses += 1,
                Action::MetadataFetched {
                    generation: 1,
                    result,
                } => {
                    assert!(result.is_ok());
                    break;
                }
                other => panic!("unexpected action: {other:?}"),
            }
        }
        // The instant fetch was held back to the result offset, so every
        // scripted step fired first.
        assert_eq!(statuses, 3);
    }

    #[tokio::test]
    async fn test_simulated_run_sends_transcript_then_clips() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_run(
            7,
            "https://youtu.be/abc123".to_string(),
            "clip it".to_string(),
            RunMode::Simulated {
                simulator: Arc::new(MockSimulator::instant()),
            },
            fast_pacing(),
            tx,
        );

        let mut saw_transcript = false;
        loop {
            match rx.recv().await.expect("channel open until tasks finish") {
                Action::ScriptedStatus { .. } => {}
                Action::TranscriptReady {
                    generation: 7,
                    chars,
                } => {
                    assert!(chars > 0);
                    saw_transcript = true;
                }
                Action::ClipsReady {
                    generation: 7,
                    result,
                } => {
                    assert!(saw_transcript, "transcript notice must precede clips");
                    assert_eq!(result.unwrap().clip_titles.len(), 3);
                    break;
                }
                other => panic!("unexpected action: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_failing_simulator_reports_without_transcript_notice() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_run(
            2,
            "https://youtu.be/abc123".to_string(),
            "clip it".to_string(),
            RunMode::Simulated {
                simulator: Arc::new(FailingSimulator),
            },
            fast_pacing(),
            tx,
        );

        loop {
            match rx.recv().await.expect("channel open until tasks finish") {
                Action::ScriptedStatus { .. } => {}
                Action::ClipsReady {
                    generation: 2,
                    result,
                } => {
                    assert!(result.is_err());
                    break;
                }
                other => panic!("unexpected action: {other:?}"),
            }
        }
    }
}
