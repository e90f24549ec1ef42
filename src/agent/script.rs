//! The scripted status sequence.
//!
//! These are cosmetic progress indicators fired at designed offsets from
//! submission. They are scheduled independently of the real backend calls and
//! never reflect true state; a fast network reply landing between two of them
//! is accepted behavior, not something to serialize away.

use std::time::Duration;

use crate::core::timeline::RenderTag;

/// One scheduled status entry.
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep {
    pub offset: Duration,
    pub text: &'static str,
    pub tag: RenderTag,
}

/// Offsets for the scripted statuses and for the live variant's result.
///
/// The acknowledgement is not here: it is appended synchronously by the
/// reducer at submission, so the first two timeline entries of a run are
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub memory_notice: Duration,
    pub transcript_notice: Duration,
    pub generation_notice: Duration,
    /// Earliest point at which a successful live lookup is surfaced. Holding
    /// the result back to this offset keeps the simulated pacing intact even
    /// when the network is fast.
    pub result: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            memory_notice: Duration::from_millis(1200),
            transcript_notice: Duration::from_millis(2600),
            generation_notice: Duration::from_millis(4200),
            result: Duration::from_millis(5400),
        }
    }
}

impl Pacing {
    /// The scheduled steps in designed order.
    pub fn steps(&self) -> [ScriptStep; 3] {
        [
            ScriptStep {
                offset: self.memory_notice,
                text: "Pulling up what I remember about this channel...",
                tag: RenderTag::Icon,
            },
            ScriptStep {
                offset: self.transcript_notice,
                text: "Requesting the transcript from the source...",
                tag: RenderTag::Link,
            },
            ScriptStep {
                offset: self.generation_notice,
                text: "Spinning up the clip generator...",
                tag: RenderTag::Icon,
            },
        ]
    }

    /// Uniformly scaled pacing, used by tests to run the script in
    /// milliseconds instead of seconds.
    pub fn scaled_ms(memory: u64, transcript: u64, generation: u64, result: u64) -> Self {
        Pacing {
            memory_notice: Duration::from_millis(memory),
            transcript_notice: Duration::from_millis(transcript),
            generation_notice: Duration::from_millis(generation),
            result: Duration::from_millis(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_in_designed_order() {
        let pacing = Pacing::default();
        let steps = pacing.steps();
        assert!(steps.windows(2).all(|w| w[0].offset < w[1].offset));
        assert!(steps.last().unwrap().offset < pacing.result);
    }

    #[test]
    fn test_default_script_has_three_notices() {
        assert_eq!(Pacing::default().steps().len(), 3);
    }
}
