//! Deterministic stand-in for the transcript/clip pipeline.
//!
//! Both calls are pure functions of their inputs apart from an artificial
//! fixed delay, so the UI pacing and the sequencer's suspension points are
//! exercised without any real processing. Identical inputs always yield
//! identical outputs.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

use crate::backend::provider::{BackendError, ClipSimulator};
use crate::core::timeline::GeneratedClips;

pub struct MockSimulator {
    transcript_delay: Duration,
    generate_delay: Duration,
}

impl MockSimulator {
    pub fn new(transcript_delay: Duration, generate_delay: Duration) -> Self {
        Self {
            transcript_delay,
            generate_delay,
        }
    }

    /// Zero-latency simulator for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

/// Lowercases and collapses non-alphanumerics so the download reference is a
/// stable function of the prompt.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[async_trait]
impl ClipSimulator for MockSimulator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_transcript(&self, url: &str) -> Result<String, BackendError> {
        sleep(self.transcript_delay).await;
        Ok(format!(
            "[00:00] Welcome back to the channel. \
             [00:12] Today we're taking a close look at {url}. \
             [01:05] Here's the part everyone has been asking about. \
             [02:40] Let me know what you think in the comments."
        ))
    }

    async fn generate_clips(
        &self,
        prompt: &str,
        _transcript: &str,
    ) -> Result<GeneratedClips, BackendError> {
        sleep(self.generate_delay).await;
        Ok(GeneratedClips {
            download_ref: format!("clips/{}.zip", slug(prompt)),
            clip_titles: vec![
                format!("{prompt} — the hook"),
                format!("{prompt} — the key moment"),
                format!("{prompt} — the payoff"),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transcript_is_deterministic() {
        let sim = MockSimulator::instant();
        let a = sim.fetch_transcript("https://youtu.be/xyz").await.unwrap();
        let b = sim.fetch_transcript("https://youtu.be/xyz").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains("https://youtu.be/xyz"));
    }

    #[tokio::test]
    async fn test_clips_are_deterministic() {
        let sim = MockSimulator::instant();
        let a = sim.generate_clips("Make it punchy", "t").await.unwrap();
        let b = sim.generate_clips("Make it punchy", "t").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_clips_shape() {
        let sim = MockSimulator::instant();
        let clips = sim
            .generate_clips("Create a clip about AI", "transcript")
            .await
            .unwrap();
        assert_eq!(clips.clip_titles.len(), 3);
        assert!(clips.clip_titles.iter().all(|t| t.contains("Create a clip about AI")));
        assert_eq!(clips.download_ref, "clips/create-a-clip-about-ai.zip");
    }

    #[test]
    fn test_slug_collapses_punctuation() {
        assert_eq!(slug("Make it... PUNCHY!"), "make-it-punchy");
        assert_eq!(slug("  spaced  out  "), "spaced-out");
    }
}
