use std::fmt;

use async_trait::async_trait;

use crate::core::timeline::{GeneratedClips, VideoMetadata};

/// Errors from the metadata lookup. All three collapse to the same
/// user-visible message, but keeping them distinct means the log can tell
/// "service unreachable" apart from "garbage response".
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The relay answered with a non-success status code.
    Status(u16),
    /// The response body did not parse as an oEmbed document.
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status(code) => write!(f, "lookup failed with HTTP {code}"),
            FetchError::Malformed(msg) => write!(f, "malformed oEmbed response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Errors from the simulated transcript/clip pipeline.
#[derive(Debug)]
pub enum BackendError {
    Failed(String),
    /// A simulator call exceeded the sequencer's deadline. Without this the
    /// `busy` gate would stay held forever on a call that never resolves.
    Timeout,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Failed(msg) => write!(f, "backend failure: {msg}"),
            BackendError::Timeout => write!(f, "backend call timed out"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Resolves display metadata for a video URL.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Returns the name of the fetcher.
    fn name(&self) -> &str;

    /// One lookup, no retry, no caching.
    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError>;
}

/// Stands in for transcript extraction and clip generation.
#[async_trait]
pub trait ClipSimulator: Send + Sync {
    /// Returns the name of the simulator.
    fn name(&self) -> &str;

    async fn fetch_transcript(&self, url: &str) -> Result<String, BackendError>;

    async fn generate_clips(
        &self,
        prompt: &str,
        transcript: &str,
    ) -> Result<GeneratedClips, BackendError>;
}
