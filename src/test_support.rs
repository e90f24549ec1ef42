//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::backend::provider::{BackendError, ClipSimulator, FetchError, MetadataFetcher};
use crate::core::timeline::{GeneratedClips, VideoMetadata};

/// Metadata as the oEmbed lookup would return it: `source_url` is the
/// channel-shaped `author_url`, not the video.
pub fn sample_metadata() -> VideoMetadata {
    VideoMetadata {
        title: "T".to_string(),
        author_name: "A".to_string(),
        thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
        source_url: "https://www.youtube.com/@somechannel".to_string(),
    }
}

pub fn sample_clips() -> GeneratedClips {
    GeneratedClips {
        download_ref: "clips/sample.zip".to_string(),
        clip_titles: vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
        ],
    }
}

pub fn failed_fetch() -> FetchError {
    FetchError::Status(502)
}

/// A fetcher that always resolves with [`sample_metadata`].
pub struct StaticFetcher;

#[async_trait]
impl MetadataFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, _url: &str) -> Result<VideoMetadata, FetchError> {
        Ok(sample_metadata())
    }
}

/// A simulator whose transcript step always fails.
pub struct FailingSimulator;

#[async_trait]
impl ClipSimulator for FailingSimulator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_transcript(&self, _url: &str) -> Result<String, BackendError> {
        Err(BackendError::Failed("no transcript today".to_string()))
    }

    async fn generate_clips(
        &self,
        _prompt: &str,
        _transcript: &str,
    ) -> Result<GeneratedClips, BackendError> {
        Err(BackendError::Failed("no clips today".to_string()))
    }
}
