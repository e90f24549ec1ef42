//! oEmbed metadata fetcher.
//!
//! The lookup goes through a relay (a plain GET passthrough) because the
//! oEmbed endpoint is not reachable from every calling context. The relay
//! receives the fully-formed oEmbed URL as its `url` query parameter and
//! returns the endpoint's JSON body unchanged.
//!
//! One request, no retry, no caching. Every failure mode maps to an explicit
//! [`FetchError`] so the log keeps "unreachable" and "garbage response"
//! distinguishable even though the user sees a single message for both.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Duration;

use crate::backend::provider::{FetchError, MetadataFetcher};
use crate::core::timeline::VideoMetadata;

pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/raw";

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Keeps a lookup that never resolves from holding the `busy` gate forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The oEmbed document is treated as opaque; only these fields are consumed.
#[derive(Deserialize, Debug)]
struct OembedResponse {
    title: String,
    author_name: String,
    #[serde(default)]
    author_url: String,
    thumbnail_url: String,
}

/// Relay-addressed oEmbed lookup.
pub struct OembedFetcher {
    relay_url: String,
    client: reqwest::Client,
}

impl OembedFetcher {
    pub fn new(relay_url: Option<String>) -> Self {
        let env_url = std::env::var("CLIPCHAT_RELAY_URL").ok();
        let final_url = relay_url
            .or(env_url)
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

        Self {
            relay_url: final_url,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("reqwest client with static configuration"),
        }
    }

    /// The oEmbed URL handed to the relay, before encoding.
    fn oembed_url(video_url: &str) -> String {
        format!("{OEMBED_ENDPOINT}?url={video_url}&format=json")
    }
}

#[async_trait]
impl MetadataFetcher for OembedFetcher {
    fn name(&self) -> &str {
        "oembed"
    }

    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError> {
        let lookup = Self::oembed_url(url);
        info!("oEmbed lookup via relay {}: {lookup}", self.relay_url);

        let response = self
            .client
            .get(&self.relay_url)
            .query(&[("url", lookup.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Relay response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("oEmbed lookup for {url} failed with HTTP {status}");
            return Err(FetchError::Status(status));
        }

        let body: OembedResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        info!("Resolved metadata: \"{}\" by {}", body.title, body.author_name);
        Ok(VideoMetadata {
            title: body.title,
            author_name: body.author_name,
            thumbnail_url: body.thumbnail_url,
            source_url: body.author_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oembed_url_shape() {
        let lookup = OembedFetcher::oembed_url("https://youtu.be/xyz");
        assert_eq!(
            lookup,
            "https://www.youtube.com/oembed?url=https://youtu.be/xyz&format=json"
        );
    }

    #[test]
    fn test_relay_override_wins_over_default() {
        let fetcher = OembedFetcher::new(Some("http://localhost:9999".to_string()));
        assert_eq!(fetcher.relay_url, "http://localhost:9999");
    }
}
