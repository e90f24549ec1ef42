//! Backend collaborators of the agent sequencer: the real oEmbed metadata
//! fetcher, the deterministic mock simulator, and embed-ID derivation.

pub mod embed;
pub mod mock;
pub mod oembed;
pub mod provider;

pub use mock::MockSimulator;
pub use oembed::OembedFetcher;
pub use provider::{BackendError, ClipSimulator, FetchError, MetadataFetcher};
