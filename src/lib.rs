//! Clipchat library exports for testing

use clap::ValueEnum;

pub mod agent;
pub mod backend;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum BackendKind {
    /// Fetch real video metadata through the oEmbed relay.
    #[default]
    Oembed,
    /// Simulate transcript extraction and clip generation locally.
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Oembed => "oembed",
            BackendKind::Mock => "mock",
        }
    }
}
