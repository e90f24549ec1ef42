//! Embeddable-ID derivation.
//!
//! A watch URL carries the video ID either as a `v=` query parameter
//! (`youtube.com/watch?v=abc123`) or as the final path segment in the
//! short-link styles (`youtu.be/abc123`, `youtube.com/shorts/abc123`).
//!
//! Derivation runs against the URL the user submitted first; the oEmbed
//! response's `author_url` is only consulted as a fallback, since that field
//! conventionally points at the channel rather than the video. A `None` here
//! is non-fatal: the result card shows the static thumbnail instead of an
//! embedded player reference.

/// Path segments that can never be a video ID.
const RESERVED_SEGMENTS: &[&str] = &["watch", "shorts", "playlist", "oembed", "embed"];

/// Derives the embeddable video ID from a URL, or `None` when no plausible
/// ID is present.
pub fn embed_id(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Scheme and fragment are irrelevant to the ID.
    let without_scheme = trimmed
        .split_once("//")
        .map_or(trimmed, |(_, rest)| rest);
    let without_fragment = without_scheme
        .split_once('#')
        .map_or(without_scheme, |(head, _)| head);

    let (location, query) = match without_fragment.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (without_fragment, None),
    };

    // Primary form: a v= query parameter.
    if let Some(query) = query {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("v=")
                && !value.is_empty()
            {
                return Some(value.to_string());
            }
        }
    }

    // Short-link form: the final path segment.
    let mut segments = location.split('/');
    let _host = segments.next()?;
    let last = segments.filter(|s| !s.is_empty()).next_back()?;
    if RESERVED_SEGMENTS.contains(&last) || last.starts_with('@') {
        return None;
    }
    Some(last.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Macro to generate derivation test cases.
    /// $name:ident names the test, $input:expr is the URL, $expected:expr is
    /// the expected `Option<&str>` result.
    macro_rules! test_embed_id {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(embed_id($input).as_deref(), $expected);
                }
            )+
        };
    }

    test_embed_id! {
        test_embed_id_watch_query: "https://www.youtube.com/watch?v=dQw4w9WgXcQ" => Some("dQw4w9WgXcQ"),
        test_embed_id_watch_query_with_extras: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtm" => Some("dQw4w9WgXcQ"),
        test_embed_id_short_link: "https://youtu.be/abc123" => Some("abc123"),
        test_embed_id_short_link_with_timestamp: "https://youtu.be/abc123?t=30" => Some("abc123"),
        test_embed_id_shorts: "https://www.youtube.com/shorts/abc123def45" => Some("abc123def45"),
        test_embed_id_no_scheme: "youtu.be/abc123" => Some("abc123"),
        test_embed_id_trailing_slash: "https://youtu.be/abc123/" => Some("abc123"),
        test_embed_id_fragment_stripped: "https://youtu.be/abc123#t=1" => Some("abc123"),
        test_embed_id_bare_host: "https://www.youtube.com/" => None,
        test_embed_id_bare_watch: "https://www.youtube.com/watch" => None,
        test_embed_id_channel_handle: "https://www.youtube.com/@somechannel" => None,
        test_embed_id_empty_v_param: "https://www.youtube.com/watch?v=" => None,
        test_embed_id_blank_input: "   " => None,
    }
}
