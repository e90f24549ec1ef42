//! # Conversation Timeline
//!
//! The append-only log of chat entries. This is the single source of truth
//! for what the presentation layer displays: it re-renders the whole sequence
//! whenever it changes, and nothing ever mutates or removes an entry once it
//! has been pushed.

/// Who an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    AgentStatus,
    AgentResult,
}

/// The closed set of presentation variants. The TUI dispatches each entry
/// through a single lookup on this tag; there is no per-entry renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTag {
    Plain,
    Icon,
    Link,
    ResultCard,
}

/// Display metadata for a video, as resolved by the oEmbed lookup.
///
/// `source_url` carries the oEmbed response's `author_url` field. It is
/// conventionally a channel URL rather than the video itself, which is why
/// embed-ID derivation prefers the submitted URL and treats this as a
/// fallback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub author_name: String,
    pub thumbnail_url: String,
    pub source_url: String,
}

/// Output of the clip-generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClips {
    pub download_ref: String,
    pub clip_titles: Vec<String>,
}

/// Structured data carried by a result entry. The prompt is kept verbatim so
/// the result card can echo what the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Video {
        meta: VideoMetadata,
        /// `None` means the ID could not be derived; the card falls back to
        /// the thumbnail instead of an embedded player reference.
        embed_id: Option<String>,
        prompt: String,
    },
    Clips {
        clips: GeneratedClips,
        prompt: String,
    },
}

/// One immutable record in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub role: Role,
    pub display_text: String,
    pub render_tag: RenderTag,
    pub payload: Option<Payload>,
}

impl Entry {
    pub fn user(display_text: String) -> Self {
        Entry {
            role: Role::User,
            display_text,
            render_tag: RenderTag::Plain,
            payload: None,
        }
    }

    pub fn status(display_text: impl Into<String>, render_tag: RenderTag) -> Self {
        Entry {
            role: Role::AgentStatus,
            display_text: display_text.into(),
            render_tag,
            payload: None,
        }
    }

    pub fn result(display_text: impl Into<String>, payload: Payload) -> Self {
        Entry {
            role: Role::AgentResult,
            display_text: display_text.into(),
            render_tag: RenderTag::ResultCard,
            payload: Some(payload),
        }
    }
}

/// Greeting shown before the first submission.
const WELCOME: &str =
    "Hi! Paste a video link and tell me what kind of clip you want, and I'll get to work.";

/// Ordered, append-only sequence of entries.
///
/// The backing vec is private on purpose: `push` is the only way in, and the
/// read accessors hand out shared references, so the append-only invariant is
/// enforced by the type rather than by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: Vec<Entry>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Creates a timeline seeded with the welcome entry.
    pub fn new() -> Self {
        Timeline {
            entries: vec![Entry::status(WELCOME, RenderTag::Icon)],
        }
    }

    /// Appends an entry and returns a reference to it.
    pub fn push(&mut self, entry: Entry) -> &Entry {
        self.entries.push(entry);
        self.entries.last().expect("just pushed")
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}
