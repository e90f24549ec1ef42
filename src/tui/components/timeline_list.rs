//! Scrollable rendering of the conversation timeline.
//!
//! Every entry is turned into a card through one lookup on its `RenderTag`;
//! there are no per-entry renderer functions. The whole list is rebuilt on
//! each draw, which is cheap at the scale of a single conversation.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::timeline::{Entry, Payload, RenderTag, Role, Timeline};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Visual treatment for one render tag. The closed set of tags maps to a
/// closed set of these.
struct CardStyle {
    color: Color,
    icon: Option<&'static str>,
    bordered: bool,
    underlined: bool,
}

/// The single dispatch point from tag to presentation.
fn card_style(tag: RenderTag) -> CardStyle {
    match tag {
        RenderTag::Plain => CardStyle {
            color: Color::Gray,
            icon: None,
            bordered: false,
            underlined: false,
        },
        RenderTag::Icon => CardStyle {
            color: Color::Gray,
            icon: Some("◆ "),
            bordered: false,
            underlined: false,
        },
        RenderTag::Link => CardStyle {
            color: Color::Blue,
            icon: Some("⇅ "),
            bordered: false,
            underlined: true,
        },
        RenderTag::ResultCard => CardStyle {
            color: Color::Green,
            icon: None,
            bordered: true,
            underlined: false,
        },
    }
}

/// Scroll state for the timeline viewport.
pub struct TimelineListState {
    pub scroll_offset: u16,
    /// Keep the latest entry visible as new ones arrive. Any manual scroll
    /// up releases the stick; scrolling past the end re-engages it.
    pub stick_to_bottom: bool,
    viewport_height: u16,
    total_height: u16,
}

impl Default for TimelineListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineListState {
    pub fn new() -> Self {
        TimelineListState {
            scroll_offset: 0,
            stick_to_bottom: true,
            viewport_height: 0,
            total_height: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll_offset) + delta)
            .clamp(0, i32::from(self.max_scroll())) as u16;
        self.scroll_offset = target;
        self.stick_to_bottom = target >= self.max_scroll();
    }

    /// Render the timeline into `area`, newest entries at the bottom.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, timeline: &Timeline) {
        self.viewport_height = area.height;
        let width = area.width;

        let cards: Vec<(Paragraph, u16)> = timeline
            .entries()
            .iter()
            .map(|entry| {
                let card = build_card(entry);
                let height = card.line_count(width) as u16;
                (card, height)
            })
            .collect();

        self.total_height = cards
            .iter()
            .fold(0u16, |acc, (_, h)| acc.saturating_add(*h));
        if self.stick_to_bottom {
            self.scroll_offset = self.max_scroll();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }

        // Lay cards out top to bottom, skipping whatever is scrolled off.
        let viewport_bottom = self.scroll_offset.saturating_add(area.height);
        let mut y = 0u16;
        for (card, height) in cards {
            let top = y;
            let bottom = y.saturating_add(height);
            y = bottom;

            if bottom <= self.scroll_offset || top >= viewport_bottom {
                continue;
            }

            // Partially visible cards are clipped by scrolling the paragraph.
            let visible_top = top.max(self.scroll_offset);
            let visible_height = bottom.min(viewport_bottom) - visible_top;
            let rect = Rect::new(
                area.x,
                area.y + (visible_top - self.scroll_offset),
                width,
                visible_height,
            );
            frame.render_widget(card.scroll((visible_top - top, 0)), rect);
        }
    }
}

impl EventHandler for TimelineListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-i32::from(self.viewport_height.max(1))),
            TuiEvent::ScrollPageDown => self.scroll_by(i32::from(self.viewport_height.max(1))),
            _ => return None,
        }
        Some(())
    }
}

fn build_card(entry: &Entry) -> Paragraph<'_> {
    if entry.role == Role::User {
        return Paragraph::new(entry.display_text.as_str())
            .block(Block::bordered().title("you").border_style(Style::default().fg(Color::Cyan)))
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true });
    }

    let style = card_style(entry.render_tag);
    let mut text_style = Style::default().fg(style.color);
    if style.underlined {
        text_style = text_style.add_modifier(Modifier::UNDERLINED);
    }

    let mut lines: Vec<Line> = Vec::new();
    if !entry.display_text.is_empty() {
        let mut spans = Vec::new();
        if let Some(icon) = style.icon {
            spans.push(Span::styled(icon, Style::default().fg(style.color)));
        }
        spans.push(Span::styled(entry.display_text.clone(), text_style));
        lines.push(Line::from(spans));
    }
    lines.extend(payload_lines(entry.payload.as_ref()));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    if style.bordered {
        paragraph.block(
            Block::bordered()
                .title("clipchat")
                .border_style(Style::default().fg(style.color)),
        )
    } else {
        paragraph
    }
}

fn payload_lines(payload: Option<&Payload>) -> Vec<Line<'static>> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    let detail = Style::default().fg(Color::White);
    let label = Style::default().fg(Color::DarkGray);

    match payload {
        Payload::Video {
            meta,
            embed_id,
            prompt,
        } => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Title: ", label),
                    Span::styled(meta.title.clone(), detail.add_modifier(Modifier::BOLD)),
                ]),
                Line::from(vec![
                    Span::styled("Channel: ", label),
                    Span::styled(meta.author_name.clone(), detail),
                ]),
            ];
            // No embeddable ID means we fall back to the static thumbnail.
            lines.push(match embed_id {
                Some(id) => Line::from(vec![
                    Span::styled("Player: ", label),
                    Span::styled(format!("https://www.youtube.com/embed/{id}"), detail),
                ]),
                None => Line::from(vec![
                    Span::styled("Preview: ", label),
                    Span::styled(meta.thumbnail_url.clone(), detail),
                ]),
            });
            lines.push(Line::from(vec![
                Span::styled("Prompt: ", label),
                Span::styled(prompt.clone(), detail),
            ]));
            lines
        }
        Payload::Clips { clips, prompt } => {
            let mut lines: Vec<Line> = clips
                .clip_titles
                .iter()
                .map(|title| {
                    Line::from(vec![
                        Span::styled("• ", label),
                        Span::styled(title.clone(), detail),
                    ])
                })
                .collect();
            lines.push(Line::from(vec![
                Span::styled("Download: ", label),
                Span::styled(clips.download_ref.clone(), detail),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Prompt: ", label),
                Span::styled(prompt.clone(), detail),
            ]));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline::{GeneratedClips, VideoMetadata};

    #[test]
    fn test_scroll_clamps_at_zero() {
        let mut state = TimelineListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_scrolling_up_releases_stick_to_bottom() {
        let mut state = TimelineListState::new();
        state.total_height = 50;
        state.viewport_height = 10;
        state.scroll_offset = 40;
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollPageDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_video_payload_without_embed_falls_back_to_thumbnail() {
        let payload = Payload::Video {
            meta: VideoMetadata {
                title: "T".to_string(),
                author_name: "A".to_string(),
                thumbnail_url: "https://example.com/thumb.jpg".to_string(),
                source_url: String::new(),
            },
            embed_id: None,
            prompt: "p".to_string(),
        };
        let lines = payload_lines(Some(&payload));
        let rendered: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(rendered.iter().any(|l| l.contains("thumb.jpg")));
        assert!(!rendered.iter().any(|l| l.contains("youtube.com/embed")));
    }

    #[test]
    fn test_render_survives_total_height_past_u16_max() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut timeline = Timeline::new();
        // One line per entry, enough of them to exceed u16::MAX total rows.
        for i in 0..70_000u32 {
            timeline.push(Entry::status(format!("step {i}"), RenderTag::Plain));
        }

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = TimelineListState::new();
        terminal
            .draw(|f| state.render(f, f.area(), &timeline))
            .unwrap();

        assert_eq!(state.total_height, u16::MAX);
        assert!(state.scroll_offset <= state.max_scroll());
    }

    #[test]
    fn test_clips_payload_lists_every_title() {
        let payload = Payload::Clips {
            clips: GeneratedClips {
                download_ref: "clips/x.zip".to_string(),
                clip_titles: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            },
            prompt: "p".to_string(),
        };
        let lines = payload_lines(Some(&payload));
        // 3 titles + download + prompt
        assert_eq!(lines.len(), 5);
    }
}
