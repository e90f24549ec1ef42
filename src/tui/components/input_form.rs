//! The submission form: a URL field and a prompt field.
//!
//! The form is deliberately dumb. It edits two buffers, moves focus with
//! Tab and emits a single `FormEvent::Submit` on Enter; whether a submission
//! is actually admitted (non-blank fields, no run in flight) is decided by
//! the core reducer, not here. While a run is in flight the form renders
//! dimmed as a visual cue.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Prompt,
}

/// High-level events emitted by the form.
pub enum FormEvent {
    Submit { url: String, prompt: String },
    Changed,
}

pub struct InputForm {
    pub url: String,
    pub prompt: String,
    pub focus: Field,
    /// Set by the event loop while a run is in flight.
    pub dimmed: bool,
    /// Cursor position computed during the last render.
    cursor: Option<Position>,
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm {
    pub fn new() -> Self {
        InputForm {
            url: String::new(),
            prompt: String::new(),
            focus: Field::Url,
            dimmed: false,
            cursor: None,
        }
    }

    pub fn clear(&mut self) {
        self.url.clear();
        self.prompt.clear();
        self.focus = Field::Url;
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            Field::Url => &mut self.url,
            Field::Prompt => &mut self.prompt,
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        text: &str,
        focused: bool,
    ) -> Option<Position> {
        let border_style = if self.dimmed {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let visible = visible_tail(text, inner_width.saturating_sub(1));

        let field = Paragraph::new(visible.clone())
            .block(Block::bordered().title(title).border_style(border_style));
        frame.render_widget(field, area);

        if focused && !self.dimmed {
            let x = area.x + 1 + visible.width() as u16;
            let y = area.y + 1;
            return Some(Position::new(x, y));
        }
        None
    }
}

/// The trailing slice of `text` that fits in `width` display columns, so the
/// end of a long URL stays visible while typing.
fn visible_tail(text: &str, width: usize) -> String {
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0usize;
    for c in text.chars().rev() {
        let w = UnicodeWidthStr::width(c.to_string().as_str());
        if used + w > width {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.iter().rev().collect()
}

impl EventHandler for InputForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.focused_buffer().push(*c);
                Some(FormEvent::Changed)
            }
            TuiEvent::Paste(data) => {
                // The fields are single-line; flatten pasted newlines.
                let flat: String = data.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.focused_buffer().push_str(&flat);
                Some(FormEvent::Changed)
            }
            TuiEvent::Backspace => {
                self.focused_buffer().pop();
                Some(FormEvent::Changed)
            }
            TuiEvent::SwitchField => {
                self.focus = match self.focus {
                    Field::Url => Field::Prompt,
                    Field::Prompt => Field::Url,
                };
                None
            }
            TuiEvent::Submit => Some(FormEvent::Submit {
                url: self.url.clone(),
                prompt: self.prompt.clone(),
            }),
            _ => None,
        }
    }
}

impl Component for InputForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::Length;
        let [url_area, prompt_area] = Layout::vertical([Length(3), Length(3)]).areas(area);

        let url_cursor =
            self.render_field(frame, url_area, "Video URL", &self.url, self.focus == Field::Url);
        let prompt_cursor = self.render_field(
            frame,
            prompt_area,
            "Prompt",
            &self.prompt,
            self.focus == Field::Prompt,
        );

        self.cursor = url_cursor.or(prompt_cursor);
        if let Some(position) = self.cursor {
            frame.set_cursor_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = InputForm::new();
        form.handle_event(&TuiEvent::InputChar('h'));
        form.handle_event(&TuiEvent::SwitchField);
        form.handle_event(&TuiEvent::InputChar('p'));
        assert_eq!(form.url, "h");
        assert_eq!(form.prompt, "p");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = InputForm::new();
        assert_eq!(form.focus, Field::Url);
        form.handle_event(&TuiEvent::SwitchField);
        assert_eq!(form.focus, Field::Prompt);
        form.handle_event(&TuiEvent::SwitchField);
        assert_eq!(form.focus, Field::Url);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut form = InputForm::new();
        form.handle_event(&TuiEvent::Paste("https://youtu.be/\nabc123".to_string()));
        assert_eq!(form.url, "https://youtu.be/abc123");
    }

    #[test]
    fn test_submit_emits_both_fields() {
        let mut form = InputForm::new();
        form.url = "https://youtu.be/abc123".to_string();
        form.prompt = "clip it".to_string();
        match form.handle_event(&TuiEvent::Submit) {
            Some(FormEvent::Submit { url, prompt }) => {
                assert_eq!(url, "https://youtu.be/abc123");
                assert_eq!(prompt, "clip it");
            }
            _ => panic!("expected submit event"),
        }
    }

    #[test]
    fn test_visible_tail_keeps_end_of_long_text() {
        assert_eq!(visible_tail("abcdef", 3), "def");
        assert_eq!(visible_tail("ab", 5), "ab");
        assert_eq!(visible_tail("", 5), "");
    }
}
