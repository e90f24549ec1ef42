use crate::core::state::Session;
use crate::tui::TuiState;
use crate::tui::component::Component;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(6)]);
    let [title_area, timeline_area, form_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if session.busy {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        format!("Clipchat {spinner} {}", session.status_message)
    } else {
        format!("Clipchat | {}", session.status_message)
    };
    frame.render_widget(
        Span::styled(title_text, Style::default().fg(Color::White)),
        title_area,
    );

    tui.timeline_list.render(frame, timeline_area, &session.timeline);
    tui.form.render(frame, form_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_ui_smoke() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let session = Session::new();
        let mut tui = TuiState::new();
        terminal
            .draw(|f| {
                draw_ui(f, &session, &mut tui, 0);
            })
            .unwrap();
    }

    #[test]
    fn test_draw_ui_while_busy() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut session = Session::new();
        session.busy = true;
        let mut tui = TuiState::new();
        tui.form.dimmed = true;
        terminal
            .draw(|f| {
                draw_ui(f, &session, &mut tui, 3);
            })
            .unwrap();
    }
}
