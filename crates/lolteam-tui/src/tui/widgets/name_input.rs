// Name input widget: the field new member names are typed into.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let editing = state.mode == InputMode::EditingName;
    let full = state.snapshot.roster_full;

    let border_color = if editing { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(input_title(editing, full));

    let line = if state.name_input.is_empty() && !editing {
        Line::from(Span::styled(
            " Press 'a' to add a member",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(state.name_input.clone(), Style::default().fg(Color::White)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    // Cursor after the typed text, inside the border.
    if editing && area.width > 3 && area.height > 2 {
        let typed = state.name_input.chars().count() as u16;
        let x = (area.x + 2 + typed).min(area.x + area.width - 2);
        frame.set_cursor_position((x, area.y + 1));
    }
}

pub fn input_title(editing: bool, roster_full: bool) -> &'static str {
    match (editing, roster_full) {
        (_, true) => "Member name (team is full)",
        (true, false) => "Member name (Enter to add, Esc to finish)",
        (false, false) => "Member name",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_reflects_mode_and_capacity() {
        assert_eq!(input_title(false, false), "Member name");
        assert_eq!(input_title(true, false), "Member name (Enter to add, Esc to finish)");
        assert_eq!(input_title(true, true), "Member name (team is full)");
    }

    #[test]
    fn render_shows_typed_text() {
        let backend = ratatui::backend::TestBackend::new(60, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.mode = InputMode::EditingName;
        state.name_input = "Faker".into();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Faker"));
    }

    #[test]
    fn render_handles_long_names() {
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.mode = InputMode::EditingName;
        state.name_input = "a very long summoner name".into();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
