// Champion picker overlay.
//
// Centered modal for the member being assigned:
//   Role: [top] jungle mid adc support
//   > Ahri
//     Ashe
//     ...

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use lolteam_core::protocol::SelectionView;
use lolteam_core::team::member::Role;

use super::centered_rect;
use crate::tui::ViewState;

const DIALOG_WIDTH: u16 = 46;
/// Borders, role line, spacer, and room for five candidates.
const DIALOG_HEIGHT: u16 = 10;

/// Render the picker for the open selection, if any.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(selection) = state.selection() else {
        return;
    };

    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" Pick for {} ", selection.member_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(build_lines(selection, state.picker_cursor))
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

fn build_lines<'a>(selection: &SelectionView, cursor: usize) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(selection.candidates.len() + 2);

    let mut role_spans = vec![Span::styled(" Role: ", Style::default().fg(Color::Gray))];
    for role in Role::ALL {
        let style = if role == selection.role {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        role_spans.push(Span::styled(format!(" {} ", role.display_str()), style));
    }
    lines.push(Line::from(role_spans));
    lines.push(Line::from(""));

    for (i, champion) in selection.candidates.iter().enumerate() {
        let line = if i == cursor {
            Line::from(Span::styled(
                format!(" > {}", champion),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                format!("   {}", champion),
                Style::default().fg(Color::White),
            ))
        };
        lines.push(line);
    }
    lines
}

/// Picker content as plain strings (for testing).
pub fn format_picker_text(selection: &SelectionView, cursor: usize) -> Vec<String> {
    build_lines(selection, cursor)
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lolteam_core::protocol::AppSnapshot;

    fn selection() -> SelectionView {
        SelectionView {
            member_index: 0,
            member_name: "Ana".into(),
            candidates: vec!["Ahri".into(), "Ashe".into(), "Azir".into()],
            role: Role::Mid,
        }
    }

    #[test]
    fn text_marks_cursor_and_lists_candidates() {
        let text = format_picker_text(&selection(), 1);
        assert_eq!(text.len(), 5);
        assert_eq!(text[2], "   Ahri");
        assert_eq!(text[3], " > Ashe");
        assert_eq!(text[4], "   Azir");
    }

    #[test]
    fn role_line_lists_every_role() {
        let text = format_picker_text(&selection(), 0);
        assert_eq!(text[0], " Role:  top  jungle  mid  adc  support ");
    }

    #[test]
    fn highlighted_role_matches_selection() {
        let lines = build_lines(&selection(), 0);
        let highlighted: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::Cyan))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec![" mid "]);
    }

    #[test]
    fn render_shows_member_name() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.apply_snapshot(AppSnapshot {
            selection: Some(selection()),
            ..AppSnapshot::default()
        });
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
        assert!(text.contains("Pick for Ana"));
        assert!(text.contains("Azir"));
    }

    #[test]
    fn render_without_selection_draws_nothing() {
        let backend = ratatui::backend::TestBackend::new(40, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .all(|cell| cell.symbol() == " "));
    }
}
