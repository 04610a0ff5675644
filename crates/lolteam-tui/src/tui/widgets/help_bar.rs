// Help bar: key hints for whatever currently has the keyboard.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (key, action) in hints(state) {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// (key, action) pairs for the active context.
pub fn hints(state: &ViewState) -> &'static [(&'static str, &'static str)] {
    if state.confirm_quit {
        &[("y", "quit"), ("n", "stay")]
    } else if state.selection().is_some() {
        &[
            ("↑↓", "champion"),
            ("←→", "role"),
            ("Enter", "confirm"),
            ("Esc", "cancel"),
        ]
    } else if state.mode == InputMode::EditingName {
        &[("Enter", "add member"), ("Esc", "done")]
    } else {
        &[
            ("a", "add"),
            ("Enter", "assign"),
            ("d", "remove"),
            ("s", "shuffle"),
            ("x", "reset"),
            ("w", "save"),
            ("q", "quit"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lolteam_core::protocol::{AppSnapshot, SelectionView};
    use lolteam_core::team::member::Role;

    fn keys(state: &ViewState) -> Vec<&'static str> {
        hints(state).iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn normal_mode_lists_team_actions() {
        let state = ViewState::default();
        assert_eq!(keys(&state), vec!["a", "Enter", "d", "s", "x", "w", "q"]);
    }

    #[test]
    fn editing_mode_hints() {
        let mut state = ViewState::default();
        state.mode = InputMode::EditingName;
        assert_eq!(keys(&state), vec!["Enter", "Esc"]);
    }

    #[test]
    fn picker_hints_take_priority_over_editing() {
        let mut state = ViewState::default();
        state.mode = InputMode::EditingName;
        state.apply_snapshot(AppSnapshot {
            selection: Some(SelectionView {
                member_index: 0,
                member_name: "Ana".into(),
                candidates: vec!["Ahri".into()],
                role: Role::Top,
            }),
            ..AppSnapshot::default()
        });
        assert_eq!(hints(&state)[1], ("←→", "role"));
    }

    #[test]
    fn quit_dialog_hints_win() {
        let mut state = ViewState::default();
        state.confirm_quit = true;
        assert_eq!(keys(&state), vec!["y", "n"]);
    }

    #[test]
    fn render_does_not_panic_narrow() {
        let backend = ratatui::backend::TestBackend::new(20, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
