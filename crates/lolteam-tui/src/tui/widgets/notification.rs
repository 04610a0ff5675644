// Notification line: the most recent notice until it expires.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lolteam_core::protocol::NoticeLevel;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(active) = &state.notification else {
        return;
    };
    let notice = &active.notice;
    let color = level_color(notice.level);
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", level_tag(notice.level)),
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", notice.message), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Warning => Color::Yellow,
    }
}

fn level_tag(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "OK",
        NoticeLevel::Info => "INFO",
        NoticeLevel::Warning => "WARN",
    }
}
