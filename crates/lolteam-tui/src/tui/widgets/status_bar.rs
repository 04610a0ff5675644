// Status bar widget: champion pool state, roster size, last export.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lolteam_core::protocol::PoolStatus;
use lolteam_core::team::roster::MAX_MEMBERS;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [pool indicator] [member counter] [last export]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let mut spans = Vec::new();

    let (dot, dot_color) = pool_indicator(snapshot.pool_status);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));
    spans.push(Span::styled(
        pool_label(snapshot.pool_status, snapshot.available_champions),
        Style::default().fg(Color::White),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    let counter_style = if snapshot.roster_full {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(
        member_counter(snapshot.members.len()),
        counter_style,
    ));

    if let Some(path) = &snapshot.last_export {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("Saved: {}", path),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the pool dot character and its color.
pub fn pool_indicator(status: PoolStatus) -> (&'static str, Color) {
    match status {
        PoolStatus::Loading => ("●", Color::Gray),
        PoolStatus::Loaded { .. } => ("●", Color::Green),
        PoolStatus::Fallback { .. } => ("●", Color::Yellow),
    }
}

pub fn pool_label(status: PoolStatus, available: usize) -> String {
    match status {
        PoolStatus::Loading => "Loading champions...".to_string(),
        PoolStatus::Loaded { count } => format!("Champions {}/{}", available, count),
        PoolStatus::Fallback { count } => {
            format!("Champions {}/{} (built-in list)", available, count)
        }
    }
}

pub fn member_counter(len: usize) -> String {
    format!("Members {}/{}", len, MAX_MEMBERS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
