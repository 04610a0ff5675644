// Team widget: the roster in pick order.
//
// One row per member: turn marker, order, name, role, champion.
// The member whose turn it is gets a yellow marker; the row under the
// cursor is reversed.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use lolteam_core::protocol::MemberRow;
use lolteam_core::team::roster::MAX_MEMBERS;

use crate::tui::ViewState;

/// Render the team table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("#"),
        Cell::from("Member"),
        Cell::from("Role"),
        Cell::from("Champion"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let members = &state.snapshot.members;
    let rows: Vec<Row> = if members.is_empty() {
        vec![Row::new(vec![
            Cell::from(""),
            Cell::from(""),
            Cell::from("No members yet"),
        ])
        .style(Style::default().fg(Color::DarkGray))]
    } else {
        members
            .iter()
            .enumerate()
            .map(|(i, member)| member_row(member, i == state.selected_row))
            .collect()
    };

    let widths = [
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Min(14),
    ];

    let title = format!("Team ({}/{})", members.len(), MAX_MEMBERS);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn member_row<'a>(member: &MemberRow, selected: bool) -> Row<'a> {
    let marker = if member.is_current_turn { "▶" } else { "" };

    let role_cell = match member.role {
        Some(role) => Cell::from(role.display_str()),
        None => Cell::from("No role").style(Style::default().fg(Color::DarkGray)),
    };
    let champion_cell = match &member.champion {
        Some(champion) => Cell::from(champion.clone()).style(Style::default().fg(Color::Green)),
        None => Cell::from("No champion").style(Style::default().fg(Color::DarkGray)),
    };

    let mut style = if member.is_current_turn {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Row::new(vec![
        Cell::from(marker).style(Style::default().fg(Color::Yellow)),
        Cell::from(member.order.to_string()),
        Cell::from(member.name.clone()),
        role_cell,
        champion_cell,
    ])
    .style(style)
}

/// Format a member as a plain string (for testing).
pub fn format_member_text(member: &MemberRow) -> String {
    let role = member.role.map_or("No role", |r| r.display_str());
    let champion = member.champion.as_deref().unwrap_or("No champion");
    let marker = if member.is_current_turn { "> " } else { "" };
    format!("{}{}. {} - {} - {}", marker, member.order, member.name, role, champion)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
