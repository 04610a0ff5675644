// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +--------------------------------------------------+
// | Name Input (3 rows)                              |
// +--------------------------------------------------+
// | Team Table (fill)                                |
// |                                                  |
// +--------------------------------------------------+
// | Notification (1 row)                             |
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+
//
// The champion picker and the quit dialog are overlays centered on the whole
// screen, so they have no zone here.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Pool status, member count, last export.
    pub status_bar: Rect,
    /// Text field for new member names.
    pub name_input: Rect,
    /// The roster in pick order.
    pub team: Rect,
    /// Transient message line.
    pub notification: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // name input
            Constraint::Min(7),    // team table: borders + header + 5 rows
            Constraint::Length(1), // notification
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        name_input: vertical[1],
        team: vertical[2],
        notification: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
