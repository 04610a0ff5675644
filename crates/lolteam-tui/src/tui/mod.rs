// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI keeps the latest `AppSnapshot` from the controller plus a little
// local state (input mode, cursors, the visible notification). Every render
// tick redraws the whole frame from that state.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use lolteam_core::protocol::{AppSnapshot, MemberRow, Notice, SelectionView, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Where keystrokes go outside of overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are shortcuts.
    Normal,
    /// Keys are typed into the member name field.
    EditingName,
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotice {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// TUI-local state for rendering.
pub struct ViewState {
    /// Latest state pushed by the controller.
    pub snapshot: AppSnapshot,
    pub mode: InputMode,
    pub name_input: String,
    /// Highlighted row in the team table (index into `snapshot.members`).
    pub selected_row: usize,
    /// Highlighted candidate in the champion picker.
    pub picker_cursor: usize,
    pub notification: Option<ActiveNotice>,
    pub notification_ttl: Duration,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            mode: InputMode::Normal,
            name_input: String::new(),
            selected_row: 0,
            picker_cursor: 0,
            notification: None,
            notification_ttl: Duration::from_millis(3000),
            confirm_quit: false,
        }
    }
}

impl ViewState {
    pub fn with_notification_ttl(ttl: Duration) -> Self {
        ViewState {
            notification_ttl: ttl,
            ..ViewState::default()
        }
    }

    /// Replace the snapshot, keeping local cursors in range. The picker
    /// cursor restarts at the top whenever a different selection opens.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let reopened = match (&self.snapshot.selection, &snapshot.selection) {
            (Some(old), Some(new)) => {
                old.member_index != new.member_index || old.candidates != new.candidates
            }
            (None, Some(_)) => true,
            _ => false,
        };
        if reopened {
            self.picker_cursor = 0;
        }
        self.snapshot = snapshot;

        self.selected_row = self
            .selected_row
            .min(self.snapshot.members.len().saturating_sub(1));
        if let Some(sel) = &self.snapshot.selection {
            self.picker_cursor = self.picker_cursor.min(sel.candidates.len().saturating_sub(1));
        }
    }

    pub fn show_notice(&mut self, notice: Notice, now: Instant) {
        self.notification = Some(ActiveNotice {
            notice,
            expires_at: now + self.notification_ttl,
        });
    }

    /// Drop the notification once its time is up.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now >= n.expires_at)
        {
            self.notification = None;
        }
    }

    pub fn selected_member(&self) -> Option<&MemberRow> {
        self.snapshot.members.get(self.selected_row)
    }

    pub fn selection(&self) -> Option<&SelectionView> {
        self.snapshot.selection.as_ref()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate, now: Instant) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Notify(notice) => {
            state.show_notice(notice, now);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::name_input::render(frame, layout.name_input, state);
    widgets::team::render(frame, layout.team, state);
    widgets::notification::render(frame, layout.notification, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    // Overlays last, so they draw on top.
    if state.selection().is_some() {
        widgets::picker::render(frame, frame.area(), state);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the controller goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    notification_ttl: Duration,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default panic output.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::with_notification_ttl(notification_ttl);
    let mut event_stream = EventStream::new();

    // 3. Render at ~30fps
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 4. Main loop
    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update, Instant::now()),
                    // Controller is gone.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.expire_notification(Instant::now());
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    // 5. Restore terminal
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lolteam_core::protocol::{NoticeLevel, PoolStatus};
    use lolteam_core::team::member::Role;

    pub(crate) fn row(index: usize, name: &str, order: u32) -> MemberRow {
        MemberRow {
            index,
            name: name.to_string(),
            champion: None,
            role: None,
            order,
            is_current_turn: false,
        }
    }

    fn selection(member_index: usize, candidates: &[&str]) -> SelectionView {
        SelectionView {
            member_index,
            member_name: "Ana".into(),
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
            role: Role::Top,
        }
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.snapshot.members.is_empty());
        assert_eq!(state.mode, InputMode::Normal);
        assert!(state.name_input.is_empty());
        assert_eq!(state.selected_row, 0);
        assert!(state.notification.is_none());
        assert!(!state.confirm_quit);
        assert_eq!(state.snapshot.pool_status, PoolStatus::Loading);
    }

    #[test]
    fn apply_snapshot_clamps_selected_row() {
        let mut state = ViewState::default();
        state.selected_row = 4;
        state.apply_snapshot(AppSnapshot {
            members: vec![row(0, "A", 1), row(1, "B", 2)],
            ..AppSnapshot::default()
        });
        assert_eq!(state.selected_row, 1);

        state.apply_snapshot(AppSnapshot::default());
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn picker_cursor_resets_when_selection_opens() {
        let mut state = ViewState::default();
        state.picker_cursor = 3;
        state.apply_snapshot(AppSnapshot {
            members: vec![row(0, "Ana", 1)],
            selection: Some(selection(0, &["Ahri", "Ashe", "Azir", "Bard"])),
            ..AppSnapshot::default()
        });
        assert_eq!(state.picker_cursor, 0);
    }

    #[test]
    fn picker_cursor_kept_across_role_changes() {
        let mut state = ViewState::default();
        let mut snap = AppSnapshot {
            members: vec![row(0, "Ana", 1)],
            selection: Some(selection(0, &["Ahri", "Ashe", "Azir"])),
            ..AppSnapshot::default()
        };
        state.apply_snapshot(snap.clone());
        state.picker_cursor = 2;

        if let Some(sel) = snap.selection.as_mut() {
            sel.role = Role::Mid;
        }
        state.apply_snapshot(snap);
        assert_eq!(state.picker_cursor, 2);
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut state = ViewState::with_notification_ttl(Duration::from_millis(3000));
        let now = Instant::now();
        apply_ui_update(&mut state, UiUpdate::Notify(Notice::info("hello")), now);
        assert_eq!(
            state.notification.as_ref().unwrap().notice.level,
            NoticeLevel::Info
        );

        state.expire_notification(now + Duration::from_millis(2999));
        assert!(state.notification.is_some());
        state.expire_notification(now + Duration::from_millis(3000));
        assert!(state.notification.is_none());
    }

    #[test]
    fn newer_notification_replaces_older() {
        let mut state = ViewState::default();
        let now = Instant::now();
        state.show_notice(Notice::info("first"), now);
        state.show_notice(Notice::warning("second"), now + Duration::from_millis(10));
        let active = state.notification.unwrap();
        assert_eq!(active.notice.message, "second");
        assert_eq!(active.expires_at, now + Duration::from_millis(3010));
    }

    #[test]
    fn render_frame_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.apply_snapshot(AppSnapshot {
            members: vec![row(0, "Ana", 1)],
            selection: Some(selection(0, &["Ahri"])),
            ..AppSnapshot::default()
        });
        state.confirm_quit = true;
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
