// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the
// controller, or into local ViewState changes (cursor movement, typing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use lolteam_core::protocol::UserCommand;

use super::{InputMode, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the
/// controller, `None` when it was handled locally.
///
/// Priority: quit dialog, then the champion picker, then name editing, then
/// normal shortcuts.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. Some platforms emit both Press and
    // Release for each keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.selection().is_some() {
        return handle_picker(key_event, view_state);
    }

    if view_state.mode == InputMode::EditingName {
        return handle_name_input(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('a') | KeyCode::Char('i') => {
            view_state.mode = InputMode::EditingName;
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected_row = view_state.selected_row.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = view_state.snapshot.members.len().saturating_sub(1);
            view_state.selected_row = (view_state.selected_row + 1).min(last);
            None
        }

        KeyCode::Enter | KeyCode::Char('c') => view_state
            .selected_member()
            .map(|m| UserCommand::OpenAssign(m.index)),
        KeyCode::Char('d') | KeyCode::Delete => view_state
            .selected_member()
            .map(|m| UserCommand::RemoveMember(m.index)),

        KeyCode::Char('s') => Some(UserCommand::Shuffle),
        KeyCode::Char('x') => Some(UserCommand::Reset),
        KeyCode::Char('w') => Some(UserCommand::Save),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, anything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Champion picker: move between candidates, cycle the role, pick or cancel.
fn handle_picker(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let selection = view_state.selection()?;
    let role = selection.role;
    let count = selection.candidates.len();

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.picker_cursor = view_state.picker_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.picker_cursor = (view_state.picker_cursor + 1).min(count.saturating_sub(1));
            None
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            Some(UserCommand::SetRole(role.prev()))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            Some(UserCommand::SetRole(role.next()))
        }
        KeyCode::Enter => selection
            .candidates
            .get(view_state.picker_cursor)
            .map(|champion| UserCommand::SelectChampion {
                champion: champion.clone(),
                role,
            }),
        KeyCode::Esc => Some(UserCommand::CancelAssign),
        _ => None,
    }
}

/// Name field: typing, Backspace, Enter submits and keeps editing, Esc leaves.
fn handle_name_input(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            let name = std::mem::take(&mut view_state.name_input);
            Some(UserCommand::AddMember(name))
        }
        KeyCode::Backspace => {
            view_state.name_input.pop();
            None
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view_state.name_input.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
