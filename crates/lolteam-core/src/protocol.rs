// Messages exchanged between the controller task and the TUI.

use crate::team::member::Role;

/// Commands sent from the TUI to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    AddMember(String),
    /// Remove by roster index.
    RemoveMember(usize),
    Shuffle,
    Reset,
    Save,
    /// Open (or reopen) the champion selection for a roster index.
    OpenAssign(usize),
    SetRole(Role),
    SelectChampion {
        champion: String,
        role: Role,
    },
    CancelAssign,
    Quit,
}

/// Updates pushed from the controller to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Full state to render from. Replaces whatever the TUI had.
    StateSnapshot(Box<AppSnapshot>),
    /// One-shot transient message.
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Where the champion pool stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolStatus {
    #[default]
    Loading,
    Loaded { count: usize },
    /// The configured source failed; the built-in list is in use.
    Fallback { count: usize },
}

/// One roster line as the TUI shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    /// Roster index, used when sending commands back.
    pub index: usize,
    pub name: String,
    pub champion: Option<String>,
    pub role: Option<Role>,
    pub order: u32,
    pub is_current_turn: bool,
}

/// The open champion selection, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub member_index: usize,
    pub member_name: String,
    pub candidates: Vec<String>,
    pub role: Role,
}

/// Everything the TUI needs to draw a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Sorted by `order`.
    pub members: Vec<MemberRow>,
    pub roster_full: bool,
    pub selection: Option<SelectionView>,
    pub pool_status: PoolStatus,
    /// Pool champions not held by any member.
    pub available_champions: usize,
    /// Path of the most recent export this session.
    pub last_export: Option<String>,
}
