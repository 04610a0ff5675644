// Team member and in-game role.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lane role a member plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// All roles in selector order.
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    pub fn display_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Adc => "adc",
            Role::Support => "support",
        }
    }

    /// The next role in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Role::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Role::ALL[(idx + 1) % Role::ALL.len()]
    }

    /// The previous role in selector order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Role::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Role::ALL[(idx + Role::ALL.len() - 1) % Role::ALL.len()]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A registered team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Set only through the assignment flow, always together with `role`.
    pub champion: Option<String>,
    pub role: Option<Role>,
    /// 1-based pick order, unique within the roster.
    pub order: u32,
}

impl Member {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Member {
            name: name.into(),
            champion: None,
            role: None,
            order,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.champion.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
