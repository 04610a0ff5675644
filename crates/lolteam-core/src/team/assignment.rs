// Champion assignment flow: the modal that binds a champion and role to one
// member.
//
// Idle -> Selecting { member_index, candidates, role } -> Idle
//
// Opening draws a random subset of unassigned champions. Selecting one of
// them writes the champion and role onto the member and advances the turn.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::champions::ChampionPool;

use super::member::Role;
use super::roster::{fisher_yates, Roster};
use super::TeamError;

/// How many champions a selection offers at most.
pub const CANDIDATES_PER_PICK: usize = 5;

/// State of the assignment modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentFlow {
    #[default]
    Idle,
    Selecting {
        member_index: usize,
        candidates: Vec<String>,
        role: Role,
    },
}

/// Result of a successful selection, used for the user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assigned {
    pub member: String,
    pub role: Role,
    pub champion: String,
}

impl Assigned {
    pub fn message(&self) -> String {
        format!("{} is now {} with {}!", self.member, self.role, self.champion)
    }
}

impl AssignmentFlow {
    /// Open a selection for the member at `member_index`.
    ///
    /// Shuffles every unassigned champion and offers the first
    /// `min(CANDIDATES_PER_PICK, available)`. With fewer champions left the
    /// offer is simply smaller; with none left the open is rejected and the
    /// flow stays where it was. The member's current role is preselected.
    /// Returns the offered champions.
    pub fn open_for<R: Rng + ?Sized>(
        &mut self,
        member_index: usize,
        roster: &Roster,
        pool: &ChampionPool,
        rng: &mut R,
    ) -> Result<Vec<String>, TeamError> {
        let member = roster.member(member_index).ok_or(TeamError::NoSuchMember {
            index: member_index,
            len: roster.len(),
        })?;

        let mut available: Vec<String> = pool
            .available(roster)
            .into_iter()
            .map(str::to_string)
            .collect();
        if available.is_empty() {
            return Err(TeamError::NoChampionsAvailable);
        }

        fisher_yates(&mut available, rng);
        available.truncate(CANDIDATES_PER_PICK);
        debug!(
            "Offering {} champions to {}: {:?}",
            available.len(),
            member.name,
            available
        );

        let offered = available.clone();
        *self = AssignmentFlow::Selecting {
            member_index,
            candidates: available,
            role: member.role.unwrap_or_default(),
        };
        Ok(offered)
    }

    /// Change the role carried by an open selection.
    pub fn set_role(&mut self, new_role: Role) -> Result<(), TeamError> {
        match self {
            AssignmentFlow::Selecting { role, .. } => {
                *role = new_role;
                Ok(())
            }
            AssignmentFlow::Idle => Err(TeamError::NoSelectionOpen),
        }
    }

    /// Bind `champion` and `role` to the member this selection is for.
    ///
    /// The champion must be one of the offered candidates. On success the
    /// turn advances and the flow returns to `Idle`; on failure nothing
    /// changes and the selection stays open.
    pub fn select(
        &mut self,
        champion: &str,
        role: Role,
        roster: &mut Roster,
    ) -> Result<Assigned, TeamError> {
        let AssignmentFlow::Selecting {
            member_index,
            candidates,
            ..
        } = self
        else {
            return Err(TeamError::NoSelectionOpen);
        };

        if !candidates.iter().any(|c| c == champion) {
            return Err(TeamError::NotACandidate(champion.to_string()));
        }
        // Another member may have taken it since the offer was drawn.
        let taken_elsewhere = roster
            .members()
            .iter()
            .enumerate()
            .any(|(i, m)| i != *member_index && m.champion.as_deref() == Some(champion));
        if taken_elsewhere {
            return Err(TeamError::NotACandidate(champion.to_string()));
        }

        let member = roster.assign(*member_index, champion, role)?;
        let assigned = Assigned {
            member: member.name.clone(),
            role,
            champion: champion.to_string(),
        };
        roster.advance_turn();
        *self = AssignmentFlow::Idle;
        Ok(assigned)
    }

    /// Close the selection without touching any member.
    pub fn cancel(&mut self) {
        *self = AssignmentFlow::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
