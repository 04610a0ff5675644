// Team state: members, roster turn order, and the champion assignment flow.

pub mod assignment;
pub mod member;
pub mod roster;

use thiserror::Error;

/// Validation failures for team operations.
///
/// The `Display` text is what the user sees in the notification line. Every
/// variant means the operation was aborted without changing any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamError {
    #[error("Please enter a name for the team member.")]
    EmptyName,

    #[error("The team already has {max} members. No more can be added.")]
    RosterFull { max: usize },

    #[error("No team member at position {index} (team has {len}).")]
    NoSuchMember { index: usize, len: usize },

    #[error("Add members to the team before shuffling the order.")]
    NothingToShuffle,

    #[error("Add members to the team before saving.")]
    EmptyRoster,

    #[error("Assign champions to every member before saving.")]
    IncompleteAssignments,

    #[error("The champion list is still loading.")]
    PoolNotLoaded,

    #[error("Every champion in the pool is already taken.")]
    NoChampionsAvailable,

    #[error("No champion selection is open.")]
    NoSelectionOpen,

    #[error("{0} is not one of the offered champions.")]
    NotACandidate(String),
}
