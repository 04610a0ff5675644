// Roster of team members, pick order, and the turn cursor.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::member::{Member, Role};
use super::TeamError;

/// Hard cap on team size.
pub const MAX_MEMBERS: usize = 5;

/// The team roster together with its turn cursor.
///
/// All structural changes (add, remove, shuffle) re-derive `order` from the
/// member's position, so `order` is always a contiguous `1..=N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Member>,
    /// Index into the order-sorted view of `members`.
    turn_cursor: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_MEMBERS
    }

    pub fn turn_cursor(&self) -> usize {
        self.turn_cursor
    }

    /// Append a new unassigned member at the end of the pick order.
    ///
    /// The name is trimmed; an empty result or a full roster is rejected.
    /// Returns the new member's index.
    pub fn add_member(&mut self, name: &str) -> Result<usize, TeamError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TeamError::EmptyName);
        }
        if self.is_full() {
            return Err(TeamError::RosterFull { max: MAX_MEMBERS });
        }
        let order = self.members.len() as u32 + 1;
        self.members.push(Member::new(name, order));
        Ok(self.members.len() - 1)
    }

    /// Remove the member at `index` and renumber the rest.
    pub fn remove_member(&mut self, index: usize) -> Result<Member, TeamError> {
        self.check_index(index)?;
        let removed = self.members.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Randomize the pick order in place and restart the turn at the top.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), TeamError> {
        if self.members.is_empty() {
            return Err(TeamError::NothingToShuffle);
        }
        fisher_yates(&mut self.members, rng);
        self.renumber();
        self.turn_cursor = 0;
        Ok(())
    }

    /// Drop every member and restart the turn cursor.
    pub fn reset(&mut self) {
        self.members.clear();
        self.turn_cursor = 0;
    }

    /// Bind a champion and role to a member.
    ///
    /// Uniqueness of the champion across the roster is the caller's concern;
    /// the assignment flow only offers unassigned champions.
    pub(crate) fn assign(
        &mut self,
        index: usize,
        champion: &str,
        role: Role,
    ) -> Result<&Member, TeamError> {
        self.check_index(index)?;
        let member = &mut self.members[index];
        member.champion = Some(champion.to_string());
        member.role = Some(role);
        Ok(member)
    }

    /// Member indices sorted by `order`. The turn cursor indexes this view.
    pub fn by_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.members.len()).collect();
        indices.sort_by_key(|&i| self.members[i].order);
        indices
    }

    /// Move the cursor to the next unassigned member after the current one.
    ///
    /// Scans the order-sorted view for the first position strictly after the
    /// cursor whose member has no champion. When there is none the cursor goes
    /// back to 0; [`Roster::current_turn`] then reports no active turn unless
    /// the first member is still unassigned.
    pub fn advance_turn(&mut self) {
        let sorted = self.by_order();
        let next = sorted
            .iter()
            .enumerate()
            .find(|&(pos, &idx)| pos > self.turn_cursor && !self.members[idx].is_assigned())
            .map(|(pos, _)| pos);
        self.turn_cursor = next.unwrap_or(0);
    }

    /// Index (into `members`) of the member whose turn it is, if any.
    ///
    /// A member is current only if they sit at the cursor position in the
    /// order-sorted view and still have no champion.
    pub fn current_turn(&self) -> Option<usize> {
        let sorted = self.by_order();
        let idx = *sorted.get(self.turn_cursor)?;
        if self.members[idx].is_assigned() {
            None
        } else {
            Some(idx)
        }
    }

    /// Champions currently held by any member.
    pub fn assigned_champions(&self) -> HashSet<&str> {
        self.members
            .iter()
            .filter_map(|m| m.champion.as_deref())
            .collect()
    }

    /// Non-empty and every member holds a champion.
    pub fn is_complete(&self) -> bool {
        !self.members.is_empty() && self.members.iter().all(Member::is_assigned)
    }

    /// Whether this roster satisfies every structural invariant.
    ///
    /// Used to vet rosters that come from outside the process (restored
    /// sessions) before trusting them.
    pub fn check_invariants(&self) -> bool {
        if self.members.len() > MAX_MEMBERS {
            return false;
        }
        let mut orders: Vec<u32> = self.members.iter().map(|m| m.order).collect();
        orders.sort_unstable();
        if orders.iter().enumerate().any(|(i, &o)| o != i as u32 + 1) {
            return false;
        }
        if self
            .members
            .iter()
            .any(|m| m.name.trim().is_empty() || m.champion.is_some() != m.role.is_some())
        {
            return false;
        }
        let assigned = self.members.iter().filter(|m| m.is_assigned()).count();
        self.assigned_champions().len() == assigned
    }

    fn renumber(&mut self) {
        for (i, member) in self.members.iter_mut().enumerate() {
            member.order = i as u32 + 1;
        }
    }

    fn check_index(&self, index: usize) -> Result<(), TeamError> {
        if index < self.members.len() {
            Ok(())
        } else {
            Err(TeamError::NoSuchMember {
                index,
                len: self.members.len(),
            })
        }
    }
}

/// Unbiased in-place shuffle: for `i` from the last index down to 1, swap
/// element `i` with a uniformly chosen element in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            roster.add_member(name).unwrap();
        }
        roster
    }

    fn orders(roster: &Roster) -> Vec<u32> {
        roster.members().iter().map(|m| m.order).collect()
    }

    fn names(roster: &Roster) -> Vec<String> {
        roster.members().iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn add_member_appends_with_next_order() {
        let mut roster = Roster::new();
        assert_eq!(roster.add_member("Ana"), Ok(0));
        assert_eq!(roster.add_member("Bia"), Ok(1));
        assert_eq!(orders(&roster), vec![1, 2]);
        assert!(roster.members().iter().all(|m| m.champion.is_none() && m.role.is_none()));
    }

    #[test]
    fn add_member_trims_name() {
        let mut roster = Roster::new();
        roster.add_member("  Caio \t").unwrap();
        assert_eq!(roster.members()[0].name, "Caio");
    }

    #[test]
    fn add_member_rejects_blank_name() {
        let mut roster = Roster::new();
        assert_eq!(roster.add_member(""), Err(TeamError::EmptyName));
        assert_eq!(roster.add_member("   "), Err(TeamError::EmptyName));
        assert!(roster.is_empty());
    }

    #[test]
    fn sixth_member_is_rejected() {
        let mut roster = roster_of(&["A", "B", "C", "D", "E"]);
        assert!(roster.is_full());
        assert_eq!(
            roster.add_member("F"),
            Err(TeamError::RosterFull { max: MAX_MEMBERS })
        );
        assert_eq!(roster.len(), MAX_MEMBERS);
    }

    #[test]
    fn remove_member_renumbers_and_keeps_relative_order() {
        let mut roster = roster_of(&["A", "B", "C", "D"]);
        let removed = roster.remove_member(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&roster), vec!["A", "C", "D"]);
        assert_eq!(orders(&roster), vec![1, 2, 3]);
    }

    #[test]
    fn remove_member_out_of_range() {
        let mut roster = roster_of(&["A"]);
        assert_eq!(
            roster.remove_member(3),
            Err(TeamError::NoSuchMember { index: 3, len: 1 })
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn order_stays_contiguous_through_mixed_operations() {
        let mut roster = Roster::new();
        let ops: &[(&str, Option<usize>)] = &[
            ("A", None),
            ("B", None),
            ("C", None),
            ("", Some(0)),
            ("D", None),
            ("E", None),
            ("F", None),
            ("", Some(2)),
            ("", Some(3)),
            ("G", None),
        ];
        for (name, remove) in ops {
            match remove {
                Some(idx) => {
                    roster.remove_member(*idx).unwrap();
                }
                None => {
                    let _ = roster.add_member(name);
                }
            }
            let expected: Vec<u32> = (1..=roster.len() as u32).collect();
            assert_eq!(orders(&roster), expected);
            assert!(roster.len() <= MAX_MEMBERS);
        }
    }

    #[test]
    fn shuffle_empty_roster_is_rejected() {
        let mut roster = Roster::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(roster.shuffle(&mut rng), Err(TeamError::NothingToShuffle));
    }

    #[test]
    fn shuffle_is_permutation_and_resets_cursor() {
        let mut roster = roster_of(&["A", "B", "C", "D", "E"]);
        roster.turn_cursor = 3;
        let mut rng = StdRng::seed_from_u64(7);
        roster.shuffle(&mut rng).unwrap();

        let mut after = names(&roster);
        after.sort();
        assert_eq!(after, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(orders(&roster), vec![1, 2, 3, 4, 5]);
        assert_eq!(roster.turn_cursor(), 0);
    }

    #[test]
    fn shuffle_keeps_assignments_with_their_member() {
        let mut roster = roster_of(&["A", "B", "C"]);
        roster.assign(1, "Ahri", Role::Mid).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        roster.shuffle(&mut rng).unwrap();
        let b = roster.members().iter().find(|m| m.name == "B").unwrap();
        assert_eq!(b.champion.as_deref(), Some("Ahri"));
        assert_eq!(b.role, Some(Role::Mid));
    }

    #[test]
    fn fisher_yates_reaches_every_position() {
        // Over many seeds, element 0 should land in each slot at least once.
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut items = [0, 1, 2, 3];
            let mut rng = StdRng::seed_from_u64(seed);
            fisher_yates(&mut items, &mut rng);
            let pos = items.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn fisher_yates_single_and_empty_are_noops() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut one = [42];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, [42]);
        let mut none: [u8; 0] = [];
        fisher_yates(&mut none, &mut rng);
    }

    #[test]
    fn reset_clears_members_and_cursor() {
        let mut roster = roster_of(&["A", "B"]);
        roster.turn_cursor = 1;
        roster.reset();
        assert!(roster.is_empty());
        assert_eq!(roster.turn_cursor(), 0);
    }

    #[test]
    fn two_member_turn_walkthrough() {
        let mut roster = roster_of(&["A", "B"]);
        assert_eq!(roster.current_turn(), Some(0));

        roster.assign(0, "Ahri", Role::Mid).unwrap();
        roster.advance_turn();
        assert_eq!(roster.turn_cursor(), 1);
        assert_eq!(roster.current_turn(), Some(1));

        roster.assign(1, "Ashe", Role::Adc).unwrap();
        roster.advance_turn();
        assert_eq!(roster.turn_cursor(), 0);
        assert_eq!(roster.current_turn(), None);
    }

    #[test]
    fn advance_skips_already_assigned_members() {
        let mut roster = roster_of(&["A", "B", "C", "D"]);
        roster.assign(1, "Bard", Role::Support).unwrap();
        roster.assign(2, "Brand", Role::Mid).unwrap();
        roster.assign(0, "Azir", Role::Mid).unwrap();
        roster.advance_turn();
        assert_eq!(roster.turn_cursor(), 3);
        assert_eq!(roster.current_turn(), Some(3));
    }

    #[test]
    fn advance_does_not_wrap_to_earlier_unassigned_members() {
        // Cursor on C; A is still open but sorts before the cursor.
        let mut roster = roster_of(&["A", "B", "C"]);
        roster.assign(1, "Bard", Role::Support).unwrap();
        roster.turn_cursor = 2;
        roster.assign(2, "Corki", Role::Adc).unwrap();
        roster.advance_turn();
        assert_eq!(roster.turn_cursor(), 0);
        // A is unassigned, so position 0 is a live turn again.
        assert_eq!(roster.current_turn(), Some(0));
    }

    #[test]
    fn current_turn_none_when_cursor_past_end() {
        let mut roster = roster_of(&["A", "B", "C"]);
        roster.turn_cursor = 2;
        roster.remove_member(2).unwrap();
        assert_eq!(roster.current_turn(), None);
    }

    #[test]
    fn current_turn_follows_order_not_insertion() {
        let mut roster = roster_of(&["A", "B", "C"]);
        // Reverse the order by hand: C=1, B=2, A=3.
        roster.members[0].order = 3;
        roster.members[2].order = 1;
        assert_eq!(roster.by_order(), vec![2, 1, 0]);
        assert_eq!(roster.current_turn(), Some(2));
    }

    #[test]
    fn is_complete_requires_members_and_champions() {
        let mut roster = Roster::new();
        assert!(!roster.is_complete());
        roster.add_member("A").unwrap();
        assert!(!roster.is_complete());
        roster.assign(0, "Annie", Role::Mid).unwrap();
        assert!(roster.is_complete());
    }

    #[test]
    fn check_invariants_accepts_valid_roster() {
        let mut roster = roster_of(&["A", "B"]);
        roster.assign(0, "Annie", Role::Mid).unwrap();
        assert!(roster.check_invariants());
    }

    #[test]
    fn check_invariants_rejects_broken_rosters() {
        let mut gap = roster_of(&["A", "B"]);
        gap.members[1].order = 3;
        assert!(!gap.check_invariants());

        let mut half_assigned = roster_of(&["A"]);
        half_assigned.members[0].champion = Some("Akali".into());
        assert!(!half_assigned.check_invariants());

        let mut dup = roster_of(&["A", "B"]);
        dup.assign(0, "Akali", Role::Mid).unwrap();
        dup.assign(1, "Akali", Role::Top).unwrap();
        assert!(!dup.check_invariants());

        let mut oversized = roster_of(&["A", "B", "C", "D", "E"]);
        oversized.members.push(Member::new("F", 6));
        assert!(!oversized.check_invariants());
    }
}
