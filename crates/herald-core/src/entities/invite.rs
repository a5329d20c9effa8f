//! Invite usage values and the per-guild snapshot used to detect which invite
//! a new member consumed

use std::collections::HashMap;

use crate::value_objects::Snowflake;

/// One invite link as reported by the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteUsage {
    pub code: String,
    pub uses: u64,
    /// Absent for vanity URLs and invites of unknown origin
    pub inviter_id: Option<Snowflake>,
}

impl InviteUsage {
    /// Create a new InviteUsage
    pub fn new(code: impl Into<String>, uses: u64, inviter_id: Option<Snowflake>) -> Self {
        Self {
            code: code.into(),
            uses,
            inviter_id,
        }
    }
}

/// Use counters of every known invite in a guild, as last seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteSnapshot {
    uses: HashMap<String, u64>,
}

impl InviteSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a fetched invite list
    pub fn from_usages(usages: &[InviteUsage]) -> Self {
        Self {
            uses: usages
                .iter()
                .map(|invite| (invite.code.clone(), invite.uses))
                .collect(),
        }
    }

    /// Last seen use count for a code (0 if never seen)
    pub fn uses(&self, code: &str) -> u64 {
        self.uses.get(code).copied().unwrap_or(0)
    }

    /// Number of known invites
    pub fn len(&self) -> usize {
        self.uses.len()
    }

    /// Check if no invites are known
    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    /// Find the invite whose counter went up since this snapshot
    ///
    /// An invite missing from the snapshot is compared against 0. If more
    /// than one counter increased, the first one in fetch order wins.
    pub fn find_used<'a>(&self, fetched: &'a [InviteUsage]) -> Option<&'a InviteUsage> {
        fetched
            .iter()
            .find(|invite| invite.uses > self.uses(&invite.code))
    }

    /// Replace the snapshot with freshly fetched counters
    ///
    /// Invites that disappeared (deleted, expired) are dropped.
    pub fn refresh(&mut self, fetched: &[InviteUsage]) {
        *self = Self::from_usages(fetched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(code: &str, uses: u64, inviter: i64) -> InviteUsage {
        InviteUsage::new(code, uses, Some(Snowflake::new(inviter)))
    }

    #[test]
    fn test_find_used_matches_increased_counter() {
        let mut snapshot = InviteSnapshot::from_usages(&[usage("abc", 5, 1), usage("def", 2, 2)]);
        let fetched = vec![usage("abc", 6, 1), usage("def", 2, 2)];

        let used = snapshot.find_used(&fetched).unwrap();
        assert_eq!(used.code, "abc");
        assert_eq!(used.inviter_id, Some(Snowflake::new(1)));

        snapshot.refresh(&fetched);
        assert_eq!(snapshot.uses("abc"), 6);
        assert_eq!(snapshot.uses("def"), 2);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_find_used_none_when_unchanged() {
        let snapshot = InviteSnapshot::from_usages(&[usage("abc", 5, 1)]);
        assert!(snapshot.find_used(&[usage("abc", 5, 1)]).is_none());
    }

    #[test]
    fn test_new_invite_compares_against_zero() {
        let snapshot = InviteSnapshot::from_usages(&[usage("abc", 5, 1)]);
        let fetched = vec![usage("abc", 5, 1), usage("new", 1, 9)];
        assert_eq!(snapshot.find_used(&fetched).unwrap().code, "new");

        // A fresh invite nobody used yet is not a match
        assert!(snapshot.find_used(&[usage("unused", 0, 9)]).is_none());
    }

    #[test]
    fn test_first_increase_wins() {
        let snapshot = InviteSnapshot::from_usages(&[usage("a", 1, 1), usage("b", 1, 2)]);
        let fetched = vec![usage("b", 2, 2), usage("a", 2, 1)];
        assert_eq!(snapshot.find_used(&fetched).unwrap().code, "b");
    }

    #[test]
    fn test_refresh_drops_deleted_invites() {
        let mut snapshot = InviteSnapshot::from_usages(&[usage("a", 1, 1), usage("b", 1, 2)]);
        snapshot.refresh(&[usage("a", 1, 1)]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.uses("b"), 0);
    }

    #[test]
    fn test_vanity_invite_has_no_inviter() {
        let snapshot = InviteSnapshot::new();
        assert!(snapshot.is_empty());
        let fetched = vec![InviteUsage::new("vanity", 3, None)];
        let used = snapshot.find_used(&fetched).unwrap();
        assert!(used.inviter_id.is_none());
    }
}
