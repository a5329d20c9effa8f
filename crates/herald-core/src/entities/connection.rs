//! Connection entity - which inviter brought a given member in

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Invite ledger entry, keyed by the invited user
///
/// Only the most recent attribution is kept: a user who leaves and rejoins
/// through someone else's invite overwrites the previous inviter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub invited_id: Snowflake,
    pub inviter_id: Snowflake,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    /// Create a new Connection
    pub fn new(invited_id: Snowflake, inviter_id: Snowflake) -> Self {
        Self {
            invited_id,
            inviter_id,
            updated_at: Utc::now(),
        }
    }

    /// Check if the member invited themselves (own invite link)
    #[inline]
    pub fn is_self_invite(&self) -> bool {
        self.invited_id == self.inviter_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_creation() {
        let conn = Connection::new(Snowflake::new(10), Snowflake::new(20));
        assert_eq!(conn.invited_id, Snowflake::new(10));
        assert_eq!(conn.inviter_id, Snowflake::new(20));
        assert!(!conn.is_self_invite());
    }

    #[test]
    fn test_self_invite() {
        let conn = Connection::new(Snowflake::new(10), Snowflake::new(10));
        assert!(conn.is_self_invite());
    }
}
