//! Giveaway entity <-> model mapper

use herald_core::entities::{Giveaway, GiveawayStatus};
use herald_core::error::DomainError;
use herald_core::value_objects::Snowflake;

use crate::models::GiveawayModel;

/// Convert GiveawayModel to Giveaway entity
///
/// Fails only if the status column holds a value this version does not know.
impl TryFrom<GiveawayModel> for Giveaway {
    type Error = DomainError;

    fn try_from(model: GiveawayModel) -> Result<Self, Self::Error> {
        Ok(Giveaway {
            message_id: Snowflake::new(model.message_id),
            channel_id: Snowflake::new(model.channel_id),
            prize: model.prize,
            description: model.description,
            end_time_unix: model.end_time,
            winner_count: model.winner_count,
            participants: model.participants.into_iter().map(Snowflake::new).collect(),
            winners: model.winners.into_iter().map(Snowflake::new).collect(),
            status: model.status.parse::<GiveawayStatus>()?,
            created_at: model.created_at,
        })
    }
}

/// Raw IDs for a BIGINT[] column
pub fn snowflakes_to_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// Convert Giveaway entity reference to values for database insertion
pub struct GiveawayInsert<'a> {
    pub message_id: i64,
    pub channel_id: i64,
    pub prize: &'a str,
    pub description: &'a str,
    pub end_time: i64,
    pub winner_count: i32,
    pub participants: Vec<i64>,
    pub winners: Vec<i64>,
    pub status: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> GiveawayInsert<'a> {
    pub fn new(giveaway: &'a Giveaway) -> Self {
        Self {
            message_id: giveaway.message_id.into_inner(),
            channel_id: giveaway.channel_id.into_inner(),
            prize: &giveaway.prize,
            description: &giveaway.description,
            end_time: giveaway.end_time_unix,
            winner_count: giveaway.winner_count.max(1),
            participants: snowflakes_to_ids(&giveaway.participants),
            winners: snowflakes_to_ids(&giveaway.winners),
            status: giveaway.status.as_str(),
            created_at: giveaway.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(status: &str) -> GiveawayModel {
        GiveawayModel {
            message_id: 10,
            channel_id: 20,
            prize: "Nitro".to_string(),
            description: String::new(),
            end_time: 1_700_000_000,
            winner_count: 2,
            participants: vec![1, 2, 3],
            winners: vec![2],
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let gw = Giveaway::try_from(model("ended")).unwrap();
        assert_eq!(gw.message_id, Snowflake::new(10));
        assert_eq!(gw.participants.len(), 3);
        assert_eq!(gw.winners, vec![Snowflake::new(2)]);
        assert_eq!(gw.status, GiveawayStatus::Ended);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(Giveaway::try_from(model("paused")).is_err());
    }

    #[test]
    fn test_insert_values() {
        let gw = Giveaway::try_from(model("active")).unwrap();
        let insert = GiveawayInsert::new(&gw);
        assert_eq!(insert.participants, vec![1, 2, 3]);
        assert_eq!(insert.status, "active");
        assert_eq!(insert.end_time, 1_700_000_000);
    }
}
