//! InviterStats entity <-> model mapper

use herald_core::entities::InviterStats;
use herald_core::value_objects::Snowflake;

use crate::models::InviterStatsModel;

/// Convert InviterStatsModel to InviterStats entity
impl From<InviterStatsModel> for InviterStats {
    fn from(model: InviterStatsModel) -> Self {
        InviterStats {
            user_id: Snowflake::new(model.user_id),
            joins: model.joins,
            leaves: model.leaves,
            fakes: model.fakes,
            updated_at: model.updated_at,
        }
    }
}
