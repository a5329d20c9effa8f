//! Connection entity <-> model mapper

use herald_core::entities::Connection;
use herald_core::value_objects::Snowflake;

use crate::models::ConnectionModel;

/// Convert ConnectionModel to Connection entity
impl From<ConnectionModel> for Connection {
    fn from(model: ConnectionModel) -> Self {
        Connection {
            invited_id: Snowflake::new(model.invited_id),
            inviter_id: Snowflake::new(model.inviter_id),
            updated_at: model.updated_at,
        }
    }
}
