//! In-memory ConnectionRepository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use herald_core::entities::Connection;
use herald_core::traits::{ConnectionRepository, RepoResult};
use herald_core::value_objects::Snowflake;

/// In-memory invite ledger
#[derive(Default)]
pub struct MemoryConnectionRepository {
    connections: RwLock<HashMap<Snowflake, Connection>>,
}

impl MemoryConnectionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for MemoryConnectionRepository {
    async fn find_by_invited(&self, invited_id: Snowflake) -> RepoResult<Option<Connection>> {
        let connections = self.connections.read().await;
        Ok(connections.get(&invited_id).cloned())
    }

    async fn upsert(&self, connection: &Connection) -> RepoResult<()> {
        let mut connections = self.connections.write().await;
        connections.insert(connection.invited_id, connection.clone());
        Ok(())
    }
}
