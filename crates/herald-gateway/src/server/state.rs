//! Server state
//!
//! Shared between the health view and the gateway event handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use herald_service::ServiceContext;

/// Gateway connection status, written by the event handler
#[derive(Debug)]
pub struct BotStatus {
    connected: AtomicBool,
    started_at: DateTime<Utc>,
}

impl BotStatus {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            started_at: Utc::now(),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health view application state
#[derive(Clone)]
pub struct HealthState {
    /// Service context, for the database check
    service_context: ServiceContext,
    status: Arc<BotStatus>,
    app_name: Arc<str>,
}

impl HealthState {
    pub fn new(service_context: ServiceContext, status: Arc<BotStatus>, app_name: &str) -> Self {
        Self {
            service_context,
            status,
            app_name: Arc::from(app_name),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn status(&self) -> &BotStatus {
        &self.status
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}
