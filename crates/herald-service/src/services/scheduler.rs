//! Giveaway scheduler
//!
//! Periodically resolves giveaways whose end time has passed and publishes
//! the results to the chat platform.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use herald_common::SchedulerConfig;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::giveaway::GiveawayService;

/// What one sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Giveaways ended by this sweep
    pub resolved: usize,
    /// Due giveaways some other resolver ended first
    pub already_resolved: usize,
    /// Giveaways that could not be resolved (left active for the next sweep)
    pub failed: usize,
    /// Ended giveaways whose result could not be shown
    pub publish_failures: usize,
    /// Another sweep was still running
    pub skipped: bool,
}

impl SweepReport {
    /// Check if the sweep touched nothing
    pub fn is_idle(&self) -> bool {
        self.resolved == 0 && self.already_resolved == 0 && self.failed == 0
    }
}

/// Periodic giveaway resolver
#[derive(Clone)]
pub struct GiveawayScheduler {
    ctx: ServiceContext,
    interval: Duration,
    sweep_lock: Arc<Mutex<()>>,
}

impl GiveawayScheduler {
    /// Create a scheduler sweeping every `interval`
    pub fn new(ctx: ServiceContext, interval: Duration) -> Self {
        Self {
            ctx,
            interval,
            sweep_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a scheduler from configuration
    pub fn from_config(ctx: ServiceContext, config: &SchedulerConfig) -> Self {
        Self::new(ctx, Duration::from_secs(config.sweep_interval_secs.max(1)))
    }

    /// Time between sweeps
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Resolve every giveaway due at `now_unix`
    ///
    /// Single-flight: returns a skipped report if a sweep is already running.
    /// A failure on one giveaway is logged and the batch continues.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now_unix: i64) -> ServiceResult<SweepReport> {
        let Ok(_guard) = self.sweep_lock.try_lock() else {
            debug!("Previous sweep still running");
            return Ok(SweepReport {
                skipped: true,
                ..SweepReport::default()
            });
        };

        let service = GiveawayService::new(&self.ctx);
        let due = service.due(now_unix).await?;
        let mut report = SweepReport::default();

        for giveaway in &due {
            match service.resolve(giveaway).await {
                Ok(Some(outcome)) => {
                    report.resolved += 1;
                    if let Err(e) = self.ctx.platform().publish_giveaway_result(&outcome).await {
                        report.publish_failures += 1;
                        warn!(
                            giveaway_id = %outcome.giveaway_id,
                            error = %e,
                            "Giveaway ended but the result could not be published"
                        );
                    }
                }
                Ok(None) => report.already_resolved += 1,
                Err(e) => {
                    report.failed += 1;
                    error!(
                        giveaway_id = %giveaway.message_id,
                        error = %e,
                        "Failed to resolve giveaway"
                    );
                }
            }
        }

        if !report.is_idle() {
            info!(
                resolved = report.resolved,
                already_resolved = report.already_resolved,
                failed = report.failed,
                publish_failures = report.publish_failures,
                "Giveaway sweep finished"
            );
        }
        Ok(report)
    }

    /// Sweep on every tick until `shutdown` flips to true or its sender is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(interval_secs = self.interval.as_secs(), "Giveaway scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep(Utc::now().timestamp()).await {
                        error!(error = %e, "Giveaway sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Giveaway scheduler stopped");
    }

    /// Run the scheduler on its own task
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}

impl std::fmt::Debug for GiveawayScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiveawayScheduler")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
