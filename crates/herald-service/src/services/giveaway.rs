//! Giveaway service
//!
//! Creation from the form, entries, and resolution of ended giveaways.

use tracing::{debug, info, instrument, warn};
use validator::Validate;

use herald_core::entities::{
    parse_positive, Giveaway, GiveawayDraft, GiveawayOutcome, DEFAULT_DURATION_MINUTES,
    DEFAULT_WINNER_COUNT,
};
use herald_core::{DomainError, Snowflake};

use crate::dto::{CreateGiveawayRequest, GiveawayResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Giveaway service
pub struct GiveawayService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GiveawayService<'a> {
    /// Create a new GiveawayService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Turn a submitted form into a draft ending `duration` minutes after `now_unix`
    ///
    /// Prize and description are validated. Unusable numbers fall back to
    /// the defaults (60 minutes, 1 winner).
    pub fn draft(
        &self,
        form: &CreateGiveawayRequest,
        now_unix: i64,
    ) -> ServiceResult<GiveawayDraft> {
        form.validate()?;

        let duration = lenient_number(
            form.duration_minutes.as_deref(),
            DEFAULT_DURATION_MINUTES,
            "duration_minutes",
        );
        let winners = lenient_number(
            form.winner_count.as_deref(),
            DEFAULT_WINNER_COUNT,
            "winner_count",
        );

        Ok(GiveawayDraft::new(
            form.prize.clone(),
            form.description.clone(),
            duration,
            winners,
            now_unix,
        ))
    }

    /// Persist a draft once its announcement has been posted
    #[instrument(skip(self, draft), fields(prize = %draft.prize))]
    pub async fn create(
        &self,
        draft: GiveawayDraft,
        message_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<GiveawayResponse> {
        let giveaway = draft.into_giveaway(message_id, channel_id);
        self.ctx.giveaway_repo().create(&giveaway).await?;

        info!(
            giveaway_id = %message_id,
            channel_id = %channel_id,
            end_time = giveaway.end_time_unix,
            winners = giveaway.winner_count,
            "Giveaway created"
        );

        Ok(GiveawayResponse::from(&giveaway))
    }

    /// Get a giveaway by its announcement message
    #[instrument(skip(self))]
    pub async fn get(&self, giveaway_id: Snowflake) -> ServiceResult<GiveawayResponse> {
        let giveaway = self
            .ctx
            .giveaway_repo()
            .find_by_id(giveaway_id)
            .await?
            .ok_or(DomainError::GiveawayNotFound(giveaway_id))?;

        Ok(GiveawayResponse::from(&giveaway))
    }

    /// Enter a user, returning the new participant count
    ///
    /// # Errors
    /// `GiveawayNotFound`, `AlreadyEnded` or `DuplicateEntry`; nothing is
    /// written in those cases.
    #[instrument(skip(self))]
    pub async fn enter(&self, giveaway_id: Snowflake, user_id: Snowflake) -> ServiceResult<usize> {
        let outcome = self
            .ctx
            .giveaway_repo()
            .add_participant(giveaway_id, user_id)
            .await?;

        let participants = outcome.into_result(giveaway_id)?;
        debug!(giveaway_id = %giveaway_id, user_id = %user_id, participants, "Entry recorded");
        Ok(participants)
    }

    /// Active giveaways whose end time has passed
    #[instrument(skip(self))]
    pub async fn due(&self, now_unix: i64) -> ServiceResult<Vec<Giveaway>> {
        Ok(self.ctx.giveaway_repo().find_due(now_unix).await?)
    }

    /// Draw winners and end the giveaway
    ///
    /// Returns `None` when the giveaway had already been ended, by this or
    /// another resolver.
    pub async fn resolve(&self, giveaway: &Giveaway) -> ServiceResult<Option<GiveawayOutcome>> {
        if !giveaway.is_active() {
            return Ok(None);
        }
        let winners = giveaway.draw_winners(&mut rand::thread_rng());
        self.finish_with(giveaway, winners).await
    }

    /// End the giveaway with the given winners, if it is still active
    #[instrument(skip(self, giveaway, winners), fields(giveaway_id = %giveaway.message_id))]
    pub async fn finish_with(
        &self,
        giveaway: &Giveaway,
        winners: Vec<Snowflake>,
    ) -> ServiceResult<Option<GiveawayOutcome>> {
        let finished = self
            .ctx
            .giveaway_repo()
            .finish(giveaway.message_id, &winners)
            .await?;

        if !finished {
            debug!("Giveaway already resolved elsewhere");
            return Ok(None);
        }

        let mut ended = giveaway.clone();
        ended.finish(winners)?;

        info!(
            winners = ended.winners.len(),
            participants = ended.participant_count(),
            "Giveaway ended"
        );
        Ok(Some(ended.outcome()))
    }
}

/// Parse a form number, falling back to `default` when absent or unusable
fn lenient_number(raw: Option<&str>, default: u32, field: &'static str) -> u32 {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return default;
    };

    match parse_positive(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(field, error = %e, default, "Unusable form value, using default");
            default
        }
    }
}
