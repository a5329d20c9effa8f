//! End-to-end bot flows
//!
//! Run with: cargo test -p integration-tests --test bot_flow_tests

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use herald_core::Snowflake;
use herald_gateway::events::{BotEvent, MemberAddEvent};
use herald_gateway::{HandlerError, Reply};
use herald_service::GiveawayService;
use integration_tests::{
    invite, unique_id, user_aged, GiveawayForm, TestBot, GUILD_ID,
};

// ============================================================================
// Invite Attribution
// ============================================================================

#[tokio::test]
async fn test_joins_leaves_and_fakes_per_inviter() {
    let bot = TestBot::new();
    let now = Utc::now();
    let (alice, bob) = (unique_id(), unique_id());

    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 3, alice), invite("beta", 0, bob)],
    );
    bot.ready().await.unwrap();

    // Established account through alice's link
    let veteran = user_aged(400, now);
    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 4, alice), invite("beta", 0, bob)],
    );
    bot.join(veteran).await.unwrap();

    // Ten-day-old account through bob's link
    let newcomer = user_aged(10, now);
    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 4, alice), invite("beta", 1, bob)],
    );
    bot.join(newcomer).await.unwrap();

    let a = bot.invites(alice).await.unwrap();
    assert_eq!((a.joins, a.leaves, a.fakes, a.net), (1, 0, 0, 1));
    let b = bot.invites(bob).await.unwrap();
    assert_eq!((b.joins, b.leaves, b.fakes, b.net), (1, 0, 1, 0));

    bot.leave(veteran).await.unwrap();
    let a = bot.invites(alice).await.unwrap();
    assert_eq!((a.leaves, a.net), (1, 0));

    // Never attributed; nobody is charged
    bot.leave(unique_id()).await.unwrap();
    assert_eq!(bot.invites(bob).await.unwrap().leaves, 0);
}

#[tokio::test]
async fn test_rejoin_moves_attribution_without_reversing_leave() {
    let bot = TestBot::new();
    let now = Utc::now();
    let (alice, bob) = (unique_id(), unique_id());
    let member = user_aged(365, now);

    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 0, alice), invite("beta", 0, bob)],
    );
    bot.ready().await.unwrap();

    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 1, alice), invite("beta", 0, bob)],
    );
    bot.join(member).await.unwrap();
    bot.leave(member).await.unwrap();

    bot.platform.set_invites(
        GUILD_ID,
        vec![invite("alpha", 1, alice), invite("beta", 1, bob)],
    );
    bot.join(member).await.unwrap();
    bot.leave(member).await.unwrap();

    let a = bot.invites(alice).await.unwrap();
    assert_eq!((a.joins, a.leaves), (1, 1));
    let b = bot.invites(bob).await.unwrap();
    assert_eq!((b.joins, b.leaves), (1, 1));
}

#[tokio::test]
async fn test_join_before_ready_primes_the_cache() {
    let bot = TestBot::new();
    let now = Utc::now();
    let alice = unique_id();

    bot.platform.set_invites(GUILD_ID, vec![invite("alpha", 7, alice)]);
    bot.join(user_aged(365, now)).await.unwrap();
    assert_eq!(bot.invites(alice).await.unwrap().joins, 0);

    bot.platform.set_invites(GUILD_ID, vec![invite("alpha", 8, alice)]);
    bot.join(user_aged(365, now)).await.unwrap();
    assert_eq!(bot.invites(alice).await.unwrap().joins, 1);
}

#[tokio::test]
async fn test_invite_fetch_failure_does_not_count() {
    let bot = TestBot::new();
    let alice = unique_id();

    bot.platform.set_invites(GUILD_ID, vec![invite("alpha", 0, alice)]);
    bot.ready().await.unwrap();

    bot.platform.fail_fetches(true);
    let err = bot
        .dispatcher
        .dispatch(BotEvent::GuildMemberAdd(MemberAddEvent::new(
            GUILD_ID,
            user_aged(365, Utc::now()),
        )))
        .await
        .unwrap_err();
    assert!(!err.is_expected());
    assert_eq!(bot.invites(alice).await.unwrap().joins, 0);
}

#[tokio::test]
async fn test_concurrent_joins_are_each_attributed() {
    let bot = Arc::new(TestBot::new());
    let now = Utc::now();
    let alice = unique_id();

    bot.platform.set_invites(GUILD_ID, vec![invite("alpha", 0, alice)]);
    bot.ready().await.unwrap();
    bot.platform.auto_increment("alpha");

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let bot = bot.clone();
            let user = user_aged(200, now);
            tokio::spawn(async move { bot.join(user).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = bot.invites(alice).await.unwrap();
    assert_eq!((stats.joins, stats.net), (10, 10));
}

// ============================================================================
// Giveaways
// ============================================================================

#[tokio::test]
async fn test_giveaway_lifecycle() {
    let bot = TestBot::new();
    let created_at = Utc::now();
    let message = unique_id();

    let giveaway = bot
        .create_giveaway(GiveawayForm::new("Nitro", "60", "2"), message, created_at)
        .await
        .unwrap();
    let end = created_at.timestamp() + 3600;
    assert_eq!(giveaway.end_time_unix, end);
    assert!(giveaway.is_active());

    let entrants: Vec<Snowflake> = (0..10).map(|_| unique_id()).collect();
    for (i, user) in entrants.iter().enumerate() {
        let Reply::EntryAccepted(state) = bot.press(message, *user).await.unwrap() else {
            panic!("entry was not accepted");
        };
        assert_eq!(state.participant_count, i + 1);
    }

    assert!(bot.sweep(end - 1).await.unwrap().is_idle());
    assert!(bot.platform.published().is_empty());

    let report = bot.sweep(end).await.unwrap();
    assert_eq!(report.resolved, 1);

    let published = bot.platform.published();
    assert_eq!(published.len(), 1);
    let winners: HashSet<_> = published[0].winners.iter().copied().collect();
    assert_eq!(winners.len(), 2);
    assert!(winners.iter().all(|w| entrants.contains(w)));
    assert_eq!(published[0].participant_count, 10);

    // Already ended; nothing more to do
    assert!(bot.sweep(end + 30).await.unwrap().is_idle());
    assert_eq!(bot.platform.published().len(), 1);

    let stored = GiveawayService::new(bot.dispatcher.context())
        .get(message)
        .await
        .unwrap();
    assert_eq!(stored.status, "ended");
    assert_eq!(stored.winners.len(), 2);
}

#[tokio::test]
async fn test_giveaway_without_entrants() {
    let bot = TestBot::new();
    let created_at = Utc::now();
    let message = unique_id();

    bot.create_giveaway(GiveawayForm::new("Sticker", "1", "3"), message, created_at)
        .await
        .unwrap();

    let report = bot.sweep(created_at.timestamp() + 60).await.unwrap();
    assert_eq!(report.resolved, 1);

    let published = bot.platform.published();
    assert!(published[0].winners.is_empty());
    assert!(!published[0].has_winners());
}

#[tokio::test]
async fn test_more_winners_than_entrants() {
    let bot = TestBot::new();
    let created_at = Utc::now();
    let message = unique_id();
    let only = unique_id();

    bot.create_giveaway(GiveawayForm::new("Role", "1", "3"), message, created_at)
        .await
        .unwrap();
    bot.press(message, only).await.unwrap();

    bot.sweep(created_at.timestamp() + 60).await.unwrap();
    assert_eq!(bot.platform.published()[0].winners, vec![only]);
}

#[tokio::test]
async fn test_double_entry_rejected() {
    let bot = TestBot::new();
    let message = unique_id();
    let user = unique_id();

    bot.create_giveaway(GiveawayForm::new("Nitro", "60", "1"), message, Utc::now())
        .await
        .unwrap();

    bot.press(message, user).await.unwrap();
    let err = bot.press(message, user).await.unwrap_err();
    assert_eq!(err.user_message(), "❌ You are already participating.");

    let stored = GiveawayService::new(bot.dispatcher.context())
        .get(message)
        .await
        .unwrap();
    assert_eq!(stored.participant_count, 1);
}

#[tokio::test]
async fn test_concurrent_entries_of_one_user() {
    let bot = Arc::new(TestBot::new());
    let message = unique_id();
    let user = unique_id();

    bot.create_giveaway(GiveawayForm::new("Nitro", "60", "1"), message, Utc::now())
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let bot = bot.clone();
            tokio::spawn(async move { bot.press(message, user).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn test_publish_failure_still_ends_every_giveaway() {
    let bot = TestBot::new();
    let created_at = Utc::now();
    let (first, second) = (unique_id(), unique_id());

    for message in [first, second] {
        bot.create_giveaway(GiveawayForm::new("Nitro", "1", "1"), message, created_at)
            .await
            .unwrap();
        bot.press(message, unique_id()).await.unwrap();
    }

    bot.platform.fail_publishes(true);
    let report = bot.sweep(created_at.timestamp() + 60).await.unwrap();
    assert_eq!(report.resolved, 2);
    assert_eq!(report.publish_failures, 2);

    // Not retried; both stay ended
    bot.platform.fail_publishes(false);
    assert!(bot.sweep(created_at.timestamp() + 90).await.unwrap().is_idle());

    let err = bot.press(first, unique_id()).await.unwrap_err();
    assert_eq!(err.user_message(), "❌ This giveaway has ended.");
}

#[tokio::test]
async fn test_only_owners_open_the_form() {
    let bot = TestBot::new();
    let err = bot
        .command("giveaway", unique_id(), vec![unique_id()], None)
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::Forbidden));
    assert_eq!(err.user_message(), "❌ You don't have permission.");
}
