//! Integration tests for channel subscriptions.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_db::repositories::{SubscriptionRepo, VideoRepo};
use vidshare_db::DbError;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_twice_restores_subscriber_count(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let fan = common::channel(&pool, "fan").await;

    let before = SubscriptionRepo::subscriber_count(&pool, creator.id)
        .await
        .unwrap();
    assert_eq!(before, 0);

    let after_subscribe = SubscriptionRepo::toggle(&pool, creator.id, fan.id)
        .await
        .unwrap();
    assert_eq!(after_subscribe, 1);
    assert!(SubscriptionRepo::is_subscribed(&pool, creator.id, fan.id)
        .await
        .unwrap());

    let after_unsubscribe = SubscriptionRepo::toggle(&pool, creator.id, fan.id)
        .await
        .unwrap();
    assert_eq!(after_unsubscribe, before);
    assert!(!SubscriptionRepo::is_subscribed(&pool, creator.id, fan.id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_subscription_is_rejected(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;

    let result = SubscriptionRepo::toggle(&pool, creator.id, creator.id).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(
        SubscriptionRepo::subscriber_count(&pool, creator.id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_lists_follow_direction(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let fan_a = common::channel(&pool, "fan_a").await;
    let fan_b = common::channel(&pool, "fan_b").await;

    SubscriptionRepo::toggle(&pool, creator.id, fan_a.id).await.unwrap();
    SubscriptionRepo::toggle(&pool, creator.id, fan_b.id).await.unwrap();

    let subscribers = SubscriptionRepo::list_subscribers(&pool, creator.id)
        .await
        .unwrap();
    let mut ids: Vec<i64> = subscribers.iter().map(|c| c.id).collect();
    ids.sort();
    assert_eq!(ids, vec![fan_a.id, fan_b.id]);

    let followed = SubscriptionRepo::list_subscribed_channels(&pool, fan_a.id)
        .await
        .unwrap();
    assert_eq!(followed.len(), 1);
    assert_eq!(followed[0].id, creator.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_feed_shows_only_followed_public_videos(pool: PgPool) {
    let followed = common::channel(&pool, "followed").await;
    let stranger = common::channel(&pool, "stranger").await;
    let viewer = common::channel(&pool, "viewer").await;

    SubscriptionRepo::toggle(&pool, followed.id, viewer.id).await.unwrap();

    let older = common::public_video(&pool, followed.id, "Older").await;
    let newer = common::public_video(&pool, followed.id, "Newer").await;
    common::draft_video(&pool, followed.id, "Still processing").await;
    common::public_video(&pool, stranger.id, "Not followed").await;

    let feed = VideoRepo::subscription_feed(&pool, viewer.id, None, None)
        .await
        .unwrap();
    let ids: Vec<i64> = feed.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
