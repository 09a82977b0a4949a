//! Integration tests for notifications and the subscriber fan-out.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::notification::{ContentRef, NotificationKind};
use vidshare_db::models::notification::CreateNotification;
use vidshare_db::repositories::{NotificationRepo, SubscriptionRepo, VideoRepo};
use vidshare_db::DbError;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_read_notifications(pool: PgPool) {
    let actor = common::channel(&pool, "actor").await;
    let recipient = common::channel(&pool, "recipient").await;
    let video = common::public_video(&pool, recipient.id, "Mine").await;

    let created = NotificationRepo::create(
        &pool,
        &CreateNotification {
            kind: NotificationKind::Comment,
            recipient_user_id: recipient.user_id,
            actor_channel_id: actor.id,
            action: ContentRef::Comment(7),
            target: ContentRef::Video(video.id),
        },
    )
    .await
    .unwrap();
    assert!(created.unread);
    assert_eq!(created.action, ContentRef::Comment(7));
    assert_eq!(created.target, ContentRef::Video(video.id));

    assert_eq!(NotificationRepo::unread_count(&pool, recipient.user_id).await.unwrap(), 1);
    assert!(NotificationRepo::mark_read(&pool, created.id, recipient.user_id)
        .await
        .unwrap());
    assert!(!NotificationRepo::mark_read(&pool, created.id, recipient.user_id)
        .await
        .unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, recipient.user_id).await.unwrap(), 0);

    let unread = NotificationRepo::list_for_user(&pool, recipient.user_id, true, 50, 0)
        .await
        .unwrap();
    assert!(unread.is_empty());
    let all = NotificationRepo::list_for_user(&pool, recipient.user_id, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fan_out_notifies_each_subscriber_once(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let fans = [
        common::channel(&pool, "fan_a").await,
        common::channel(&pool, "fan_b").await,
    ];
    for fan in &fans {
        SubscriptionRepo::toggle(&pool, creator.id, fan.id).await.unwrap();
    }
    let video = common::public_video(&pool, creator.id, "Premiere").await;

    let pending = VideoRepo::list_awaiting_subscriber_notification(&pool, 10)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let created = NotificationRepo::notify_subscribers_of_video(&pool, video.id)
        .await
        .unwrap();
    assert_eq!(created, 2);
    assert_eq!(
        NotificationRepo::notify_subscribers_of_video(&pool, video.id)
            .await
            .unwrap(),
        0
    );
    assert!(VideoRepo::list_awaiting_subscriber_notification(&pool, 10)
        .await
        .unwrap()
        .is_empty());

    for fan in &fans {
        let inbox = NotificationRepo::list_for_user(&pool, fan.user_id, true, 50, 0)
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Video);
        assert_eq!(inbox[0].actor_channel_id, creator.id);
        assert_eq!(inbox[0].target, ContentRef::Video(video.id));
    }

    assert_eq!(NotificationRepo::mark_all_read(&pool, fans[0].user_id).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, fans[0].user_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpublished_video_is_not_pending(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    common::draft_video(&pool, creator.id, "Not yet").await;

    assert!(VideoRepo::list_awaiting_subscriber_notification(&pool, 10)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fan_out_for_missing_video(pool: PgPool) {
    assert_matches!(
        NotificationRepo::notify_subscribers_of_video(&pool, 31337).await,
        Err(DbError::Core(CoreError::NotFound { entity: "video", .. }))
    );
}
