//! Integration tests for users, channels and categories.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::ids::PUBLIC_ID_LEN;
use vidshare_db::models::category::CreateCategory;
use vidshare_db::models::channel::{CreateChannel, UpdateChannel, DEFAULT_AVATAR_PATH};
use vidshare_db::repositories::{CategoryRepo, ChannelRepo, UserRepo, VideoRepo};
use vidshare_db::DbError;

// ---------------------------------------------------------------------------
// Test: Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_normalises_email_domain(pool: PgPool) {
    let user = UserRepo::create(&pool, &common::new_user("Alice@Example.COM"))
        .await
        .unwrap();
    assert_eq!(user.email, "Alice@example.com");
    assert!(!user.is_staff);
    assert!(!user.banned);

    let found = UserRepo::find_by_email(&pool, "Alice@EXAMPLE.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    common::user(&pool, "bob@example.com").await;
    let result = UserRepo::create(&pool, &common::new_user("bob@example.com")).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_requires_email_and_password(pool: PgPool) {
    let mut input = common::new_user("");
    assert_matches!(
        UserRepo::create(&pool, &input).await,
        Err(DbError::Core(CoreError::Validation(_)))
    );

    input.email = "carol@example.com".to_string();
    input.password_hash.clear();
    assert_matches!(
        UserRepo::create(&pool, &input).await,
        Err(DbError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_superuser_is_staff(pool: PgPool) {
    let admin = UserRepo::create_superuser(&pool, &common::new_user("root@example.com"))
        .await
        .unwrap();
    assert!(admin.is_staff);
    assert!(admin.is_superuser);

    let staff = UserRepo::create_staff(&pool, &common::new_user("mod@example.com"))
        .await
        .unwrap();
    assert!(staff.is_staff);
    assert!(!staff.is_superuser);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ban_and_login_bookkeeping(pool: PgPool) {
    let user = common::user(&pool, "dave@example.com").await;

    UserRepo::record_login(&pool, user.id, Some("203.0.113.7"))
        .await
        .unwrap();
    assert!(UserRepo::ban(&pool, user.id).await.unwrap());

    let stored = UserRepo::get(&pool, user.id).await.unwrap();
    assert!(stored.banned);
    assert!(stored.banned_at.is_some());
    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.7"));

    assert_matches!(
        UserRepo::get(&pool, user.id + 1000).await,
        Err(DbError::Core(CoreError::NotFound { entity: "user", .. }))
    );
}

// ---------------------------------------------------------------------------
// Test: Channels
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_channel_gets_public_id(pool: PgPool) {
    let channel = common::channel(&pool, "erin").await;
    assert_eq!(channel.public_id.len(), PUBLIC_ID_LEN);
    assert_eq!(channel.avatar(), DEFAULT_AVATAR_PATH);

    let found = ChannelRepo::find_by_public_id(&pool, &channel.public_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, channel.id);
    assert!(ChannelRepo::find_by_public_id(&pool, "not a channel id")
        .await
        .unwrap()
        .is_none());

    let first = ChannelRepo::first_for_user(&pool, channel.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.id, channel.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_channel_name_length_is_validated(pool: PgPool) {
    let owner = common::user(&pool, "frank@example.com").await;
    let result = ChannelRepo::create(
        &pool,
        &CreateChannel {
            user_id: owner.id,
            name: "x".repeat(21),
            description: None,
        },
    )
    .await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_channel_sets_avatar_and_verified(pool: PgPool) {
    let channel = common::channel(&pool, "grace").await;

    let updated = ChannelRepo::update(
        &pool,
        channel.id,
        &UpdateChannel {
            avatar_path: Some("/media/avatars/grace.png".to_string()),
            verified: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "grace");
    assert_eq!(updated.avatar(), "/media/avatars/grace.png");
    assert!(updated.verified);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_active_skips_banned_owners(pool: PgPool) {
    let active = common::channel(&pool, "active").await;
    let banned = common::channel(&pool, "banned").await;
    UserRepo::ban(&pool, banned.user_id).await.unwrap();

    let ids: Vec<i64> = ChannelRepo::list_active(&pool)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![active.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_views_without_videos_is_zero(pool: PgPool) {
    let channel = common::channel(&pool, "henry").await;
    assert_eq!(ChannelRepo::total_views(&pool, channel.id).await.unwrap(), 0);

    let video = common::draft_video(&pool, channel.id, "Unpublished").await;
    VideoRepo::increment_views(&pool, video.watch_id.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(ChannelRepo::total_views(&pool, channel.id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_list_and_lookup(pool: PgPool) {
    for (title, slug) in [("Sports", "sports"), ("Comedy", "comedy")] {
        CategoryRepo::create(
            &pool,
            &CreateCategory {
                title: title.to_string(),
                slug: slug.to_string(),
                icon: None,
            },
        )
        .await
        .unwrap();
    }

    let titles: Vec<String> = CategoryRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Comedy", "Sports"]);

    let sports = CategoryRepo::find_by_slug(&pool, "sports")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sports.title, "Sports");
    assert!(CategoryRepo::find_by_slug(&pool, "news").await.unwrap().is_none());
}
