//! Integration tests for like/dislike toggles on videos and comments.

mod common;

use sqlx::PgPool;
use vidshare_core::reaction::{ReactionCounts, ReactionKind, ToggleOutcome};
use vidshare_db::models::comment::CreateComment;
use vidshare_db::repositories::{CommentRepo, ReactionRepo};

// ---------------------------------------------------------------------------
// Test: Video likes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_twice_restores_original_state(pool: PgPool) {
    let owner = common::channel(&pool, "owner").await;
    let viewer = common::channel(&pool, "viewer").await;
    let video = common::public_video(&pool, owner.id, "Cats").await;

    let first = ReactionRepo::toggle_video_like(&pool, video.id, viewer.id)
        .await
        .unwrap();
    assert_eq!(first.outcome, ToggleOutcome::Added);
    assert_eq!(first.counts, ReactionCounts { likes: 1, dislikes: 0 });
    assert!(ReactionRepo::is_video_liked(&pool, video.id, viewer.id).await.unwrap());

    let second = ReactionRepo::toggle_video_like(&pool, video.id, viewer.id)
        .await
        .unwrap();
    assert_eq!(second.outcome, ToggleOutcome::Removed);
    assert_eq!(second.counts, ReactionCounts::default());
    assert!(!ReactionRepo::is_video_liked(&pool, video.id, viewer.id).await.unwrap());
    assert_eq!(
        ReactionRepo::video_reaction_of(&pool, video.id, viewer.id).await.unwrap(),
        None
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_after_dislike_replaces_it(pool: PgPool) {
    let owner = common::channel(&pool, "owner").await;
    let viewer = common::channel(&pool, "viewer").await;
    let video = common::public_video(&pool, owner.id, "Dogs").await;

    let disliked = ReactionRepo::toggle_video_dislike(&pool, video.id, viewer.id)
        .await
        .unwrap();
    assert_eq!(disliked.counts, ReactionCounts { likes: 0, dislikes: 1 });

    let liked = ReactionRepo::toggle_video_like(&pool, video.id, viewer.id)
        .await
        .unwrap();
    assert_eq!(liked.outcome, ToggleOutcome::Added);
    assert_eq!(liked.counts, ReactionCounts { likes: 1, dislikes: 0 });
    assert!(ReactionRepo::is_video_liked(&pool, video.id, viewer.id).await.unwrap());
    assert!(!ReactionRepo::is_video_disliked(&pool, video.id, viewer.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_counts_aggregate_across_channels(pool: PgPool) {
    let owner = common::channel(&pool, "owner").await;
    let video = common::public_video(&pool, owner.id, "Birds").await;

    for name in ["a", "b", "c"] {
        let fan = common::channel(&pool, name).await;
        ReactionRepo::toggle_video_like(&pool, video.id, fan.id)
            .await
            .unwrap();
    }
    let critic = common::channel(&pool, "critic").await;
    ReactionRepo::toggle_video_dislike(&pool, video.id, critic.id)
        .await
        .unwrap();

    let counts = ReactionRepo::video_counts(&pool, video.id).await.unwrap();
    assert_eq!(counts, ReactionCounts { likes: 3, dislikes: 1 });
}

// ---------------------------------------------------------------------------
// Test: Comment reactions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_dislike_after_like_replaces_it(pool: PgPool) {
    let owner = common::channel(&pool, "owner").await;
    let viewer = common::channel(&pool, "viewer").await;
    let video = common::public_video(&pool, owner.id, "Fish").await;
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            author_id: owner.id,
            video_id: video.id,
            parent_id: None,
            text: "First!".to_string(),
        },
    )
    .await
    .unwrap();

    ReactionRepo::toggle_comment_like(&pool, comment.id, viewer.id)
        .await
        .unwrap();
    let result = ReactionRepo::toggle_comment_dislike(&pool, comment.id, viewer.id)
        .await
        .unwrap();

    assert_eq!(result.counts, ReactionCounts { likes: 0, dislikes: 1 });
    assert_eq!(
        ReactionRepo::comment_reaction_of(&pool, comment.id, viewer.id)
            .await
            .unwrap(),
        Some(ReactionKind::Dislike)
    );
    assert!(ReactionRepo::is_comment_disliked(&pool, comment.id, viewer.id).await.unwrap());
    assert!(!ReactionRepo::is_comment_liked(&pool, comment.id, viewer.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_and_comment_reactions_are_independent(pool: PgPool) {
    let owner = common::channel(&pool, "owner").await;
    let viewer = common::channel(&pool, "viewer").await;
    let video = common::public_video(&pool, owner.id, "Frogs").await;
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            author_id: owner.id,
            video_id: video.id,
            parent_id: None,
            text: "Ribbit".to_string(),
        },
    )
    .await
    .unwrap();

    ReactionRepo::toggle_video_like(&pool, video.id, viewer.id)
        .await
        .unwrap();

    let counts = ReactionRepo::comment_counts(&pool, comment.id).await.unwrap();
    assert_eq!(counts, ReactionCounts::default());
}
