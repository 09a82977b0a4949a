//! Integration tests for strikes and reports.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::moderation::{StrikeCategory, TicketReason, TicketStatus};
use vidshare_db::models::comment::CreateComment;
use vidshare_db::models::moderation::CreateTicket;
use vidshare_db::repositories::{CommentRepo, StrikeRepo, TicketRepo};
use vidshare_db::DbError;

fn report(reason: TicketReason, reporter: i64, body: Option<&str>) -> CreateTicket {
    CreateTicket {
        reason,
        reporter_channel_id: Some(reporter),
        body: body.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Test: Strikes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strikes_are_charged_to_the_owner(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let commenter = common::channel(&pool, "commenter").await;
    let video = common::public_video(&pool, creator.id, "Borrowed music").await;
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            author_id: commenter.id,
            video_id: video.id,
            parent_id: None,
            text: "Rude remark".to_string(),
        },
    )
    .await
    .unwrap();

    let video_strike = StrikeRepo::strike_video(&pool, video.id, StrikeCategory::Copyright)
        .await
        .unwrap();
    assert_eq!(video_strike.details.channel_id, creator.id);
    assert_eq!(video_strike.details.category, StrikeCategory::Copyright);
    assert!(StrikeRepo::is_video_struck(&pool, video.id).await.unwrap());

    let comment_strike = StrikeRepo::strike_comment(&pool, comment.id, StrikeCategory::Community)
        .await
        .unwrap();
    assert_eq!(comment_strike.details.channel_id, commenter.id);

    assert_eq!(StrikeRepo::count_for_channel(&pool, creator.id).await.unwrap(), 1);
    assert_eq!(StrikeRepo::count_for_channel(&pool, commenter.id).await.unwrap(), 1);

    let listed = StrikeRepo::list_video_strikes_for_channel(&pool, creator.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].video_id, video.id);
    assert_eq!(
        StrikeRepo::list_comment_strikes_for_channel(&pool, commenter.id)
            .await
            .unwrap()[0]
            .comment_id,
        comment.id
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_striking_missing_video_is_not_found(pool: PgPool) {
    assert_matches!(
        StrikeRepo::strike_video(&pool, 999, StrikeCategory::Community).await,
        Err(DbError::Core(CoreError::NotFound { entity: "video", id: 999 }))
    );
}

// ---------------------------------------------------------------------------
// Test: Tickets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ticket_lifecycle(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let reporter = common::channel(&pool, "reporter").await;
    let video = common::public_video(&pool, creator.id, "Suspicious").await;

    let ticket = TicketRepo::open_for_video(
        &pool,
        video.id,
        &report(TicketReason::Spam, reporter.id, Some("Link farm")),
    )
    .await
    .unwrap();
    assert_eq!(ticket.details.status, TicketStatus::Open);
    assert_eq!(ticket.details.reason, TicketReason::Spam);
    assert_eq!(ticket.details.body, "Link farm");

    let open = TicketRepo::list_open_video_tickets(&pool).await.unwrap();
    assert_eq!(open.len(), 1);
    assert!(TicketRepo::list_closed_video_tickets(&pool).await.unwrap().is_empty());

    assert!(TicketRepo::close_video_ticket(&pool, ticket.id).await.unwrap());
    assert!(!TicketRepo::close_video_ticket(&pool, ticket.id).await.unwrap());

    assert!(TicketRepo::list_open_video_tickets(&pool).await.unwrap().is_empty());
    let closed = TicketRepo::list_closed_video_tickets(&pool).await.unwrap();
    assert_eq!(closed[0].id, ticket.id);
    assert_eq!(closed[0].details.status, TicketStatus::Closed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_ticket_without_body(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let video = common::public_video(&pool, creator.id, "Thread").await;
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            author_id: creator.id,
            video_id: video.id,
            parent_id: None,
            text: "Hmm".to_string(),
        },
    )
    .await
    .unwrap();

    let ticket = TicketRepo::open_for_comment(
        &pool,
        comment.id,
        &report(TicketReason::HarassmentOrBullying, creator.id, None),
    )
    .await
    .unwrap();
    assert_eq!(ticket.comment_id, comment.id);
    assert_eq!(ticket.details.body, "");

    assert_eq!(TicketRepo::list_open_comment_tickets(&pool).await.unwrap().len(), 1);
    assert!(TicketRepo::close_comment_ticket(&pool, ticket.id).await.unwrap());
    assert_eq!(TicketRepo::list_closed_comment_tickets(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ticket_body_length_is_validated(pool: PgPool) {
    let creator = common::channel(&pool, "creator").await;
    let video = common::public_video(&pool, creator.id, "Long report").await;
    let body = "b".repeat(501);

    assert_matches!(
        TicketRepo::open_for_video(&pool, video.id, &report(TicketReason::Porn, creator.id, Some(&body)))
            .await,
        Err(DbError::Core(CoreError::Validation(_)))
    );
}
