//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use vidshare_core::video::{TranscodeStatus, Visibility};
use vidshare_db::models::channel::{Channel, CreateChannel};
use vidshare_db::models::user::{CreateUser, User};
use vidshare_db::models::video::{CreateVideo, UpdateVideo, Video};
use vidshare_db::repositories::{ChannelRepo, UserRepo, VideoRepo};

pub fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

pub async fn user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(pool, &new_user(email)).await.unwrap()
}

/// A user with a single channel of the same name.
pub async fn channel(pool: &PgPool, name: &str) -> Channel {
    let owner = user(pool, &format!("{name}@example.com")).await;
    ChannelRepo::create(
        pool,
        &CreateChannel {
            user_id: owner.id,
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

pub fn new_video(channel_id: i64, title: &str) -> CreateVideo {
    CreateVideo {
        channel_id,
        title: Some(title.to_string()),
        ..Default::default()
    }
}

/// A freshly uploaded video: queued, unpublished, private.
pub async fn draft_video(pool: &PgPool, channel_id: i64, title: &str) -> Video {
    VideoRepo::create(pool, &new_video(channel_id, title))
        .await
        .unwrap()
}

/// Take a video through transcoding and make it public.
pub async fn publish(pool: &PgPool, video: &Video) -> Video {
    VideoRepo::set_transcode_status(pool, video.id, TranscodeStatus::Done)
        .await
        .unwrap();
    VideoRepo::update(
        pool,
        video.id,
        &UpdateVideo {
            visibility: Some(Visibility::Public),
            published: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap()
}

/// A video that passes the published gate and is public.
pub async fn public_video(pool: &PgPool, channel_id: i64, title: &str) -> Video {
    let video = draft_video(pool, channel_id, title).await;
    publish(pool, &video).await
}
