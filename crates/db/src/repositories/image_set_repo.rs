//! Repository for the `image_sets` and `images` tables.
//!
//! Poster files are rendered outside the database layer; this repository
//! records their storage keys and which poster a video shows.

use sqlx::PgPool;
use vidshare_core::error::CoreError;
use vidshare_core::storage::{video_location, MediaLayout};
use vidshare_core::types::DbId;

use crate::error::DbResult;
use crate::models::image::{Image, ImageSet, NewPoster};

/// Column list for `image_sets` queries.
const SET_COLUMNS: &str = "id, primary_image_id, created_at";

/// Column list for `images` queries.
const COLUMNS: &str = "id, image_set_id, video_id, image_key, thumbnail_key, created_at";

/// Same columns qualified with the `i` alias, for joins.
const I_COLUMNS: &str = "i.id, i.image_set_id, i.video_id, i.image_key, i.thumbnail_key, \
                         i.created_at";

/// Provides poster set operations.
pub struct ImageSetRepo;

impl ImageSetRepo {
    /// Replace a video's posters with freshly rendered ones.
    ///
    /// Creates the video's image set on first use, otherwise empties it. The
    /// last poster becomes primary. Keys live under the video's storage
    /// prefix, so the video needs a watch id.
    pub async fn replace_posters(
        pool: &PgPool,
        video_id: DbId,
        posters: &[NewPoster],
    ) -> DbResult<Vec<Image>> {
        if posters.is_empty() {
            return Err(CoreError::Validation("At least one poster is required".into()).into());
        }

        let mut tx = pool.begin().await?;

        let (watch_id, image_set_id, channel_public_id): (Option<String>, Option<DbId>, String) =
            sqlx::query_as(
                "SELECT v.watch_id, v.image_set_id, c.public_id \
                 FROM videos v JOIN channels c ON c.id = v.channel_id \
                 WHERE v.id = $1 FOR UPDATE OF v",
            )
            .bind(video_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "video",
                id: video_id,
            })?;

        let image_set_id = match image_set_id {
            Some(id) => {
                sqlx::query("DELETE FROM images WHERE image_set_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                let id: DbId =
                    sqlx::query_scalar("INSERT INTO image_sets DEFAULT VALUES RETURNING id")
                        .fetch_one(&mut *tx)
                        .await?;
                sqlx::query("UPDATE videos SET image_set_id = $2 WHERE id = $1")
                    .bind(video_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
        };

        let query = format!(
            "INSERT INTO images (image_set_id, video_id, image_key, thumbnail_key) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let mut images = Vec::with_capacity(posters.len());
        for poster in posters {
            let image_key =
                video_location(&channel_public_id, watch_id.as_deref(), Some(&poster.file_name))?;
            let thumbnail_key = poster
                .thumbnail_file_name
                .as_deref()
                .map(|name| video_location(&channel_public_id, watch_id.as_deref(), Some(name)))
                .transpose()?;
            let image = sqlx::query_as::<_, Image>(&query)
                .bind(image_set_id)
                .bind(video_id)
                .bind(image_key)
                .bind(thumbnail_key)
                .fetch_one(&mut *tx)
                .await?;
            images.push(image);
        }

        if let Some(last) = images.last() {
            sqlx::query("UPDATE image_sets SET primary_image_id = $2 WHERE id = $1")
                .bind(image_set_id)
                .bind(last.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(video_id, image_set_id, posters = images.len(), "Video posters replaced");
        Ok(images)
    }

    /// Find an image set by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ImageSet>, sqlx::Error> {
        let query = format!("SELECT {SET_COLUMNS} FROM image_sets WHERE id = $1");
        sqlx::query_as::<_, ImageSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Images in a set, in upload order.
    pub async fn list_images(
        pool: &PgPool,
        image_set_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images \
             WHERE image_set_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(image_set_id)
            .fetch_all(pool)
            .await
    }

    /// Make an image the primary of its set.
    ///
    /// Already-primary images are left alone. Returns `true` if the primary
    /// changed.
    pub async fn toggle_primary(pool: &PgPool, image_id: DbId) -> DbResult<bool> {
        let image_set_id: DbId = sqlx::query_scalar("SELECT image_set_id FROM images WHERE id = $1")
            .bind(image_id)
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "image",
                id: image_id,
            })?;

        let result = sqlx::query(
            "UPDATE image_sets SET primary_image_id = $2 \
             WHERE id = $1 AND primary_image_id IS DISTINCT FROM $2",
        )
        .bind(image_set_id)
        .bind(image_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The poster a video currently shows.
    pub async fn primary_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Option<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {I_COLUMNS} FROM videos v \
             JOIN image_sets s ON s.id = v.image_set_id \
             JOIN images i ON i.id = s.primary_image_id \
             WHERE v.id = $1"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// URL of a video's primary poster, or an empty string when it has none.
    pub async fn poster_url(
        pool: &PgPool,
        layout: &MediaLayout,
        video_id: DbId,
    ) -> Result<String, sqlx::Error> {
        Ok(Self::primary_for_video(pool, video_id)
            .await?
            .map(|image| image.poster_url(layout))
            .unwrap_or_default())
    }

    /// URL of a video's primary thumbnail, or the default thumbnail.
    pub async fn thumbnail_url(
        pool: &PgPool,
        layout: &MediaLayout,
        video_id: DbId,
    ) -> Result<String, sqlx::Error> {
        Ok(match Self::primary_for_video(pool, video_id).await? {
            Some(image) => image.thumbnail_url(layout),
            None => layout.thumbnail_url(None),
        })
    }
}
