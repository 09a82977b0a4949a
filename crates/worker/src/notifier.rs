//! Subscriber notification job.
//!
//! [`SubscriberNotifier`] periodically looks for public videos whose
//! subscribers have not been told about them yet, and fans out one `video`
//! notification per subscriber. Each video is flagged in the same transaction
//! as its fan-out, so a pass interrupted halfway is safe to repeat.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vidshare_db::repositories::{NotificationRepo, VideoRepo};
use vidshare_db::{DbPool, DbResult};

/// Totals from one notification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Videos whose subscribers were notified.
    pub videos: usize,
    /// Notifications created across all of them.
    pub notifications: u64,
    /// Videos that failed and will be retried next pass.
    pub failures: usize,
}

/// Background service that notifies subscribers of new videos.
pub struct SubscriberNotifier {
    pool: DbPool,
    interval: Duration,
    batch_size: i64,
}

impl SubscriberNotifier {
    pub fn new(pool: DbPool, interval: Duration, batch_size: i64) -> Self {
        Self {
            pool,
            interval,
            batch_size,
        }
    }

    /// Run passes on a fixed interval until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Subscriber notifier cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Subscriber notification pass failed");
                    }
                }
            }
        }
    }

    /// Handle one batch of videos awaiting notification.
    pub async fn run_once(&self) -> DbResult<PassSummary> {
        let pending =
            VideoRepo::list_awaiting_subscriber_notification(&self.pool, self.batch_size).await?;

        let mut summary = PassSummary::default();
        for video in &pending {
            match NotificationRepo::notify_subscribers_of_video(&self.pool, video.id).await {
                Ok(created) => {
                    summary.videos += 1;
                    summary.notifications += created;
                }
                Err(e) => {
                    summary.failures += 1;
                    tracing::error!(
                        video_id = video.id,
                        error = %e,
                        "Failed to notify subscribers of video"
                    );
                }
            }
        }

        if !pending.is_empty() {
            tracing::info!(
                videos = summary.videos,
                notifications = summary.notifications,
                failures = summary.failures,
                "Subscriber notification pass complete"
            );
        }

        Ok(summary)
    }
}
