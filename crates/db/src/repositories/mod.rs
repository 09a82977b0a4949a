//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod channel_background_repo;
pub mod channel_repo;
pub mod comment_repo;
pub mod image_set_repo;
pub mod notification_repo;
pub mod reaction_repo;
pub mod strike_repo;
pub mod subscription_repo;
pub mod ticket_repo;
pub mod transcode_job_repo;
pub mod user_repo;
pub mod video_repo;
pub mod watch_history_repo;

pub use category_repo::CategoryRepo;
pub use channel_background_repo::ChannelBackgroundRepo;
pub use channel_repo::ChannelRepo;
pub use comment_repo::CommentRepo;
pub use image_set_repo::ImageSetRepo;
pub use notification_repo::NotificationRepo;
pub use reaction_repo::{ReactionRepo, ToggleResult};
pub use strike_repo::StrikeRepo;
pub use subscription_repo::SubscriptionRepo;
pub use ticket_repo::TicketRepo;
pub use transcode_job_repo::TranscodeJobRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
pub use watch_history_repo::WatchHistoryRepo;
