//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts, and an update DTO (all `Option` fields) where
//!   the entity is editable

pub mod background;
pub mod category;
pub mod channel;
pub mod comment;
pub mod image;
pub mod moderation;
pub mod notification;
pub mod subscription;
pub mod transcode_job;
pub mod user;
pub mod video;
pub mod watch_history;
