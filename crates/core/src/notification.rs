//! Notification kinds and the typed references a notification points at.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

define_text_enum! {
    /// What happened.
    NotificationKind ("notification kind") {
        Comment = "comment",
        Tag = "tag",
        Video = "video",
    }
}

define_text_enum! {
    /// The kinds of content a notification can reference.
    ContentKind ("content kind") {
        Video = "video",
        Comment = "comment",
    }
}

/// A reference to a piece of content, stored as a `(kind, id)` column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ContentRef {
    Video(DbId),
    Comment(DbId),
}

impl ContentRef {
    /// Rebuild a reference from its stored column pair.
    pub fn from_parts(kind: &str, id: DbId) -> Result<Self, CoreError> {
        Ok(match ContentKind::from_str_db(kind)? {
            ContentKind::Video => Self::Video(id),
            ContentKind::Comment => Self::Comment(id),
        })
    }

    pub fn kind(self) -> ContentKind {
        match self {
            Self::Video(_) => ContentKind::Video,
            Self::Comment(_) => ContentKind::Comment,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Self::Video(id) | Self::Comment(id) => id,
        }
    }
}
