//! Video visibility and transcode lifecycle.

use crate::error::CoreError;

/// Title given to uploads that have not been named yet.
pub const DEFAULT_VIDEO_TITLE: &str = "UNTITLED VIDEO";

/// Maximum length of a video title, in characters.
pub const MAX_TITLE_LEN: usize = 100;

define_text_enum! {
    /// Who may see a video.
    ///
    /// Only `Public` videos show up in listings and search. `Unlisted` videos
    /// are reachable by their watch id when they pass the published predicate.
    Visibility ("visibility") {
        Private = "private",
        Public = "public",
        Unlisted = "unlisted",
        Draft = "draft",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

define_text_enum! {
    /// Transcode job status mirrored from the external queue.
    TranscodeStatus ("transcode status") {
        Queued = "queued",
        Processing = "started",
        Done = "finished",
        Error = "failed",
    }
}

impl Default for TranscodeStatus {
    fn default() -> Self {
        Self::Queued
    }
}

impl TranscodeStatus {
    /// Whether the queue has stopped working on the video.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// Validate a user-supplied video title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Video title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Video title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
