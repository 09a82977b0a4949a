//! Like/dislike reactions on videos and comments.

use serde::Serialize;

define_text_enum! {
    /// The two mutually exclusive reactions a channel can hold on a target.
    ReactionKind ("reaction") {
        Like = "like",
        Dislike = "dislike",
    }
}

impl ReactionKind {
    /// The reaction that is cleared when this one is applied.
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

/// Like and dislike totals for a single video or comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// What a toggle did to the caller's reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The reaction was absent and is now held.
    Added,
    /// The reaction was held and has been removed.
    Removed,
}

/// Decide the outcome of toggling `requested` given the reaction currently held.
///
/// Returns whether the opposite reaction must be cleared first and what
/// happens to the requested one.
pub fn plan_toggle(current: Option<ReactionKind>, requested: ReactionKind) -> (bool, ToggleOutcome) {
    match current {
        Some(kind) if kind == requested => (false, ToggleOutcome::Removed),
        Some(_) => (true, ToggleOutcome::Added),
        None => (false, ToggleOutcome::Added),
    }
}
