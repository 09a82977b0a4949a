//! Moderation vocabulary: strikes and user reports.

use crate::error::CoreError;

/// Maximum length of a report body, in characters.
pub const MAX_TICKET_BODY_LEN: usize = 500;

define_text_enum! {
    /// Why a strike was issued.
    StrikeCategory ("strike category") {
        Copyright = "copyright",
        Community = "community_guidelines",
    }
}

impl StrikeCategory {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Copyright => "Copyright",
            Self::Community => "Community Guidelines",
        }
    }
}

define_text_enum! {
    /// Review state of a report.
    TicketStatus ("ticket status") {
        Open = "open",
        Closed = "closed",
    }
}

define_text_enum! {
    /// The reason a viewer gave when reporting content.
    TicketReason ("ticket reason") {
        Spam = "spam",
        Porn = "porn",
        ChildAbuse = "child_abuse",
        HateOrViolence = "hate_or_violence",
        HarassmentOrBullying = "harassment_or_bullying",
    }
}

impl TicketReason {
    /// Description shown to the reporting viewer.
    pub fn description(self) -> &'static str {
        match self {
            Self::Spam => "Unwanted commercial content or spam",
            Self::Porn => "Pornography or sexually explicit material",
            Self::ChildAbuse => "Child abuse",
            Self::HateOrViolence => "Hate speech or graphic violence",
            Self::HarassmentOrBullying => "Harassment or bullying",
        }
    }
}

/// Validate the free-text body of a report. Empty bodies are allowed.
pub fn validate_ticket_body(body: &str) -> Result<(), CoreError> {
    if body.chars().count() > MAX_TICKET_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Report body must be at most {MAX_TICKET_BODY_LEN} characters"
        )));
    }
    Ok(())
}
