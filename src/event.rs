//! The event vocabulary: every way the model can change.
//!
//! User-initiated events that need wall-clock time carry a
//! shell-stamped `UnixTimeMs`, keeping the update loop pure. HTTP
//! response variants are internal to the core and skipped on the
//! serialization boundary, as is usual for Crux apps.

use crux_http::Response;
use serde::{Deserialize, Serialize};

use crate::capabilities::time::TimerId;
use crate::config::CoreConfig;
use crate::domain::{Panel, Severity};
use crate::filter::DateRange;
use crate::model::Epoch;
use crate::profile::ProfileField;
use crate::remote::{AreaMood, SummaryData};
use crate::upload::Attachment;
use crate::UnixTimeMs;

#[derive(Debug, Serialize, Deserialize)]
pub enum Event {
    // Lifecycle
    Configure(CoreConfig),
    Boot { now: UnixTimeMs },
    Teardown,
    DismissError,

    // Panels
    SelectPanel(Panel),

    // Filter
    SetSearchQuery(String),
    ToggleCategory(String),
    ToggleSeverity(Severity),
    SetDateRange(DateRange),
    ClearFilters,

    // Summary
    SelectSummaryCategory(String),

    // Stories
    SelectStoryShelf(String),
    ToggleBookmark(String),

    // Chat
    SetChatDraft(String),
    ApplyQuickAction(usize),
    SendChatMessage { now: UnixTimeMs },
    ChatReplyDue { timer: TimerId },

    // Upload
    SetUploadDescription(String),
    SetUploadLocation(String),
    SetTagDraft(String),
    AddTag,
    RemoveTag(String),
    AttachFiles(Vec<Attachment>),
    RemoveAttachment(usize),
    SubmitUpload { now: UnixTimeMs },
    UploadResetDue { timer: TimerId },

    // Map
    ToggleEventPin(String),
    ToggleAreaMarker(String),
    ClearMapSelection,

    // Profile
    BeginProfileEdit,
    SetProfileField(ProfileField, String),
    SaveProfile,
    CancelProfileEdit,

    // HTTP responses, fed back by the capability
    #[serde(skip)]
    GotSummary {
        epoch: Epoch,
        response: Box<crux_http::Result<Response<SummaryData>>>,
    },
    #[serde(skip)]
    GotMoodMap {
        epoch: Epoch,
        response: Box<crux_http::Result<Response<Vec<AreaMood>>>>,
    },
    #[serde(skip)]
    GotUploadReceipt {
        epoch: Epoch,
        response: Box<crux_http::Result<Response<Vec<u8>>>>,
    },
}

impl Event {
    /// Stable name for logging and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::Boot { .. } => "boot",
            Self::Teardown => "teardown",
            Self::DismissError => "dismiss_error",
            Self::SelectPanel(_) => "select_panel",
            Self::SetSearchQuery(_) => "set_search_query",
            Self::ToggleCategory(_) => "toggle_category",
            Self::ToggleSeverity(_) => "toggle_severity",
            Self::SetDateRange(_) => "set_date_range",
            Self::ClearFilters => "clear_filters",
            Self::SelectSummaryCategory(_) => "select_summary_category",
            Self::SelectStoryShelf(_) => "select_story_shelf",
            Self::ToggleBookmark(_) => "toggle_bookmark",
            Self::SetChatDraft(_) => "set_chat_draft",
            Self::ApplyQuickAction(_) => "apply_quick_action",
            Self::SendChatMessage { .. } => "send_chat_message",
            Self::ChatReplyDue { .. } => "chat_reply_due",
            Self::SetUploadDescription(_) => "set_upload_description",
            Self::SetUploadLocation(_) => "set_upload_location",
            Self::SetTagDraft(_) => "set_tag_draft",
            Self::AddTag => "add_tag",
            Self::RemoveTag(_) => "remove_tag",
            Self::AttachFiles(_) => "attach_files",
            Self::RemoveAttachment(_) => "remove_attachment",
            Self::SubmitUpload { .. } => "submit_upload",
            Self::UploadResetDue { .. } => "upload_reset_due",
            Self::ToggleEventPin(_) => "toggle_event_pin",
            Self::ToggleAreaMarker(_) => "toggle_area_marker",
            Self::ClearMapSelection => "clear_map_selection",
            Self::BeginProfileEdit => "begin_profile_edit",
            Self::SetProfileField(_, _) => "set_profile_field",
            Self::SaveProfile => "save_profile",
            Self::CancelProfileEdit => "cancel_profile_edit",
            Self::GotSummary { .. } => "got_summary",
            Self::GotMoodMap { .. } => "got_mood_map",
            Self::GotUploadReceipt { .. } => "got_upload_receipt",
        }
    }

    /// Whether the event is a direct user interaction, as opposed to
    /// lifecycle plumbing, timers and responses.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Configure(_)
                | Self::Boot { .. }
                | Self::Teardown
                | Self::ChatReplyDue { .. }
                | Self::UploadResetDue { .. }
                | Self::GotSummary { .. }
                | Self::GotMoodMap { .. }
                | Self::GotUploadReceipt { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        assert_eq!(Event::Boot { now: UnixTimeMs::new(0) }.name(), "boot");
        assert_eq!(Event::ClearFilters.name(), "clear_filters");
        assert_eq!(
            Event::SendChatMessage { now: UnixTimeMs::new(0) }.name(),
            "send_chat_message"
        );
    }

    #[test]
    fn responses_and_timers_are_not_user_initiated() {
        assert!(Event::ToggleBookmark("1".into()).is_user_initiated());
        assert!(Event::SubmitUpload { now: UnixTimeMs::new(0) }.is_user_initiated());
        assert!(!Event::Boot { now: UnixTimeMs::new(0) }.is_user_initiated());
        assert!(!Event::ChatReplyDue { timer: TimerId::new(1) }.is_user_initiated());
        assert!(!Event::Teardown.is_user_initiated());
    }

    #[test]
    fn user_events_round_trip_over_the_bridge() {
        let event = Event::ToggleCategory("Weather".into());
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        match back {
            Event::ToggleCategory(category) => assert_eq!(category, "Weather"),
            other => panic!("unexpected event: {}", other.name()),
        }
    }
}
