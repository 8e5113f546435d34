//! View model: the render-ready projection of the model. Shells
//! receive this and nothing else.

use serde::{Deserialize, Serialize};

use crate::chat::{Sender, QUICK_ACTIONS};
use crate::domain::{EventKind, Panel, Sentiment, Severity};
use crate::filter::{DateRange, EventStats};
use crate::map_view::{area_tone, pin_tone, MarkerTone};
use crate::model::Model;
use crate::remote::{DashboardStatus, Mood};
use crate::upload::UploadStatus;
use crate::UnixTimeMs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelTab {
    pub panel: Panel,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTab {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub categories: Vec<CategoryTab>,
    pub lines: Vec<String>,
    pub alert: Option<String>,
    pub stats: EventStats,
    /// Category chips for the compact event filter, sentinel first.
    pub event_categories: Vec<String>,
    /// Shortcut tiles; tapping one is a plain `SelectPanel`.
    pub quick_panels: Vec<PanelTab>,
}

/// The summary panel's shortcut targets.
const QUICK_PANELS: [Panel; 4] = [Panel::Stories, Panel::Upload, Panel::Chat, Panel::Map];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryCard {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
    pub views: u32,
    pub category: String,
    pub image_url: String,
    pub sentiment: Sentiment,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub published_at: UnixTimeMs,
    pub tags: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedView {
    pub query: String,
    /// Categories offered by the panel, sentinel first.
    pub categories: Vec<String>,
    pub selected_categories: Vec<String>,
    pub selected_severities: Vec<Severity>,
    pub date_range: DateRange,
    pub shown: usize,
    pub total: usize,
    pub items: Vec<FeedCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageView {
    pub sender: Sender,
    pub body: String,
    pub sent_at: UnixTimeMs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickActionView {
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatView {
    pub messages: Vec<ChatMessageView>,
    pub draft: String,
    pub awaiting_reply: bool,
    pub quick_actions: Vec<QuickActionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentCard {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadView {
    pub description: String,
    pub location: String,
    pub tag_draft: String,
    pub tags: Vec<String>,
    pub attachments: Vec<AttachmentCard>,
    pub stage: UploadStage,
    pub failure_message: Option<String>,
    pub can_submit: bool,
    pub remaining_slots: usize,
    pub max_attachment_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub id: String,
    pub title: String,
    pub x: u8,
    pub y: u8,
    pub kind: EventKind,
    pub tone: MarkerTone,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMarker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tone: MarkerTone,
    pub weather: String,
    pub temperature_c: i32,
    pub tweet_count: u32,
    pub news_count: u32,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodOverlay {
    pub area: String,
    pub mood: Mood,
    pub latitude: f64,
    pub longitude: f64,
    pub news_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewModel {
    pub pins: Vec<MapPin>,
    pub areas: Vec<AreaMarker>,
    pub moods: Vec<MoodOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub location: String,
    pub join_date: String,
    pub events_uploaded: u32,
    pub reputation: f32,
    pub badges: Vec<String>,
    pub editing: bool,
    pub draft_name: String,
    pub draft_email: String,
    pub draft_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFacingError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub active_panel: Panel,
    pub panels: Vec<PanelTab>,
    pub dashboard_status: DashboardStatus,
    pub summary: SummaryView,
    pub stories: Vec<StoryCard>,
    pub story_shelves: Vec<CategoryTab>,
    pub feed: FeedView,
    pub chat: ChatView,
    pub upload: UploadView,
    pub map: MapViewModel,
    pub profile: ProfileView,
    pub error: Option<UserFacingError>,
}

impl ViewModel {
    #[must_use]
    pub fn project(model: &Model) -> Self {
        Self {
            active_panel: model.active_panel,
            panels: Panel::ALL
                .iter()
                .map(|&panel| PanelTab {
                    panel,
                    title: panel.display_name().to_string(),
                    active: panel == model.active_panel,
                })
                .collect(),
            dashboard_status: model.remote.status(),
            summary: summary_view(model),
            stories: stories_view(model),
            story_shelves: crate::catalog::STORY_SHELVES
                .iter()
                .map(|&shelf| CategoryTab {
                    name: shelf.to_string(),
                    active: model.story_shelf == shelf,
                })
                .collect(),
            feed: feed_view(model),
            chat: chat_view(model),
            upload: upload_view(model),
            map: map_view(model),
            profile: profile_view(model),
            error: model.last_error.as_ref().map(|e| UserFacingError {
                code: e.code().to_string(),
                message: e.user_facing_message(),
            }),
        }
    }
}

fn summary_view(model: &Model) -> SummaryView {
    let active = model.remote.active_category.as_deref();
    let categories = model
        .remote
        .summary
        .as_ref()
        .map(|summary| {
            summary
                .categories()
                .map(|name| CategoryTab {
                    name: name.to_string(),
                    active: Some(name) == active,
                })
                .collect()
        })
        .unwrap_or_default();

    let digest = model
        .remote
        .summary
        .as_ref()
        .zip(active)
        .and_then(|(summary, name)| summary.get(name));

    SummaryView {
        categories,
        lines: digest.map(|d| d.summary.clone()).unwrap_or_default(),
        alert: digest.and_then(|d| d.trimmed_alert().map(str::to_string)),
        stats: EventStats::compute(model.visible_events()),
        event_categories: crate::catalog::EVENT_CATEGORIES
            .iter()
            .map(|&c| c.to_string())
            .collect(),
        quick_panels: QUICK_PANELS
            .iter()
            .map(|&panel| PanelTab {
                panel,
                title: panel.display_name().to_string(),
                active: panel == model.active_panel,
            })
            .collect(),
    }
}

fn stories_view(model: &Model) -> Vec<StoryCard> {
    model
        .visible_stories()
        .into_iter()
        .map(|story| StoryCard {
            id: story.id.clone(),
            title: story.title.clone(),
            summary: story.summary.clone(),
            source: story.source.clone(),
            published_at: story.published_at.clone(),
            views: story.views,
            category: story.category.clone(),
            image_url: story.image_url.clone(),
            sentiment: story.sentiment,
            bookmarked: model.bookmarks.contains(&story.id),
        })
        .collect()
}

fn feed_view(model: &Model) -> FeedView {
    let items: Vec<FeedCard> = model
        .visible_news()
        .into_iter()
        .map(|item| FeedCard {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            location: item.location.clone(),
            published_at: item.published_at,
            tags: item.tags.clone(),
            severity: item.severity,
        })
        .collect();

    let mut selected_categories: Vec<String> =
        model.filter.categories.iter().cloned().collect();
    selected_categories.sort();
    let mut selected_severities: Vec<Severity> =
        model.filter.severities.iter().copied().collect();
    selected_severities.sort_by_key(|s| s.as_str());

    FeedView {
        query: model.filter.query.clone(),
        categories: crate::catalog::NEWS_FEED_CATEGORIES
            .iter()
            .map(|&c| c.to_string())
            .collect(),
        selected_categories,
        selected_severities,
        date_range: model.filter.date_range,
        shown: items.len(),
        total: model.news_feed.len(),
        items,
    }
}

fn chat_view(model: &Model) -> ChatView {
    ChatView {
        messages: model
            .chat
            .messages
            .iter()
            .map(|m| ChatMessageView {
                sender: m.sender,
                body: m.body.clone(),
                sent_at: m.sent_at,
            })
            .collect(),
        draft: model.chat.draft.clone(),
        awaiting_reply: model.chat.status.is_awaiting(),
        quick_actions: QUICK_ACTIONS
            .iter()
            .map(|action| QuickActionView {
                label: action.label.to_string(),
                message: action.message.to_string(),
            })
            .collect(),
    }
}

fn upload_view(model: &Model) -> UploadView {
    let form = &model.upload;
    let (stage, failure_message) = match &form.status {
        UploadStatus::Idle => (UploadStage::Idle, None),
        UploadStatus::Submitting => (UploadStage::Submitting, None),
        UploadStatus::Succeeded { .. } => (UploadStage::Succeeded, None),
        UploadStatus::Failed { message } => (UploadStage::Failed, Some(message.clone())),
    };
    let limits = &model.config.attachment_limits;

    UploadView {
        description: form.description.clone(),
        location: form.location.clone(),
        tag_draft: form.tag_draft.clone(),
        tags: form.tags.clone(),
        attachments: form
            .attachments
            .iter()
            .map(|a| AttachmentCard {
                file_name: a.file_name.clone(),
                mime_type: a.mime_type.clone(),
                size_bytes: a.size_bytes(),
            })
            .collect(),
        stage,
        failure_message,
        can_submit: form.can_submit(),
        remaining_slots: limits.max_attachments.saturating_sub(form.attachments.len()),
        max_attachment_bytes: limits.max_attachment_bytes,
    }
}

fn map_view(model: &Model) -> MapViewModel {
    MapViewModel {
        pins: model
            .visible_events()
            .into_iter()
            .map(|event| MapPin {
                id: event.id.clone(),
                title: event.title.clone(),
                x: event.coordinates.x,
                y: event.coordinates.y,
                kind: event.kind,
                tone: pin_tone(event),
                selected: model.map.event_id.as_deref() == Some(event.id.as_str()),
            })
            .collect(),
        areas: model
            .areas
            .iter()
            .map(|area| AreaMarker {
                name: area.name.clone(),
                latitude: area.latitude,
                longitude: area.longitude,
                tone: area_tone(area),
                weather: area.weather.clone(),
                temperature_c: area.temperature_c,
                tweet_count: area.tweet_count,
                news_count: area.news_count,
                selected: model.map.area_name.as_deref() == Some(area.name.as_str()),
            })
            .collect(),
        // The overlay waits for the whole dashboard, not just the
        // mood fetch.
        moods: if model.remote.status() == DashboardStatus::Ready {
            model
                .remote
                .moods
                .as_ref()
                .map(|moods| {
                    moods
                        .iter()
                        .map(|m| MoodOverlay {
                            area: m.area.clone(),
                            mood: m.mood,
                            latitude: m.latitude,
                            longitude: m.longitude,
                            news_summary: m.news_summary.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default()
        } else {
            Vec::new()
        },
    }
}

fn profile_view(model: &Model) -> ProfileView {
    let profile = &model.profile;
    ProfileView {
        name: profile.record.name.clone(),
        email: profile.record.email.clone(),
        avatar_url: profile.record.avatar_url.clone(),
        location: profile.record.location.clone(),
        join_date: profile.record.join_date.clone(),
        events_uploaded: profile.record.events_uploaded,
        reputation: profile.record.reputation,
        badges: profile.record.badges.clone(),
        editing: profile.editing,
        draft_name: profile.draft.name.clone(),
        draft_email: profile.draft.email.clone(),
        draft_location: profile.draft.location.clone(),
    }
}
