//! The application model: one struct holding everything the shells
//! may render, mutated only by the update loop.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::capabilities::time::TimerId;
use crate::catalog;
use crate::chat::ChatState;
use crate::config::CoreConfig;
use crate::domain::{AreaSnapshot, CityEvent, NewsItem, Panel, Story};
use crate::filter::FilterState;
use crate::map_view::MapSelection;
use crate::profile::ProfileState;
use crate::remote::RemoteState;
use crate::upload::UploadForm;
use crate::{AppError, UnixTimeMs};

/// Generation token carried by every in-flight request. A response
/// with a stale epoch is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Epoch(u32);

impl Epoch {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn bumped(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
pub struct Model {
    pub config: CoreConfig,
    pub active_panel: Panel,

    // Catalog data, seeded once.
    pub events: Vec<CityEvent>,
    pub stories: Vec<Story>,
    pub news_feed: Vec<NewsItem>,
    pub areas: Vec<AreaSnapshot>,

    pub filter: FilterState,
    /// Selected story shelf, `all` or a single category.
    pub story_shelf: String,
    pub bookmarks: HashSet<String>,

    pub chat: ChatState,
    pub upload: UploadForm,
    pub remote: RemoteState,
    pub map: MapSelection,
    pub profile: ProfileState,

    pub last_error: Option<AppError>,

    /// Wall-clock reference, refreshed by shell-stamped events.
    pub clock: UnixTimeMs,
    pub epoch: Epoch,
    timer_seq: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            config: CoreConfig::default(),
            active_panel: Panel::default(),
            events: catalog::city_events(),
            stories: catalog::stories(),
            news_feed: catalog::news_feed(),
            areas: catalog::areas(),
            filter: FilterState::default(),
            story_shelf: "all".to_string(),
            bookmarks: HashSet::new(),
            chat: ChatState::default(),
            upload: UploadForm::default(),
            remote: RemoteState::default(),
            map: MapSelection::default(),
            profile: ProfileState::default(),
            last_error: None,
            clock: UnixTimeMs::default(),
            epoch: Epoch::default(),
            timer_seq: 0,
        }
    }
}

impl Model {
    /// Issues the next timer handle.
    pub fn next_timer(&mut self) -> TimerId {
        self.timer_seq += 1;
        TimerId::new(self.timer_seq)
    }

    /// Invalidates every in-flight request.
    pub fn bump_epoch(&mut self) {
        self.epoch = self.epoch.bumped();
    }

    pub fn set_error(&mut self, error: AppError) {
        warn!(code = error.code(), "{error}");
        self.last_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Toggles a bookmark; returns whether the story is now
    /// bookmarked.
    pub fn toggle_bookmark(&mut self, story_id: &str) -> bool {
        if self.bookmarks.remove(story_id) {
            false
        } else {
            self.bookmarks.insert(story_id.to_string());
            true
        }
    }

    pub fn touch_clock(&mut self, now: UnixTimeMs) {
        if now > self.clock {
            self.clock = now;
        }
    }

    #[must_use]
    pub fn visible_events(&self) -> Vec<&CityEvent> {
        self.events
            .iter()
            .filter(|e| self.filter.matches_event(e))
            .collect()
    }

    #[must_use]
    pub fn visible_stories(&self) -> Vec<&Story> {
        self.stories
            .iter()
            .filter(|s| self.filter.matches_story(s))
            .filter(|s| self.story_shelf == "all" || s.category == self.story_shelf)
            .collect()
    }

    #[must_use]
    pub fn visible_news(&self) -> Vec<&NewsItem> {
        self.news_feed
            .iter()
            .filter(|n| self.filter.matches_news(n, self.clock))
            .collect()
    }
}
