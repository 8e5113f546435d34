//! Map presentation rules: marker tones and selection.

use serde::{Deserialize, Serialize};

use crate::domain::{AreaSnapshot, CityEvent, Sentiment};

/// Marker tone, from most to least urgent: alert (red), watch
/// (orange), calm (green), neutral (blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTone {
    Alert,
    Watch,
    Calm,
    Neutral,
}

impl MarkerTone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Watch => "watch",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
        }
    }
}

/// Tone of an event pin: sentiment wins, then high severity.
#[must_use]
pub fn pin_tone(event: &CityEvent) -> MarkerTone {
    match event.sentiment {
        Sentiment::Positive => MarkerTone::Calm,
        Sentiment::Negative => MarkerTone::Alert,
        Sentiment::Neutral => {
            if event.severity.is_high() {
                MarkerTone::Watch
            } else {
                MarkerTone::Neutral
            }
        }
    }
}

/// Tone of an area marker: alert on a hot area (3+ tweets, 3+ news
/// items, or rain), watch on light activity, calm otherwise.
#[must_use]
pub fn area_tone(area: &AreaSnapshot) -> MarkerTone {
    let raining = area.weather.to_lowercase().contains("rain");
    if area.tweet_count >= 3 || area.news_count >= 3 || raining {
        MarkerTone::Alert
    } else if (1..3).contains(&area.tweet_count) || (1..3).contains(&area.news_count) {
        MarkerTone::Watch
    } else {
        MarkerTone::Calm
    }
}

/// Pin and area selection are independent; selecting the selected
/// marker again clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MapSelection {
    pub event_id: Option<String>,
    pub area_name: Option<String>,
}

impl MapSelection {
    pub fn toggle_event(&mut self, id: &str) {
        if self.event_id.as_deref() == Some(id) {
            self.event_id = None;
        } else {
            self.event_id = Some(id.to_string());
        }
    }

    pub fn toggle_area(&mut self, name: &str) {
        if self.area_name.as_deref() == Some(name) {
            self.area_name = None;
        } else {
            self.area_name = Some(name.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.event_id = None;
        self.area_name = None;
    }
}
