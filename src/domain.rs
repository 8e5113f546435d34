//! Domain vocabulary: the closed enums and item types everything else
//! is built from.
//!
//! Every enum here is a closed set. Wire values outside the set fail
//! deserialization; there is deliberately no catch-all variant.

use serde::{Deserialize, Serialize};

use crate::UnixTimeMs;

/// The seven dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Summary,
    Stories,
    Filter,
    Chat,
    Upload,
    Map,
    Profile,
}

impl Panel {
    pub const ALL: [Self; 7] = [
        Self::Summary,
        Self::Stories,
        Self::Filter,
        Self::Chat,
        Self::Upload,
        Self::Map,
        Self::Profile,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Stories => "stories",
            Self::Filter => "filter",
            Self::Chat => "chat",
            Self::Upload => "upload",
            Self::Map => "map",
            Self::Profile => "profile",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Stories => "Top Stories",
            Self::Filter => "Filter News",
            Self::Chat => "Assistant",
            Self::Upload => "Upload Event",
            Self::Map => "City Map",
            Self::Profile => "Profile",
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::Summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

/// Kind of a map event pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Traffic,
    Event,
    News,
    Emergency,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traffic => "traffic",
            Self::Event => "event",
            Self::News => "news",
            Self::Emergency => "emergency",
        }
    }

    #[must_use]
    pub const fn is_traffic(self) -> bool {
        matches!(self, Self::Traffic)
    }
}

/// Kind of an item in the filterable news feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKind {
    News,
    Event,
    Alert,
}

impl NewsKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Event => "event",
            Self::Alert => "alert",
        }
    }
}

/// Position on the stylized city map, in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: u8,
    pub y: u8,
}

impl PercentPoint {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn is_on_map(self) -> bool {
        self.x <= 100 && self.y <= 100
    }
}

/// A live city event shown on the map and in the quick filter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEvent {
    pub id: String,
    pub title: String,
    pub location: String,
    pub kind: EventKind,
    pub severity: Severity,
    pub sentiment: Sentiment,
    pub coordinates: PercentPoint,
    pub time: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// A top story card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
    pub views: u32,
    pub category: String,
    pub image_url: String,
    pub sentiment: Sentiment,
}

/// An item in the filterable news feed, with a real publish instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub published_at: UnixTimeMs,
    pub tags: Vec<String>,
    pub severity: Severity,
    pub kind: NewsKind,
}

/// A monitored area on the mood map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub id: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub weather: String,
    pub temperature_c: i32,
    pub tweet_count: u32,
    pub news_count: u32,
}
