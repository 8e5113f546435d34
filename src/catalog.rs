//! Static catalog: the seeded city events, stories, news feed and map
//! areas the dashboard shows before (and alongside) remote data.
//!
//! Identifiers are stable so bookmarks and selections survive
//! re-derivation of the lists.

use crate::domain::{
    AreaSnapshot, CityEvent, EventKind, NewsItem, NewsKind, PercentPoint, Sentiment, Severity,
    Story,
};
use crate::UnixTimeMs;

/// Categories offered by the compact dashboard filter, `All` first.
pub const EVENT_CATEGORIES: [&str; 7] = [
    "All",
    "Transportation",
    "Technology",
    "Weather",
    "Business",
    "Sports",
    "Culture",
];

/// Categories offered by the news-feed filter panel, `All` first.
pub const NEWS_FEED_CATEGORIES: [&str; 7] = [
    "All",
    "Infrastructure",
    "Technology",
    "Transportation",
    "Business",
    "Sports",
    "Weather",
];

/// Shelves for the top-stories panel; `all` plus single categories.
pub const STORY_SHELVES: [&str; 6] = [
    "all",
    "Transportation",
    "Technology",
    "Weather",
    "Business",
    "Sports",
];

#[must_use]
pub fn city_events() -> Vec<CityEvent> {
    vec![
        CityEvent {
            id: "1".into(),
            title: "Traffic Jam on MG Road".into(),
            location: "MG Road, Bangalore".into(),
            kind: EventKind::Traffic,
            severity: Severity::High,
            sentiment: Sentiment::Negative,
            coordinates: PercentPoint::new(45, 60),
            time: "2 hours ago".into(),
            description: "Heavy traffic congestion due to ongoing construction work.".into(),
            category: "Transportation".into(),
            tags: vec!["traffic".into(), "construction".into(), "delay".into()],
        },
        CityEvent {
            id: "2".into(),
            title: "Tech Conference at UB City".into(),
            location: "UB City Mall, Bangalore".into(),
            kind: EventKind::Event,
            severity: Severity::Medium,
            sentiment: Sentiment::Positive,
            coordinates: PercentPoint::new(35, 40),
            time: "4 hours ago".into(),
            description: "Annual tech conference with 500+ attendees.".into(),
            category: "Technology".into(),
            tags: vec!["tech".into(), "conference".into(), "networking".into()],
        },
        CityEvent {
            id: "3".into(),
            title: "Flood Alert - Outer Ring Road".into(),
            location: "Outer Ring Road, Bangalore".into(),
            kind: EventKind::Emergency,
            severity: Severity::High,
            sentiment: Sentiment::Negative,
            coordinates: PercentPoint::new(70, 30),
            time: "1 hour ago".into(),
            description: "Heavy rainfall causing waterlogging in the area.".into(),
            category: "Weather".into(),
            tags: vec!["flood".into(), "rain".into(), "emergency".into()],
        },
        CityEvent {
            id: "4".into(),
            title: "New Metro Station Opening".into(),
            location: "Whitefield, Bangalore".into(),
            kind: EventKind::News,
            severity: Severity::Low,
            sentiment: Sentiment::Positive,
            coordinates: PercentPoint::new(80, 70),
            time: "6 hours ago".into(),
            description: "New metro station inaugurated to improve connectivity.".into(),
            category: "Transportation".into(),
            tags: vec!["metro".into(), "opening".into(), "connectivity".into()],
        },
        CityEvent {
            id: "5".into(),
            title: "Food Festival at Lalbagh".into(),
            location: "Lalbagh Botanical Garden".into(),
            kind: EventKind::Event,
            severity: Severity::Low,
            sentiment: Sentiment::Positive,
            coordinates: PercentPoint::new(25, 55),
            time: "3 hours ago".into(),
            description: "Weekend food festival featuring local cuisines.".into(),
            category: "Culture".into(),
            tags: vec!["food".into(), "festival".into(), "weekend".into()],
        },
    ]
}

#[must_use]
pub fn stories() -> Vec<Story> {
    vec![
        Story {
            id: "1".into(),
            title: "Bangalore Metro Phase 3 Construction Begins".into(),
            summary: "The much-awaited Phase 3 of Bangalore Metro has officially commenced \
                      with groundbreaking ceremony at multiple locations across the city."
                .into(),
            source: "Bangalore Mirror".into(),
            published_at: "2 hours ago".into(),
            views: 15420,
            category: "Transportation".into(),
            image_url: "https://images.pexels.com/photos/4515956/pexels-photo-4515956.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            sentiment: Sentiment::Positive,
        },
        Story {
            id: "2".into(),
            title: "Tech Giants Expand Operations in Electronic City".into(),
            summary: "Major technology companies announce significant expansion plans in \
                      Electronic City, promising to create over 10,000 new jobs in the next \
                      two years."
                .into(),
            source: "Tech Today".into(),
            published_at: "4 hours ago".into(),
            views: 8930,
            category: "Technology".into(),
            image_url: "https://images.pexels.com/photos/1181467/pexels-photo-1181467.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            sentiment: Sentiment::Positive,
        },
        Story {
            id: "3".into(),
            title: "Bangalore Weather Alert: Heavy Rains Expected".into(),
            summary: "Meteorological department issues yellow alert for Bangalore as heavy \
                      monsoon rains are expected to hit the city over the next 48 hours."
                .into(),
            source: "Weather Central".into(),
            published_at: "1 hour ago".into(),
            views: 12350,
            category: "Weather".into(),
            image_url: "https://images.pexels.com/photos/1118873/pexels-photo-1118873.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            sentiment: Sentiment::Neutral,
        },
        Story {
            id: "4".into(),
            title: "New Startup Hub Opens in Koramangala".into(),
            summary: "A state-of-the-art startup incubation center opens in Koramangala, \
                      offering co-working spaces and mentorship programs for emerging \
                      entrepreneurs."
                .into(),
            source: "Startup News".into(),
            published_at: "6 hours ago".into(),
            views: 5670,
            category: "Business".into(),
            image_url: "https://images.pexels.com/photos/1595391/pexels-photo-1595391.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            sentiment: Sentiment::Positive,
        },
        Story {
            id: "5".into(),
            title: "Bangalore FC Reaches AFC Cup Finals".into(),
            summary: "Local football club Bangalore FC secures their spot in the AFC Cup \
                      finals after a thrilling 2-1 victory against regional rivals."
                .into(),
            source: "Sports Tribune".into(),
            published_at: "8 hours ago".into(),
            views: 9240,
            category: "Sports".into(),
            image_url: "https://images.pexels.com/photos/274506/pexels-photo-274506.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
            sentiment: Sentiment::Positive,
        },
    ]
}

#[must_use]
pub fn news_feed() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "1".into(),
            title: "Water Supply Disruption in Whitefield".into(),
            description: "BWSSB announces 12-hour water supply disruption due to pipeline \
                          maintenance work in Whitefield area."
                .into(),
            category: "Infrastructure".into(),
            location: "Whitefield".into(),
            // 2025-01-03T10:00:00Z
            published_at: UnixTimeMs::new(1_735_898_400_000),
            tags: vec!["water".into(), "maintenance".into(), "disruption".into()],
            severity: Severity::Medium,
            kind: NewsKind::Alert,
        },
        NewsItem {
            id: "2".into(),
            title: "Annual Tech Summit at Palace Grounds".into(),
            description: "Three-day technology summit featuring AI, blockchain, and cloud \
                          computing experts from around the world."
                .into(),
            category: "Technology".into(),
            location: "Palace Grounds".into(),
            // 2025-01-02T14:30:00Z
            published_at: UnixTimeMs::new(1_735_828_200_000),
            tags: vec![
                "tech".into(),
                "summit".into(),
                "AI".into(),
                "blockchain".into(),
            ],
            severity: Severity::Low,
            kind: NewsKind::Event,
        },
        NewsItem {
            id: "3".into(),
            title: "Traffic Advisory: MG Road Closure".into(),
            description: "MG Road will be closed from 6 AM to 10 AM tomorrow for metro \
                          construction work. Alternative routes suggested."
                .into(),
            category: "Transportation".into(),
            location: "MG Road".into(),
            // 2025-01-02T16:45:00Z
            published_at: UnixTimeMs::new(1_735_836_300_000),
            tags: vec![
                "traffic".into(),
                "closure".into(),
                "metro".into(),
                "construction".into(),
            ],
            severity: Severity::High,
            kind: NewsKind::Alert,
        },
        NewsItem {
            id: "4".into(),
            title: "New IT Park Opens in Electronic City".into(),
            description: "State-of-the-art IT park with sustainable design opens in \
                          Electronic City Phase 2, creating 5000 new jobs."
                .into(),
            category: "Business".into(),
            location: "Electronic City".into(),
            // 2025-01-01T09:15:00Z
            published_at: UnixTimeMs::new(1_735_722_900_000),
            tags: vec![
                "IT".into(),
                "jobs".into(),
                "opening".into(),
                "sustainable".into(),
            ],
            severity: Severity::Low,
            kind: NewsKind::News,
        },
        NewsItem {
            id: "5".into(),
            title: "Bangalore Marathon 2025 Registration Open".into(),
            description: "Registration for the annual Bangalore Marathon is now open. Event \
                          scheduled for February 15, 2025."
                .into(),
            category: "Sports".into(),
            location: "City Wide".into(),
            // 2025-01-01T12:00:00Z
            published_at: UnixTimeMs::new(1_735_732_800_000),
            tags: vec![
                "marathon".into(),
                "sports".into(),
                "registration".into(),
                "fitness".into(),
            ],
            severity: Severity::Low,
            kind: NewsKind::Event,
        },
    ]
}

#[must_use]
pub fn areas() -> Vec<AreaSnapshot> {
    vec![
        AreaSnapshot {
            id: 1,
            name: "Koramangala".into(),
            latitude: 12.9352,
            longitude: 77.6245,
            weather: "Heavy Rain".into(),
            temperature_c: 24,
            tweet_count: 5,
            news_count: 2,
        },
        AreaSnapshot {
            id: 2,
            name: "Hebbal".into(),
            latitude: 13.0358,
            longitude: 77.5970,
            weather: "Cloudy".into(),
            temperature_c: 26,
            tweet_count: 1,
            news_count: 1,
        },
        AreaSnapshot {
            id: 3,
            name: "Silk Board".into(),
            latitude: 12.9172,
            longitude: 77.6238,
            weather: "Clear".into(),
            temperature_c: 30,
            tweet_count: 3,
            news_count: 4,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let events: HashSet<_> = city_events().into_iter().map(|e| e.id).collect();
        assert_eq!(events.len(), 5);
        let stories: HashSet<_> = stories().into_iter().map(|s| s.id).collect();
        assert_eq!(stories.len(), 5);
        let news: HashSet<_> = news_feed().into_iter().map(|n| n.id).collect();
        assert_eq!(news.len(), 5);
    }

    #[test]
    fn event_coordinates_stay_on_map() {
        assert!(city_events().iter().all(|e| e.coordinates.is_on_map()));
    }

    #[test]
    fn every_event_category_is_offered_by_the_filter() {
        let events = city_events();
        for event in &events {
            assert!(
                EVENT_CATEGORIES.contains(&event.category.as_str()),
                "unlisted category {}",
                event.category
            );
        }
    }

    #[test]
    fn news_feed_sorts_under_known_categories() {
        for item in news_feed() {
            assert!(NEWS_FEED_CATEGORIES.contains(&item.category.as_str()));
        }
    }

    #[test]
    fn sentinel_comes_first() {
        assert_eq!(EVENT_CATEGORIES[0], "All");
        assert_eq!(NEWS_FEED_CATEGORIES[0], "All");
        assert_eq!(STORY_SHELVES[0], "all");
    }
}
