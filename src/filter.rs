//! Filtering: free-text search plus category, severity and date-range
//! predicates.
//!
//! An item is shown only when every active predicate matches. Empty
//! selections match everything, and the sentinel `All` category clears
//! the category set rather than joining it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{CityEvent, NewsItem, Severity, Story};
use crate::UnixTimeMs;

const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Sentinel category that clears the selection.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const ALL_RANGES: [Self; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Oldest publish instant still inside the range, relative to `now`.
    #[must_use]
    pub fn cutoff(self, now: UnixTimeMs) -> Option<UnixTimeMs> {
        let days = match self {
            Self::All => return None,
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
        };
        Some(UnixTimeMs::new(
            now.as_millis().saturating_sub(days * MS_PER_DAY),
        ))
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub query: String,
    pub categories: HashSet<String>,
    pub severities: HashSet<Severity>,
    pub date_range: DateRange,
}

impl FilterState {
    /// Toggles category membership. The sentinel clears the whole set.
    pub fn toggle_category(&mut self, category: &str) {
        if category == ALL_CATEGORIES {
            self.categories.clear();
        } else if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    pub fn toggle_severity(&mut self, severity: Severity) {
        if !self.severities.remove(&severity) {
            self.severities.insert(severity);
        }
    }

    /// Resets query, categories and severities in one action.
    pub fn clear(&mut self) {
        self.query.clear();
        self.categories.clear();
        self.severities.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.categories.is_empty()
            && self.severities.is_empty()
            && self.date_range == DateRange::All
    }

    fn matches_text(&self, fields: &[&str]) -> bool {
        let needle = self.query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.contains(category)
    }

    fn matches_severity(&self, severity: Severity) -> bool {
        self.severities.is_empty() || self.severities.contains(&severity)
    }

    /// Compact dashboard variant: title/description search plus
    /// category membership.
    #[must_use]
    pub fn matches_event(&self, event: &CityEvent) -> bool {
        self.matches_text(&[&event.title, &event.description])
            && self.matches_category(&event.category)
    }

    /// Compact dashboard variant for story cards.
    #[must_use]
    pub fn matches_story(&self, story: &Story) -> bool {
        self.matches_text(&[&story.title, &story.summary])
            && self.matches_category(&story.category)
    }

    /// News-feed variant: search also covers tags, and severity and
    /// date-range predicates apply.
    #[must_use]
    pub fn matches_news(&self, item: &NewsItem, now: UnixTimeMs) -> bool {
        let needle = self.query.to_lowercase();
        let text_ok = needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle)
            || item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));

        let date_ok = match self.date_range.cutoff(now) {
            None => true,
            Some(cutoff) => item.published_at >= cutoff,
        };

        text_ok
            && self.matches_category(&item.category)
            && self.matches_severity(item.severity)
            && date_ok
    }
}

/// Headline stats for the summary panel, computed over the events
/// currently visible through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventStats {
    pub positive: usize,
    pub total: usize,
    pub traffic: usize,
    pub high_severity: usize,
}

impl EventStats {
    #[must_use]
    pub fn compute<'a>(events: impl IntoIterator<Item = &'a CityEvent>) -> Self {
        let mut stats = Self::default();
        for event in events {
            stats.total += 1;
            if event.sentiment.is_positive() {
                stats.positive += 1;
            }
            if event.kind.is_traffic() {
                stats.traffic += 1;
            }
            if event.severity.is_high() {
                stats.high_severity += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    fn now() -> UnixTimeMs {
        // 2025-01-03T12:00:00Z, shortly after the newest catalog item
        UnixTimeMs::new(1_735_905_600_000)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FilterState::default();
        assert!(catalog::city_events().iter().all(|e| filter.matches_event(e)));
        assert!(catalog::stories().iter().all(|s| filter.matches_story(s)));
        assert!(catalog::news_feed()
            .iter()
            .all(|n| filter.matches_news(n, now())));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut filter = FilterState::default();
        filter.query = "TRAFFIC".into();

        let shown: Vec<_> = catalog::city_events()
            .into_iter()
            .filter(|e| filter.matches_event(e))
            .map(|e| e.id)
            .collect();
        assert_eq!(shown, vec!["1".to_string()]);
    }

    #[test]
    fn search_matches_description_too() {
        let mut filter = FilterState::default();
        filter.query = "waterlogging".into();

        let shown: Vec<_> = catalog::city_events()
            .into_iter()
            .filter(|e| filter.matches_event(e))
            .map(|e| e.id)
            .collect();
        assert_eq!(shown, vec!["3".to_string()]);
    }

    #[test]
    fn news_feed_search_covers_tags() {
        let mut filter = FilterState::default();
        filter.query = "blockchain".into();

        let shown: Vec<_> = catalog::news_feed()
            .into_iter()
            .filter(|n| filter.matches_news(n, now()))
            .map(|n| n.id)
            .collect();
        assert_eq!(shown, vec!["2".to_string()]);
    }

    #[test]
    fn category_selection_is_set_membership() {
        let mut filter = FilterState::default();
        filter.toggle_category("Transportation");
        filter.toggle_category("Weather");

        let shown: Vec<_> = catalog::city_events()
            .into_iter()
            .filter(|e| filter.matches_event(e))
            .map(|e| e.id)
            .collect();
        assert_eq!(shown, vec!["1".to_string(), "3".to_string(), "4".to_string()]);
    }

    #[test]
    fn sentinel_clears_category_selection() {
        let mut filter = FilterState::default();
        filter.toggle_category("Weather");
        filter.toggle_category("Sports");
        filter.toggle_category(ALL_CATEGORIES);
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn severity_multi_select() {
        let mut filter = FilterState::default();
        filter.toggle_severity(Severity::High);

        let shown: Vec<_> = catalog::news_feed()
            .into_iter()
            .filter(|n| filter.matches_news(n, now()))
            .map(|n| n.id)
            .collect();
        assert_eq!(shown, vec!["3".to_string()]);
    }

    #[test]
    fn date_range_narrows_the_feed() {
        let mut filter = FilterState::default();
        filter.date_range = DateRange::Today;

        let shown: Vec<_> = catalog::news_feed()
            .into_iter()
            .filter(|n| filter.matches_news(n, now()))
            .map(|n| n.id)
            .collect();
        // Everything published after Jan 2 12:00 is inside the last day.
        assert_eq!(
            shown,
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );

        filter.date_range = DateRange::Month;
        assert_eq!(
            catalog::news_feed()
                .iter()
                .filter(|n| filter.matches_news(n, now()))
                .count(),
            5
        );
    }

    #[test]
    fn clear_resets_query_categories_and_severities() {
        let mut filter = FilterState {
            query: "metro".into(),
            ..FilterState::default()
        };
        filter.toggle_category("Weather");
        filter.toggle_severity(Severity::Low);
        filter.date_range = DateRange::Week;

        filter.clear();
        assert!(filter.query.is_empty());
        assert!(filter.categories.is_empty());
        assert!(filter.severities.is_empty());
        // Date range is a select, not part of clear-all.
        assert_eq!(filter.date_range, DateRange::Week);
    }

    #[test]
    fn stats_over_the_full_catalog() {
        let events = catalog::city_events();
        let stats = EventStats::compute(&events);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.positive, 3);
        assert_eq!(stats.traffic, 1);
        assert_eq!(stats.high_severity, 2);
    }

    proptest! {
        #[test]
        fn toggling_a_category_twice_is_identity(name in "[A-Za-z]{1,12}") {
            prop_assume!(name != ALL_CATEGORIES);
            let mut filter = FilterState::default();
            filter.toggle_category("Weather");

            let before = filter.categories.clone();
            filter.toggle_category(&name);
            filter.toggle_category(&name);
            prop_assert_eq!(filter.categories, before);
        }

        #[test]
        fn query_casing_never_changes_results(query in "[a-zA-Z ]{0,16}") {
            let lower = FilterState { query: query.to_lowercase(), ..FilterState::default() };
            let upper = FilterState { query: query.to_uppercase(), ..FilterState::default() };
            for event in catalog::city_events() {
                prop_assert_eq!(lower.matches_event(&event), upper.matches_event(&event));
            }
        }

        #[test]
        fn empty_category_set_matches_all_categories(queryless in proptest::bool::ANY) {
            let _ = queryless;
            let filter = FilterState::default();
            for item in catalog::news_feed() {
                prop_assert!(filter.matches_news(&item, now()));
            }
        }
    }
}
