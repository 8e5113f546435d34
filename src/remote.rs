//! Wire types for the two remote datasets and the derived dashboard
//! status.
//!
//! Parsing is strict: unknown mood values fail, and the summary map
//! keeps its key order because the first category is the initially
//! active tab.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

impl Mood {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub description: String,
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    pub humidity: f64,
    pub wind_speed_kph: f64,
    #[serde(rename = "feelslike_C")]
    pub feelslike_c: f64,
}

/// One area record from the mood endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMood {
    pub news_summary: String,
    pub mood: Mood,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
    pub weather: WeatherSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryDigest {
    pub summary: Vec<String>,
    #[serde(default)]
    pub alerts: Option<String>,
}

impl CategoryDigest {
    /// Alert text worth showing: non-empty after trimming.
    #[must_use]
    pub fn trimmed_alert(&self) -> Option<&str> {
        self.alerts
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// The summary dataset: category name to digest, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryData(Vec<(String, CategoryDigest)>);

impl SummaryData {
    #[must_use]
    pub fn new(entries: Vec<(String, CategoryDigest)>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn first_category(&self) -> Option<&str> {
        self.0.first().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryDigest> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, digest)| digest)
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|(name, _)| name == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SummaryData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, digest) in &self.0 {
            map.serialize_entry(name, digest)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SummaryData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor;

        impl<'de> Visitor<'de> for OrderedMapVisitor {
            type Value = SummaryData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map of category name to digest")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, CategoryDigest)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, digest)) = access.next_entry::<String, CategoryDigest>()? {
                    if entries.iter().any(|(existing, _)| existing == &name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate category: {name}"
                        )));
                    }
                    entries.push((name, digest));
                }
                Ok(SummaryData(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor)
    }
}

/// Both datasets are required before the dashboard is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    Loading,
    Error,
    Ready,
}

/// State of the boot-time fetches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteState {
    /// Latches after the first boot; fetches are single-attempt.
    pub started: bool,
    pub summary: Option<SummaryData>,
    pub moods: Option<Vec<AreaMood>>,
    pub error: Option<AppError>,
    /// Active summary tab; seeded with the first fetched category.
    pub active_category: Option<String>,
}

impl RemoteState {
    #[must_use]
    pub fn status(&self) -> DashboardStatus {
        if self.error.is_some() {
            DashboardStatus::Error
        } else if self.summary.is_some() && self.moods.is_some() {
            DashboardStatus::Ready
        } else {
            DashboardStatus::Loading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY_JSON: &str = r#"{
        "Traffic": {"summary": ["MG Road congested"], "alerts": "Avoid ORR"},
        "Weather": {"summary": ["Cloudy, 26C"]},
        "Civic": {"summary": [], "alerts": "  "}
    }"#;

    #[test]
    fn summary_preserves_key_order() {
        let data: SummaryData = serde_json::from_str(SUMMARY_JSON).unwrap();
        let categories: Vec<_> = data.categories().collect();
        assert_eq!(categories, vec!["Traffic", "Weather", "Civic"]);
        assert_eq!(data.first_category(), Some("Traffic"));
    }

    #[test]
    fn summary_round_trips_in_order() {
        let data: SummaryData = serde_json::from_str(SUMMARY_JSON).unwrap();
        let json = serde_json::to_string(&data).unwrap();
        let back: SummaryData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn duplicate_categories_are_rejected() {
        let json = r#"{"A": {"summary": []}, "A": {"summary": []}}"#;
        assert!(serde_json::from_str::<SummaryData>(json).is_err());
    }

    #[test]
    fn blank_alerts_are_not_worth_showing() {
        let data: SummaryData = serde_json::from_str(SUMMARY_JSON).unwrap();
        assert_eq!(data.get("Traffic").unwrap().trimmed_alert(), Some("Avoid ORR"));
        assert_eq!(data.get("Weather").unwrap().trimmed_alert(), None);
        assert_eq!(data.get("Civic").unwrap().trimmed_alert(), None);
    }

    #[test]
    fn unknown_mood_is_rejected() {
        let json = r#"{
            "news_summary": "quiet day",
            "mood": "ecstatic",
            "area": "Hebbal",
            "latitude": 13.0,
            "longitude": 77.6,
            "weather": {
                "description": "clear",
                "temperature_C": 28.0,
                "humidity": 40.0,
                "wind_speed_kph": 8.0,
                "feelslike_C": 29.5
            }
        }"#;
        assert!(serde_json::from_str::<AreaMood>(json).is_err());
    }

    #[test]
    fn area_mood_parses_the_wire_field_names() {
        let json = r#"{
            "news_summary": "flooding near the lake",
            "mood": "negative",
            "area": "Koramangala",
            "latitude": 12.9352,
            "longitude": 77.6245,
            "weather": {
                "description": "heavy rain",
                "temperature_C": 24.0,
                "humidity": 90.0,
                "wind_speed_kph": 14.0,
                "feelslike_C": 26.0
            }
        }"#;
        let mood: AreaMood = serde_json::from_str(json).unwrap();
        assert_eq!(mood.mood, Mood::Negative);
        assert!((mood.weather.temperature_c - 24.0).abs() < f64::EPSILON);
        assert!((mood.weather.feelslike_c - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn status_requires_both_datasets() {
        let mut remote = RemoteState::default();
        assert_eq!(remote.status(), DashboardStatus::Loading);

        remote.summary = Some(SummaryData::new(vec![(
            "Traffic".into(),
            CategoryDigest::default(),
        )]));
        assert_eq!(remote.status(), DashboardStatus::Loading);

        remote.moods = Some(vec![]);
        assert_eq!(remote.status(), DashboardStatus::Ready);

        remote.error = Some(AppError::new(crate::ErrorKind::Network, "offline"));
        assert_eq!(remote.status(), DashboardStatus::Error);
    }
}
