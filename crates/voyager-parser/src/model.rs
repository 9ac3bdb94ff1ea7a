// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on activities for any single day.
pub const MAX_ACTIVITIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportationType {
    Driving,
    Walking,
    Cycling,
    PublicTransit,
    Flight,
    #[default]
    Mixed,
}

impl TransportationType {
    /// Detection order. When two modes score the same, the earlier one wins.
    pub const PRIORITY: [TransportationType; 5] = [
        TransportationType::Driving,
        TransportationType::Walking,
        TransportationType::Cycling,
        TransportationType::PublicTransit,
        TransportationType::Flight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportationType::Driving => "driving",
            TransportationType::Walking => "walking",
            TransportationType::Cycling => "cycling",
            TransportationType::PublicTransit => "public_transit",
            TransportationType::Flight => "flight",
            TransportationType::Mixed => "mixed",
        }
    }

    /// Like `FromStr`, but unknown values degrade to `Mixed`.
    pub fn from_str_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::warn!(
                "[Model] Unknown transportation type: {:?}, defaulting to mixed",
                value
            );
            TransportationType::Mixed
        })
    }
}

impl fmt::Display for TransportationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown transportation type: {0}")]
pub struct UnknownTransportation(pub String);

impl FromStr for TransportationType {
    type Err = UnknownTransportation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Ok(TransportationType::Driving),
            "walking" => Ok(TransportationType::Walking),
            "cycling" => Ok(TransportationType::Cycling),
            "public_transit" | "public transit" => Ok(TransportationType::PublicTransit),
            "flight" => Ok(TransportationType::Flight),
            "mixed" => Ok(TransportationType::Mixed),
            _ => Err(UnknownTransportation(s.to_string())),
        }
    }
}

// LLM output is not trusted to use our exact spelling.
impl<'de> Deserialize<'de> for TransportationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TransportationType::from_str_lossy(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Day must be positive number, got {0}")]
    NonPositiveDay(i64),
    #[error("Day number {0} is out of range")]
    DayOutOfRange(i64),
    #[error("Location cannot be empty")]
    EmptyLocation,
    #[error("Activities list for day {day} cannot be empty")]
    NoActivities { day: u32 },
    #[error("Day {day} has {count} activities, at most {max} allowed")]
    TooManyActivities { day: u32, count: usize, max: usize },
    #[error("Itinerary must contain at least one day")]
    EmptyItinerary,
    #[error("Duration must be at least 1 day, got {0}")]
    NonPositiveDuration(i64),
    #[error("Itinerary length ({days}) must match duration_days ({duration})")]
    DurationMismatch { duration: u32, days: usize },
    #[error("Days must be sequential: expected {expected:?}, got {got:?}. Missing days: {missing:?}. Duplicate days: {duplicates:?}")]
    NonSequentialDays {
        expected: Vec<u32>,
        got: Vec<u32>,
        missing: Vec<u32>,
        duplicates: Vec<u32>,
    },
    #[error("Original request cannot be empty")]
    EmptyRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItineraryDay")]
pub struct ItineraryDay {
    day: u32,
    location: String,
    activities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accommodation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget_estimate: Option<String>,
}

#[derive(Deserialize)]
struct RawItineraryDay {
    day: i64,
    location: String,
    activities: Vec<String>,
    #[serde(default)]
    accommodation: Option<String>,
    #[serde(default)]
    budget_estimate: Option<String>,
}

impl TryFrom<RawItineraryDay> for ItineraryDay {
    type Error = ValidationError;

    fn try_from(raw: RawItineraryDay) -> Result<Self, Self::Error> {
        let mut day = ItineraryDay::validated(raw.day, raw.location, raw.activities)?;
        day.accommodation = non_blank(raw.accommodation);
        day.budget_estimate = non_blank(raw.budget_estimate);
        Ok(day)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ItineraryDay {
    /// Builds a day, trimming the location and every activity. Blank
    /// activities are dropped before the count is checked.
    pub fn new<L, I, S>(day: u32, location: L, activities: I) -> Result<Self, ValidationError>
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::validated(
            i64::from(day),
            location.into(),
            activities.into_iter().map(Into::into).collect(),
        )
    }

    fn validated(
        day: i64,
        location: String,
        activities: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if day < 1 {
            return Err(ValidationError::NonPositiveDay(day));
        }
        let day = u32::try_from(day).map_err(|_| ValidationError::DayOutOfRange(day))?;

        let location = location.trim().to_string();
        if location.is_empty() {
            return Err(ValidationError::EmptyLocation);
        }

        let activities: Vec<String> = activities
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if activities.is_empty() {
            return Err(ValidationError::NoActivities { day });
        }
        if activities.len() > MAX_ACTIVITIES {
            return Err(ValidationError::TooManyActivities {
                day,
                count: activities.len(),
                max: MAX_ACTIVITIES,
            });
        }

        Ok(Self {
            day,
            location,
            activities,
            accommodation: None,
            budget_estimate: None,
        })
    }

    pub fn with_accommodation(mut self, accommodation: impl Into<String>) -> Self {
        self.accommodation = non_blank(Some(accommodation.into()));
        self
    }

    pub fn with_budget_estimate(mut self, budget: impl Into<String>) -> Self {
        self.budget_estimate = non_blank(Some(budget.into()));
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    pub fn accommodation(&self) -> Option<&str> {
        self.accommodation.as_deref()
    }

    pub fn budget_estimate(&self) -> Option<&str> {
        self.budget_estimate.as_deref()
    }
}

/// Which stage of the parse pipeline produced an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    Ai,
    Manual,
    Fallback,
    #[default]
    Unknown,
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserKind::Ai => "ai",
            ParserKind::Manual => "manual",
            ParserKind::Fallback => "fallback",
            ParserKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Where an itinerary came from. The id and timestamp are only present once
/// a caller stamps the record, so parsing itself stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRequestMetadata")]
pub struct RequestMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    original_request: String,
    parser_used: ParserKind,
}

#[derive(Deserialize)]
struct RawRequestMetadata {
    #[serde(default)]
    request_id: Option<Uuid>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    original_request: String,
    #[serde(default)]
    parser_used: ParserKind,
}

impl TryFrom<RawRequestMetadata> for RequestMetadata {
    type Error = ValidationError;

    fn try_from(raw: RawRequestMetadata) -> Result<Self, Self::Error> {
        let mut metadata = RequestMetadata::new(raw.original_request, raw.parser_used)?;
        metadata.request_id = raw.request_id;
        metadata.timestamp = raw.timestamp;
        Ok(metadata)
    }
}

impl RequestMetadata {
    pub fn new(
        original_request: impl Into<String>,
        parser_used: ParserKind,
    ) -> Result<Self, ValidationError> {
        let original_request = original_request.into().trim().to_string();
        if original_request.is_empty() {
            return Err(ValidationError::EmptyRequest);
        }
        Ok(Self {
            request_id: None,
            timestamp: None,
            original_request,
            parser_used,
        })
    }

    pub fn with_request_id(mut self, id: Uuid) -> Self {
        self.request_id = Some(id);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Fills in a fresh v4 id and the current time where missing.
    pub fn stamped(self) -> Self {
        Self {
            request_id: self.request_id.or_else(|| Some(Uuid::new_v4())),
            timestamp: self.timestamp.or_else(|| Some(Utc::now())),
            ..self
        }
    }

    pub fn request_id(&self) -> Option<Uuid> {
        self.request_id
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn original_request(&self) -> &str {
        &self.original_request
    }

    pub fn parser_used(&self) -> ParserKind {
        self.parser_used
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTravelItinerary")]
pub struct TravelItinerary {
    destination: String,
    duration_days: u32,
    transportation: TransportationType,
    itinerary: Vec<ItineraryDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<RequestMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

#[derive(Deserialize)]
struct RawTravelItinerary {
    destination: String,
    duration_days: i64,
    #[serde(default)]
    transportation: TransportationType,
    itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    metadata: Option<RequestMetadata>,
    #[serde(default)]
    session_summary: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl TryFrom<RawTravelItinerary> for TravelItinerary {
    type Error = ValidationError;

    fn try_from(raw: RawTravelItinerary) -> Result<Self, Self::Error> {
        if raw.duration_days < 1 {
            return Err(ValidationError::NonPositiveDuration(raw.duration_days));
        }
        let duration_days = u32::try_from(raw.duration_days)
            .map_err(|_| ValidationError::NonPositiveDuration(raw.duration_days))?;
        if raw.itinerary.len() != duration_days as usize {
            return Err(ValidationError::DurationMismatch {
                duration: duration_days,
                days: raw.itinerary.len(),
            });
        }
        check_sequence(&raw.itinerary)?;

        Ok(Self {
            destination: raw.destination.trim().to_string(),
            duration_days,
            transportation: raw.transportation,
            itinerary: raw.itinerary,
            metadata: raw.metadata,
            session_summary: non_blank(raw.session_summary),
            language: non_blank(raw.language),
        })
    }
}

/// Checks that the day numbers, sorted, are exactly `1..=len`.
pub fn check_sequence(days: &[ItineraryDay]) -> Result<(), ValidationError> {
    if days.is_empty() {
        return Err(ValidationError::EmptyItinerary);
    }

    let mut got: Vec<u32> = days.iter().map(ItineraryDay::day).collect();
    got.sort_unstable();
    let expected: Vec<u32> = (1..=days.len() as u32).collect();
    if got == expected {
        return Ok(());
    }

    let present: BTreeSet<u32> = got.iter().copied().collect();
    let missing = expected
        .iter()
        .copied()
        .filter(|d| !present.contains(d))
        .collect();
    let duplicates: Vec<u32> = got
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect();

    Err(ValidationError::NonSequentialDays {
        expected,
        got,
        missing,
        duplicates,
    })
}

impl TravelItinerary {
    /// `duration_days` is taken from the number of days supplied.
    pub fn new(
        destination: impl Into<String>,
        transportation: TransportationType,
        itinerary: Vec<ItineraryDay>,
    ) -> Result<Self, ValidationError> {
        check_sequence(&itinerary)?;
        let duration_days = u32::try_from(itinerary.len())
            .map_err(|_| ValidationError::DayOutOfRange(itinerary.len() as i64))?;

        Ok(Self {
            destination: destination.into().trim().to_string(),
            duration_days,
            transportation,
            itinerary,
            metadata: None,
            session_summary: None,
            language: None,
        })
    }

    pub fn with_metadata(mut self, metadata: RequestMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.language = language.map(str::to_string);
        self
    }

    pub fn with_session_summary(mut self, summary: impl Into<String>) -> Self {
        self.session_summary = non_blank(Some(summary.into()));
        self
    }

    /// Stamps the attached metadata, if any, with an id and time.
    pub fn stamped(mut self) -> Self {
        self.metadata = self.metadata.map(RequestMetadata::stamped);
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn transportation(&self) -> TransportationType {
        self.transportation
    }

    pub fn itinerary(&self) -> &[ItineraryDay] {
        &self.itinerary
    }

    pub fn into_days(self) -> Vec<ItineraryDay> {
        self.itinerary
    }

    pub fn metadata(&self) -> Option<&RequestMetadata> {
        self.metadata.as_ref()
    }

    pub fn session_summary(&self) -> Option<&str> {
        self.session_summary.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// One-line description, e.g. "2 days in Amsterdam (walking)".
    pub fn summary(&self) -> String {
        let unit = if self.duration_days == 1 { "day" } else { "days" };
        format!(
            "{} {} in {} ({})",
            self.duration_days, unit, self.destination, self.transportation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> ItineraryDay {
        ItineraryDay::new(n, "Test", [format!("Activity {}", n)]).unwrap()
    }

    #[test]
    fn test_day_trims_and_drops_blank_activities() {
        let d = ItineraryDay::new(1, "  Kyiv ", ["  Museum ", "   ", "Park"]).unwrap();
        assert_eq!(d.location(), "Kyiv");
        assert_eq!(d.activities(), ["Museum", "Park"]);
    }

    #[test]
    fn test_day_rejects_invalid_values() {
        assert_eq!(
            ItineraryDay::new(0, "Kyiv", ["Museum"]),
            Err(ValidationError::NonPositiveDay(0))
        );
        assert_eq!(
            ItineraryDay::new(1, "  ", ["Museum"]),
            Err(ValidationError::EmptyLocation)
        );
        assert_eq!(
            ItineraryDay::new(2, "Kyiv", ["  "]),
            Err(ValidationError::NoActivities { day: 2 })
        );
        let many: Vec<String> = (0..11).map(|i| format!("Stop {}", i)).collect();
        assert!(matches!(
            ItineraryDay::new(1, "Kyiv", many),
            Err(ValidationError::TooManyActivities { count: 11, .. })
        ));
    }

    #[test]
    fn test_itinerary_requires_sequential_days() {
        let ok = TravelItinerary::new("Test", TransportationType::Mixed, vec![day(2), day(1)]);
        assert_eq!(ok.unwrap().duration_days(), 2);

        match TravelItinerary::new("Test", TransportationType::Mixed, vec![day(1), day(3), day(3)])
        {
            Err(ValidationError::NonSequentialDays {
                missing,
                duplicates,
                ..
            }) => {
                assert_eq!(missing, vec![2]);
                assert_eq!(duplicates, vec![3]);
            }
            other => panic!("expected NonSequentialDays, got {:?}", other),
        }

        assert_eq!(
            TravelItinerary::new("Test", TransportationType::Mixed, vec![]),
            Err(ValidationError::EmptyItinerary)
        );
    }

    #[test]
    fn test_transportation_parsing() {
        assert_eq!(
            "Public_Transit".parse::<TransportationType>(),
            Ok(TransportationType::PublicTransit)
        );
        assert!("teleport".parse::<TransportationType>().is_err());
        assert_eq!(
            TransportationType::from_str_lossy("teleport"),
            TransportationType::Mixed
        );
        assert_eq!(TransportationType::Flight.to_string(), "flight");
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "destination": "Amsterdam",
            "duration_days": 2,
            "transportation": "Walking",
            "itinerary": [
                {"day": 1, "location": "Amsterdam", "activities": ["Van Gogh Museum"]},
                {"day": 2, "location": "Amsterdam", "activities": ["Anne Frank House"], "accommodation": "Hotel"}
            ]
        }"#;
        let it: TravelItinerary = serde_json::from_str(json).unwrap();
        assert_eq!(it.transportation(), TransportationType::Walking);
        assert_eq!(it.itinerary()[1].accommodation(), Some("Hotel"));
        assert!(it.metadata().is_none());

        let mismatch = json.replace("\"duration_days\": 2", "\"duration_days\": 3");
        let err = serde_json::from_str::<TravelItinerary>(&mismatch).unwrap_err();
        assert!(err.to_string().contains("must match duration_days"));

        let negative = r#"{"day": -1, "location": "X", "activities": ["Walk"]}"#;
        assert!(serde_json::from_str::<ItineraryDay>(negative).is_err());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let it = TravelItinerary::new("Lviv", TransportationType::PublicTransit, vec![day(1)])
            .unwrap()
            .with_metadata(RequestMetadata::new(" trip ", ParserKind::Manual).unwrap());
        let value = serde_json::to_value(&it).unwrap();
        assert_eq!(value["transportation"], "public_transit");
        assert_eq!(value["metadata"]["parser_used"], "manual");
        assert_eq!(value["metadata"]["original_request"], "trip");
        assert!(value.get("language").is_none());
    }

    #[test]
    fn test_metadata_stamping_is_explicit() {
        let plain = RequestMetadata::new("trip", ParserKind::Ai).unwrap();
        assert_eq!(plain.request_id(), None);
        assert_eq!(plain.timestamp(), None);
        assert_eq!(plain, RequestMetadata::new("trip", ParserKind::Ai).unwrap());

        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("request_id").is_none());

        let id = Uuid::new_v4();
        let stamped = plain.clone().with_request_id(id).stamped();
        assert_eq!(stamped.request_id(), Some(id));
        assert!(stamped.timestamp().is_some());

        let json = serde_json::to_string(&stamped).unwrap();
        let back: RequestMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamped);
    }

    #[test]
    fn test_metadata_rejects_blank_request() {
        assert_eq!(
            RequestMetadata::new("   ", ParserKind::Manual),
            Err(ValidationError::EmptyRequest)
        );
    }

    #[test]
    fn test_summary() {
        let it = TravelItinerary::new("Rome", TransportationType::Walking, vec![day(1)]).unwrap();
        assert_eq!(it.summary(), "1 day in Rome (walking)");
    }
}
