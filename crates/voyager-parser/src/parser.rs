// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::activity::ActivityExtractor;
use crate::config::{ConfigError, ParsingConfig};
use crate::day::DayParser;
use crate::destination::DestinationExtractor;
use crate::error::ParsingError;
use crate::model::{
    ItineraryDay, ParserKind, RequestMetadata, TravelItinerary, ValidationError,
};
use crate::normalizer::{detect_language, TextNormalizer};
use crate::patterns::ParsingPatterns;
use crate::transport::TransportationDetector;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub const UNKNOWN_DESTINATION: &str = "Unknown";
/// Activity given to a day that ends up with nothing usable.
pub const FREE_TIME: &str = "Free time";
/// Sole activity of the fallback day when the text yields none.
pub const PLAN_PLACEHOLDER: &str = "Plan your activities";

/// Activities grouped by the day number they were found under.
type DayBuckets = BTreeMap<u32, Vec<String>>;

/// Rule-based itinerary parser for free-form text.
///
/// Holds no per-call state: every `parse_itinerary_text` call is
/// independent, and a parser can be shared between threads.
pub struct ManualItineraryParser {
    config: Arc<ParsingConfig>,
    patterns: Arc<ParsingPatterns>,
    days: DayParser,
    activities: ActivityExtractor,
    destinations: DestinationExtractor,
    transport: TransportationDetector,
}

impl Default for ManualItineraryParser {
    fn default() -> Self {
        Self::from_parts(Arc::new(ParsingConfig::default()), ParsingPatterns::shared())
    }
}

impl ManualItineraryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParsingConfig) -> Result<Self, ConfigError> {
        Self::with_patterns(config, ParsingPatterns::shared())
    }

    pub fn with_patterns(
        config: ParsingConfig,
        patterns: Arc<ParsingPatterns>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(Arc::new(config), patterns))
    }

    /// Loads thresholds from a config file; a missing file means defaults.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        Self::with_config(ParsingConfig::load(path)?)
    }

    fn from_parts(config: Arc<ParsingConfig>, patterns: Arc<ParsingPatterns>) -> Self {
        Self {
            days: DayParser::new(Arc::clone(&patterns), Arc::clone(&config)),
            activities: ActivityExtractor::new(Arc::clone(&patterns), Arc::clone(&config)),
            destinations: DestinationExtractor::new(Arc::clone(&patterns), Arc::clone(&config)),
            transport: TransportationDetector::new(Arc::clone(&patterns)),
            config,
            patterns,
        }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn patterns(&self) -> &ParsingPatterns {
        &self.patterns
    }

    pub fn parse_itinerary_text(&self, text: &str) -> Result<TravelItinerary, ParsingError> {
        if text.trim().is_empty() {
            return Err(ParsingError::InvalidText(
                "Input text cannot be empty".to_string(),
            ));
        }
        log::debug!("[Parser] Parsing {} chars of itinerary text", text.len());

        let normalized = TextNormalizer::normalize(text);
        let lines: Vec<&str> = normalized.lines().collect();
        log::trace!("[Parser] {} lines after normalization", lines.len());

        let destination = self.destinations.extract_destination(&normalized);
        let transportation = self.transport.detect_transportation(&normalized);
        log::debug!(
            "[Parser] destination: {:?}, transportation: {}",
            destination,
            transportation
        );

        let location = destination.as_deref().unwrap_or(UNKNOWN_DESTINATION);
        let (buckets, saw_day_marker) = self.collect_day_buckets(&lines);
        let days = if saw_day_marker {
            self.build_itinerary_days(buckets, location)?
        } else {
            log::debug!("[Parser] No day structure found, building fallback day");
            vec![self.fallback_day(buckets.into_values().flatten().collect(), location)?]
        };
        log::debug!("[Parser] Built {} itinerary days", days.len());

        let metadata = RequestMetadata::new(text, ParserKind::Manual)?;
        Ok(TravelItinerary::new(location, transportation, days)?
            .with_language(detect_language(&normalized))
            .with_metadata(metadata))
    }

    /// Single pass over the lines. A day marker switches the current day;
    /// any other line that reads like an activity joins the current day, or
    /// a day inferred from the lines just above, or the default day.
    /// Also reports whether any day marker was seen.
    fn collect_day_buckets(&self, lines: &[&str]) -> (DayBuckets, bool) {
        let mut buckets = DayBuckets::new();
        let mut current_day: Option<u32> = None;

        for (idx, line) in lines.iter().enumerate() {
            if let Some(day) = self.days.extract_day_number(line) {
                log::trace!("[Parser] line {}: day {}", idx, day);
                current_day = Some(day);
                let bucket = buckets.entry(day).or_default();
                if let Some(activity) = self.days.extract_activity_from_day_line(line) {
                    bucket.push(activity);
                }
                continue;
            }

            let Some(activity) = self.activities.extract_activity(line) else {
                log::trace!("[Parser] line {}: nothing usable in {:?}", idx, line);
                continue;
            };
            let day = current_day
                .or_else(|| self.infer_day_from_context(idx, lines))
                .unwrap_or(self.config.default_day);
            log::trace!("[Parser] line {}: activity {:?} -> day {}", idx, activity, day);
            buckets.entry(day).or_default().push(activity);
        }

        (buckets, current_day.is_some())
    }

    fn infer_day_from_context(&self, idx: usize, lines: &[&str]) -> Option<u32> {
        let start = idx.saturating_sub(self.config.context_lookback_lines);
        lines[start..idx]
            .iter()
            .find_map(|line| self.days.extract_day_number(line))
    }

    /// Turns buckets into days numbered 1..=N in ascending order of the day
    /// numbers found, so gaps such as "Day 1, Day 3" close up.
    fn build_itinerary_days(
        &self,
        buckets: DayBuckets,
        location: &str,
    ) -> Result<Vec<ItineraryDay>, ValidationError> {
        buckets
            .into_iter()
            .zip(1u32..)
            .map(|((found, raw), day)| {
                if found != day {
                    log::debug!("[Parser] Renumbering day {} as day {}", found, day);
                }
                let mut activities = self.clean_all(&raw, self.config.max_activities_per_day);
                if activities.is_empty() {
                    activities.push(FREE_TIME.to_string());
                }
                ItineraryDay::new(day, location, activities)
            })
            .collect()
    }

    /// One day holding every activity of a text without day markers, capped
    /// by `max_fallback_activities`.
    fn fallback_day(
        &self,
        found: Vec<String>,
        location: &str,
    ) -> Result<ItineraryDay, ValidationError> {
        let mut activities = self.clean_all(&found, self.config.max_fallback_activities);
        if activities.is_empty() {
            activities.push(PLAN_PLACEHOLDER.to_string());
        }
        ItineraryDay::new(1, location, activities)
    }

    fn clean_all(&self, raw: &[String], limit: usize) -> Vec<String> {
        raw.iter()
            .map(|a| self.activities.clean_activity(a))
            .filter(|a| !a.is_empty())
            .take(limit)
            .collect()
    }
}
