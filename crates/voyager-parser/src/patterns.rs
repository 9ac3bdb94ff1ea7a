// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Static pattern and keyword tables shared by every extractor.
//!
//! Tables are ordered: extractors walk them top to bottom and stop at the
//! first hit, so earlier entries take precedence.

use crate::model::TransportationType;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// A numeric day marker. Group 1 holds the day number; when the marker is
/// stripped from a line the match is replaced by `strip_with`.
#[derive(Debug, Clone)]
pub struct DayPattern {
    pub regex: Regex,
    pub strip_with: &'static str,
}

impl DayPattern {
    fn new(pattern: &str, strip_with: &'static str) -> Self {
        Self {
            regex: compile(pattern),
            strip_with,
        }
    }
}

/// Value of a day word such as "second" or "останній".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayWord {
    Nth(u32),
    /// "last day": the actual number depends on the trip length.
    Last,
}

#[derive(Debug, Clone)]
pub struct ParsingPatterns {
    pub day_patterns: Vec<DayPattern>,
    pub ordinal_phrases: Vec<Regex>,
    pub day_words: Vec<(String, DayWord)>,
    pub activity_patterns: Vec<Regex>,
    pub location_patterns: Vec<Regex>,
    pub duration_patterns: Vec<Regex>,
    pub noise_words: HashSet<String>,
    pub transport_keywords: Vec<(TransportationType, Vec<String>)>,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?im){}", pattern))
        .unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for ParsingPatterns {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParsingPatterns {
    /// Shared instance, compiled on first use.
    pub fn shared() -> Arc<ParsingPatterns> {
        static PATTERNS: OnceLock<Arc<ParsingPatterns>> = OnceLock::new();
        Arc::clone(PATTERNS.get_or_init(|| Arc::new(ParsingPatterns::builtin())))
    }

    /// Builds a fresh copy of the built-in tables.
    pub fn builtin() -> Self {
        Self {
            day_patterns: vec![
                DayPattern::new(r"\bдень\s*(\d+)", ""), // "День 1"
                DayPattern::new(r"\bday\s*(\d+)", ""),  // "Day 1", not "Sunday 10"
                DayPattern::new(r"(\d+)[-\s]*й?\s*день", ""), // "1-й день", "1 день"
                DayPattern::new(r"(\d+)(?:st|nd|rd|th)\s*day", ""), // "2nd day"
                // "1. Activity": the letter after the number is kept
                DayPattern::new(r"^(\d{1,2})\.?\s*(\p{L})", "$2"),
            ],
            ordinal_phrases: [
                r"\bперший\s*день",
                r"\bдругий\s*день",
                r"\bтретій\s*день",
                r"\bостанній\s*день",
                r"\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|last)\s+day\b",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            day_words: [
                ("перший", DayWord::Nth(1)),
                ("другий", DayWord::Nth(2)),
                ("третій", DayWord::Nth(3)),
                ("четвертий", DayWord::Nth(4)),
                ("п'ятий", DayWord::Nth(5)),
                ("шостий", DayWord::Nth(6)),
                ("сьомий", DayWord::Nth(7)),
                ("восьмий", DayWord::Nth(8)),
                ("дев'ятий", DayWord::Nth(9)),
                ("десятий", DayWord::Nth(10)),
                ("first", DayWord::Nth(1)),
                ("second", DayWord::Nth(2)),
                ("third", DayWord::Nth(3)),
                ("fourth", DayWord::Nth(4)),
                ("fifth", DayWord::Nth(5)),
                ("sixth", DayWord::Nth(6)),
                ("seventh", DayWord::Nth(7)),
                ("eighth", DayWord::Nth(8)),
                ("ninth", DayWord::Nth(9)),
                ("tenth", DayWord::Nth(10)),
                ("останній", DayWord::Last),
                ("last", DayWord::Last),
            ]
            .iter()
            .map(|(w, d)| (w.to_string(), *d))
            .collect(),
            activity_patterns: [
                r"^\s*[-•*]\s*(.+)$",                  // "- Activity", "• Activity"
                r"^\s*\d+\.\s*(.+)$",                  // "1. Activity"
                r"^\s*\d+\)\s*(.+)$",                  // "1) Activity"
                r"(?:відвідування|відвідати)\s+(.+)$", // "відвідування музею"
                r"(?:visit|visiting)\s+(.+)$",
                r"(?:прогулянка|прогулятися)\s+(.+)$", // "прогулянка по парку"
                r"(?:walk|walking)\s+(.+)$",
                r"(?:вечеря|обід|сніданок)\s+(.+)$", // "вечеря в ресторані"
                r"(?:dinner|lunch|breakfast)\s+(.+)$",
                r"(?:екскурсія|тур)\s+(.+)$", // "екскурсія по місту"
                r"(?:tour|excursion)\s+(.+)$",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            location_patterns: [
                r"(?:поїздка|подорож)\s+(?:в|до|у)\s+([А-ЯІЇЄа-яіїєA-Za-z\s-]+?)(?:\s+на|\s*[,.\n]|$)",
                r"(?:поїхати|їхати|летіти|відвідати)\s+(?:в|до|у)\s+([А-ЯІЇЄа-яіїєA-Za-z\s-]+?)(?:\s+на|\s*[,.\n]|$)",
                r"(?:trip|travel|visit|go)\s+to\s+([A-Za-z\s-]+?)(?:\s+for|\s*[,.\n]|$)",
                r"\bin\s+([A-Z][A-Za-z\s-]+?)(?:\s+for|\s*[,.\n]|$)",
                // "Lviv - day 1", "Odesa: arrival"
                r"([А-ЯA-Z][А-ЯІЇЄа-яіїєA-Za-z\s-]+?)\s*[-:]\s*(?:день|day|прибуття|arrival)",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            duration_patterns: [r"на\s*(\d+)\s*дн\p{L}*", r"for\s*(\d+)\s*days?\b"]
                .iter()
                .map(|p| compile(p))
                .collect(),
            noise_words: [
                "день",
                "day",
                "активності",
                "activities",
                "план",
                "plan",
                "маршрут",
                "itinerary",
                "розклад",
                "schedule",
                "програма",
                "program",
                "поїздка",
                "trip",
                "подорож",
                "travel",
                "прибуття",
                "arrival",
                "від'їзд",
                "departure",
                "ввечері",
                "evening",
                "потім",
                "then",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            transport_keywords: vec![
                (
                    TransportationType::Driving,
                    words(&["машина", "автомобіль", "car", "drive", "driving"]),
                ),
                (
                    TransportationType::Walking,
                    words(&["пішки", "ходьба", "walk", "walking", "on foot"]),
                ),
                (
                    TransportationType::Cycling,
                    words(&["велосипед", "bike", "bicycle", "cycling", "велосипедна"]),
                ),
                (
                    TransportationType::PublicTransit,
                    words(&["транспорт", "автобус", "метро", "bus", "metro", "train", "tram"]),
                ),
                (
                    TransportationType::Flight,
                    words(&["літак", "авіа", "flight", "plane", "airplane"]),
                ),
            ],
        }
    }

    /// Count of the "trip lasts N days" phrase in `text`, if any.
    pub fn trip_duration(&self, text: &str) -> Option<u32> {
        self.duration_patterns
            .iter()
            .filter_map(|re| re.captures(text))
            .find_map(|caps| caps.get(1)?.as_str().parse().ok())
            .filter(|&n: &u32| n > 0)
    }

    /// Removes every duration phrase ("на 2 дні", "for 3 days") and what follows it.
    pub fn strip_duration<'a>(&self, text: &'a str) -> &'a str {
        let cut = self
            .duration_patterns
            .iter()
            .filter_map(|re| re.find(text))
            .map(|m| m.start())
            .min()
            .unwrap_or(text.len());
        text[..cut].trim_end()
    }

    pub fn is_noise_word(&self, word: &str) -> bool {
        self.noise_words.contains(&word.to_lowercase())
    }
}
