// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ParsingConfig;
use crate::normalizer::{contains_word, remove_words};
use crate::patterns::{DayWord, ParsingPatterns};
use std::sync::Arc;

/// Day assumed for "last day" when the line gives no trip length.
/// This is a guess, not something derived from the text.
pub const LAST_DAY_FALLBACK: u32 = 3;

pub struct DayParser {
    patterns: Arc<ParsingPatterns>,
    config: Arc<ParsingConfig>,
}

impl DayParser {
    pub fn new(patterns: Arc<ParsingPatterns>, config: Arc<ParsingConfig>) -> Self {
        Self { patterns, config }
    }

    /// Day number announced by `line`, e.g. "Day 2", "3-й день", "second day".
    pub fn extract_day_number(&self, line: &str) -> Option<u32> {
        for (i, pattern) in self.patterns.day_patterns.iter().enumerate() {
            let Some(caps) = pattern.regex.captures(line) else {
                continue;
            };
            match caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                Some(day) if day > 0 => {
                    log::trace!("[DayParser] pattern {} matched day {} in {:?}", i + 1, day, line);
                    return Some(day);
                }
                _ => {
                    log::trace!("[DayParser] pattern {} matched without a usable number", i + 1);
                }
            }
        }

        let (word, value) = self.find_day_word(line)?;
        let day = match value {
            DayWord::Nth(n) => n,
            DayWord::Last => self.guess_last_day_number(line),
        };
        log::trace!("[DayParser] day word {:?} -> {}", word, day);
        Some(day)
    }

    fn find_day_word(&self, line: &str) -> Option<(&str, DayWord)> {
        self.patterns
            .day_words
            .iter()
            .find(|(word, _)| contains_word(line, |w| w.to_lowercase() == *word))
            .map(|(word, value)| (word.as_str(), *value))
    }

    /// Resolves "last day" from a trip length in the same line
    /// ("for 4 days", "на 4 дні"), else `LAST_DAY_FALLBACK`.
    pub fn guess_last_day_number(&self, line: &str) -> u32 {
        self.patterns
            .trip_duration(line)
            .unwrap_or(LAST_DAY_FALLBACK)
    }

    /// What is left of a day line once the day marker is removed, if it
    /// reads like an activity ("Day 1: Visit museum" -> "Visit museum").
    pub fn extract_activity_from_day_line(&self, line: &str) -> Option<String> {
        let mut cleaned = line.to_string();
        for pattern in &self.patterns.day_patterns {
            cleaned = pattern
                .regex
                .replace_all(&cleaned, pattern.strip_with)
                .into_owned();
        }
        for phrase in &self.patterns.ordinal_phrases {
            cleaned = phrase.replace_all(&cleaned, "").into_owned();
        }
        let cleaned = remove_words(&cleaned, |w| {
            let w = w.to_lowercase();
            self.patterns.day_words.iter().any(|(word, _)| *word == w)
        });

        // "First, visit the museum" leaves ", visit the museum" behind
        let cleaned = cleaned
            .trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .trim();

        let long_enough = cleaned.chars().count() > self.config.min_activity_length;
        if long_enough && !contains_word(cleaned, |w| self.patterns.is_noise_word(w)) {
            Some(cleaned.to_string())
        } else {
            None
        }
    }
}
