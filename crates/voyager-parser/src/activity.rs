// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ParsingConfig;
use crate::normalizer::contains_word;
use crate::patterns::ParsingPatterns;
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub struct ActivityExtractor {
    patterns: Arc<ParsingPatterns>,
    config: Arc<ParsingConfig>,
}

fn letter_run() -> &'static Regex {
    static LETTERS: OnceLock<Regex> = OnceLock::new();
    LETTERS.get_or_init(|| Regex::new(r"[\p{Cyrillic}\p{Latin}]{3,}").unwrap())
}

impl ActivityExtractor {
    pub fn new(patterns: Arc<ParsingPatterns>, config: Arc<ParsingConfig>) -> Self {
        Self { patterns, config }
    }

    pub fn extract_activity(&self, line: &str) -> Option<String> {
        for (i, pattern) in self.patterns.activity_patterns.iter().enumerate() {
            let Some(activity) = pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
            else {
                continue;
            };
            log::trace!("[Activity] pattern {} matched {:?}", i + 1, activity);
            if self.is_valid_activity(activity) {
                return Some(activity.to_string());
            }
        }

        // No marker or keyword: accept the bare line if it is substantial.
        let bare = line
            .trim_start_matches(|c: char| {
                matches!(c, '-' | '•' | '*' | '.' | ')' | ':') || c.is_ascii_digit() || c.is_whitespace()
            })
            .trim();
        if bare.chars().count() > self.config.min_fallback_line_length && self.is_valid_activity(bare)
        {
            log::trace!("[Activity] bare line accepted: {:?}", bare);
            return Some(bare.to_string());
        }
        None
    }

    /// Long enough, free of noise words (whole words only, so "today" is
    /// fine) and containing at least three consecutive letters.
    pub fn is_valid_activity(&self, text: &str) -> bool {
        text.chars().count() > self.config.min_activity_length
            && !contains_word(text, |w| self.patterns.is_noise_word(w))
            && letter_run().is_match(text)
    }

    pub fn clean_activity(&self, text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let trimmed = collapsed
            .trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .trim_end_matches([',', ';'])
            .trim_end();

        let mut chars = trimmed.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
