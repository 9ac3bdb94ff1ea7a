// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ParsingConfig;
use crate::patterns::ParsingPatterns;
use std::sync::Arc;

pub struct DestinationExtractor {
    patterns: Arc<ParsingPatterns>,
    config: Arc<ParsingConfig>,
}

impl DestinationExtractor {
    pub fn new(patterns: Arc<ParsingPatterns>, config: Arc<ParsingConfig>) -> Self {
        Self { patterns, config }
    }

    /// Best-effort trip destination from phrasings like "Trip to X" or
    /// "Поїздка до X". Runs over the whole text, not line by line.
    pub fn extract_destination(&self, full_text: &str) -> Option<String> {
        for (i, pattern) in self.patterns.location_patterns.iter().enumerate() {
            let Some(raw) = pattern
                .captures(full_text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
            else {
                continue;
            };

            let candidate = self.patterns.strip_duration(raw).trim();
            log::trace!(
                "[Destination] pattern {} matched {:?} -> {:?}",
                i + 1,
                raw,
                candidate
            );

            if candidate.chars().count() > self.config.min_destination_length
                && !self.patterns.is_noise_word(candidate)
            {
                return Some(candidate.to_string());
            }
        }
        None
    }
}
